//! Bundled archive acquisition
//!
//! This module provides:
//! - Downloading the channel archive to a uniquely named temporary file
//! - Extracting the archive into the target directory
//! - Best-effort removal of the temporary file on every exit path

pub mod extractor;
pub mod fetcher;
pub mod temp;

pub use extractor::{cleanup, extract};
pub use fetcher::ArchiveFetcher;
pub use temp::TemporaryArchive;
