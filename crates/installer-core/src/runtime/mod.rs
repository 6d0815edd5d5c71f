//! Runtime capability checks and subprocess provisioning
//!
//! This module provides:
//! - The preflight archive-support probe
//! - Package manager location (vendored executable or PATH)
//! - The provisioning runner executing chained command sequences

pub mod check;
pub mod locator;
pub mod runner;

pub use check::check_archive_support;
pub use locator::PackageManager;
pub use runner::{CommandSequence, ProvisioningRunner, Terminal};
