//! Installer Core - Shared library for application skeleton installers
//!
//! This library fetches a fresh application skeleton and leaves the new project directory
//! ready for dependency installation. It is designed to be used by CLI binaries (e.g. `laravel`)
//! that share the acquisition pipeline but have different product configurations.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Version resolution, archive fetching/extraction,
//!   package manager location and command provisioning
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and the `Installer` pipeline
//! - **Layer 3: Console Interface** - `Reporter` sinks, including an optional cliclack one
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based reporter
//!
//! # Example Usage
//!
//! ```ignore
//! use installer_core::{ConsoleReporter, InstallRequest, Installer, VersionFlags};
//!
//! let request = InstallRequest::new(Some("blog".into()), VersionFlags::default());
//! let reporter = ConsoleReporter::new(true);
//! let working_dir = std::env::current_dir()?;
//! Installer::new(MyConfig, &reporter, working_dir).run(&request).await?;
//! ```

pub mod archive;
pub mod error;
pub mod installer;
pub mod product;
pub mod report;
pub mod request;
pub mod runtime;
pub mod version;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{InstallError, Result};
pub use installer::{AddonStatus, Installer, Outcome};
pub use product::ProductConfig;
pub use report::{ConsoleReporter, OutputStream, Reporter};
pub use request::{InstallRequest, VersionFlags};
pub use version::{AcquisitionStrategy, Version};

#[cfg(feature = "tui")]
pub use tui::CliclackReporter;
