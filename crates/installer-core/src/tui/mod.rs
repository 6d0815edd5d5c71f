//! Charm-style console output using cliclack
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod reporter;

#[cfg(feature = "tui")]
pub use reporter::CliclackReporter;
