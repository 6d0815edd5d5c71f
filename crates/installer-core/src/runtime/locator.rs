//! Package manager location

use crate::product::ProductConfig;
use std::path::Path;

/// How to invoke the package manager from a shell command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    prefix: String,
}

impl PackageManager {
    /// Prefer a vendored executable in `working_dir`, run with the product runtime;
    /// otherwise fall back to the bare command name on PATH
    pub fn locate<C: ProductConfig>(config: &C, working_dir: &Path) -> Self {
        let vendored = working_dir.join(config.vendored_package_manager());
        if vendored.is_file() {
            let runtime = std::env::var(config.runtime_binary_env())
                .ok()
                .filter(|binary| !binary.is_empty())
                .unwrap_or_else(|| config.runtime_binary().to_string());
            let prefix = format!(
                "{} {}",
                shell_words::quote(&runtime),
                shell_words::quote(&vendored.to_string_lossy())
            );
            return Self { prefix };
        }

        Self::from_command(config.package_manager())
    }

    pub fn from_command(command: impl Into<String>) -> Self {
        Self {
            prefix: command.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Full command line for the given package manager arguments
    pub fn command(&self, args: &str) -> String {
        format!("{} {}", self.prefix, args)
    }
}
