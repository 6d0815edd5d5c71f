//! The immutable install request built from parsed CLI input

use std::path::{Path, PathBuf};

/// Version selector flags as given on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionFlags {
    pub dev: bool,
    pub v5_1: bool,
    pub v5_2: bool,
    pub v5_3: bool,
}

/// Everything the pipeline needs to know about one run
#[derive(Debug, Clone, Default)]
pub struct InstallRequest {
    /// Destination directory name; `None` or empty means the working directory itself
    pub target_name: Option<String>,
    pub version_flags: VersionFlags,
    /// Append the package manager's no-ansi flag to the post-install commands
    pub no_ansi: bool,
    /// Install optional developer tooling after the skeleton is ready
    pub extra_tooling: bool,
}

impl InstallRequest {
    pub fn new(target_name: Option<String>, version_flags: VersionFlags) -> Self {
        Self {
            target_name,
            version_flags,
            ..Default::default()
        }
    }

    pub fn with_no_ansi(mut self, no_ansi: bool) -> Self {
        self.no_ansi = no_ansi;
        self
    }

    pub fn with_extra_tooling(mut self, extra_tooling: bool) -> Self {
        self.extra_tooling = extra_tooling;
        self
    }

    /// Target name with empty strings treated as absent
    pub fn name(&self) -> Option<&str> {
        self.target_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Resolve the target directory against the working directory
    pub fn target_dir(&self, working_dir: &Path) -> PathBuf {
        match self.name() {
            Some(name) => working_dir.join(name),
            None => working_dir.to_path_buf(),
        }
    }
}
