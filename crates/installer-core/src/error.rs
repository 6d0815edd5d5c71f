use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Application already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Failed to acquire application skeleton: {0}")]
    Acquisition(String),

    #[error("Provisioning failed: {0}")]
    Provisioning(String),

    #[error("Missing capability: {0}")]
    MissingCapability(String),
}

impl InstallError {
    /// Pipeline phase the error was raised in
    pub fn phase(&self) -> &'static str {
        match self {
            InstallError::AlreadyExists(_) => "validating",
            InstallError::Acquisition(_) => "acquiring",
            InstallError::Provisioning(_) => "provisioning",
            InstallError::MissingCapability(_) => "preflight",
        }
    }
}

pub type Result<T> = std::result::Result<T, InstallError>;
