//! Version resolution and acquisition strategy selection

use crate::request::VersionFlags;
use std::fmt;

/// Skeleton versions the installer knows how to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    Develop,
    Master,
    V5_1,
    V5_2,
    V5_3,
}

impl Version {
    pub const ALL: [Version; 5] = [
        Version::Develop,
        Version::Master,
        Version::V5_1,
        Version::V5_2,
        Version::V5_3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Develop => "develop",
            Version::Master => "master",
            Version::V5_1 => "5.1",
            Version::V5_2 => "5.2",
            Version::V5_3 => "5.3",
        }
    }

    /// How the skeleton for this version is obtained
    pub fn strategy(&self) -> AcquisitionStrategy {
        select(*self)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the skeleton comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionStrategy {
    /// Pre-built archive downloaded and unpacked directly
    BundledArchive,
    /// Package manager `create-project` builds the skeleton
    DelegatedPackageManager,
}

/// Map version flags to a version; first match wins: dev, 5.1, 5.2, 5.3, then master
pub fn resolve(flags: &VersionFlags) -> Version {
    if flags.dev {
        Version::Develop
    } else if flags.v5_1 {
        Version::V5_1
    } else if flags.v5_2 {
        Version::V5_2
    } else if flags.v5_3 {
        Version::V5_3
    } else {
        Version::Master
    }
}

pub fn select(version: Version) -> AcquisitionStrategy {
    match version {
        Version::Develop | Version::Master => AcquisitionStrategy::BundledArchive,
        Version::V5_1 | Version::V5_2 | Version::V5_3 => {
            AcquisitionStrategy::DelegatedPackageManager
        }
    }
}
