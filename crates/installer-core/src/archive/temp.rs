//! Scoped temporary archive file

use super::extractor::cleanup;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// A temporary archive path that is removed when dropped
///
/// The file itself may not exist yet; removal failures are ignored.
#[derive(Debug)]
pub struct TemporaryArchive {
    path: PathBuf,
}

impl TemporaryArchive {
    /// Reserve a fresh `<prefix>_<hex>.zip` name inside `dir`
    pub fn new_in(dir: &Path, prefix: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let name = format!("{}_{:x}{}.zip", prefix, nanos, Uuid::new_v4().simple());
        Self {
            path: dir.join(name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file now instead of at scope exit
    pub fn cleanup(self) {
        // Drop does the work
    }
}

impl Drop for TemporaryArchive {
    fn drop(&mut self) {
        cleanup(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_names_are_unique_and_scoped() {
        let dir = TempDir::new().unwrap();
        let a = TemporaryArchive::new_in(dir.path(), "skeleton");
        let b = TemporaryArchive::new_in(dir.path(), "skeleton");

        assert_ne!(a.path(), b.path());
        assert_eq!(a.path().parent(), Some(dir.path()));
        let name = a.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("skeleton_"));
        assert!(name.ends_with(".zip"));
    }

    #[test]
    fn test_drop_removes_file() {
        let dir = TempDir::new().unwrap();
        let archive = TemporaryArchive::new_in(dir.path(), "skeleton");
        let path = archive.path().to_path_buf();
        std::fs::write(&path, b"partial").unwrap();

        drop(archive);
        assert!(!path.exists());
    }

    #[test]
    fn test_cleanup_without_file_is_silent() {
        let dir = TempDir::new().unwrap();
        let archive = TemporaryArchive::new_in(dir.path(), "skeleton");
        let path = archive.path().to_path_buf();

        archive.cleanup();
        assert!(!path.exists());
    }
}
