//! Zip extraction into the target directory

use crate::error::{InstallError, Result};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use zip::ZipArchive;

/// Extract every entry of `archive_path` into `target_dir`, keeping relative paths
///
/// Returns the number of files written. Entries whose path would escape
/// `target_dir` abort the extraction.
pub fn extract(archive_path: &Path, target_dir: &Path) -> Result<usize> {
    let file = File::open(archive_path).map_err(|e| {
        InstallError::Acquisition(format!(
            "Failed to open archive {}: {}",
            archive_path.display(),
            e
        ))
    })?;

    let mut archive = ZipArchive::new(file).map_err(|e| {
        InstallError::Acquisition(format!(
            "Failed to read zip archive {}: {}",
            archive_path.display(),
            e
        ))
    })?;

    fs::create_dir_all(target_dir).map_err(|e| write_error(target_dir, e))?;

    let mut written = 0;
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| InstallError::Acquisition(format!("Corrupt archive entry {}: {}", i, e)))?;

        let relative_path = entry.enclosed_name().ok_or_else(|| {
            InstallError::Acquisition(format!("Unsafe path in archive: {}", entry.name()))
        })?;
        let out_path = target_dir.join(relative_path);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| write_error(&out_path, e))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
        }

        let mut out = File::create(&out_path).map_err(|e| write_error(&out_path, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| write_error(&out_path, e))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&out_path, fs::Permissions::from_mode(mode & 0o7777))
                .map_err(|e| write_error(&out_path, e))?;
        }

        written += 1;
    }

    Ok(written)
}

/// Remove a temporary archive, loosening its permissions first; errors are ignored
pub fn cleanup(archive_path: &Path) {
    if let Ok(metadata) = fs::metadata(archive_path) {
        let mut permissions = metadata.permissions();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            permissions.set_mode(0o777);
        }
        #[cfg(not(unix))]
        permissions.set_readonly(false);
        let _ = fs::set_permissions(archive_path, permissions);
    }
    let _ = fs::remove_file(archive_path);
}

fn write_error(path: &Path, e: io::Error) -> InstallError {
    InstallError::Acquisition(format!("Failed to write {}: {}", path.display(), e))
}
