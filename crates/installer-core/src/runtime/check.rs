//! Preflight capability probe

use crate::error::{InstallError, Result};
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

const PROBE_ENTRY: &str = "probe.txt";
const PROBE_CONTENT: &[u8] = b"archive support probe";

/// Verify that deflate archives can be written and read back in this build
pub fn check_archive_support() -> Result<()> {
    match round_trip() {
        Ok(content) if content == PROBE_CONTENT => Ok(()),
        Ok(_) => Err(InstallError::MissingCapability(
            "Zip archive support is broken: probe content mismatch".to_string(),
        )),
        Err(e) => Err(InstallError::MissingCapability(format!(
            "Zip archive support is not available: {}",
            e
        ))),
    }
}

fn round_trip() -> zip::result::ZipResult<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        zip.start_file(PROBE_ENTRY, options)?;
        zip.write_all(PROBE_CONTENT)?;
        zip.finish()?;
    }

    let mut archive = ZipArchive::new(Cursor::new(buffer))?;
    let mut entry = archive.by_name(PROBE_ENTRY)?;
    let mut content = Vec::new();
    entry.read_to_end(&mut content)?;
    Ok(content)
}
