//! Atomic document I/O.
//!
//! The whole document is rewritten on every change:
//! 1. Serialize to a temp file in the same directory
//! 2. Rename over the target (atomic on Unix/macOS)

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use mediagrab_core::settings::AppConfig;

/// Read the document; a missing file is `Ok(None)`.
pub fn read_document(path: &Path) -> io::Result<Option<AppConfig>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Write the document atomically using temp file + rename.
pub fn write_document(path: &Path, document: &AppConfig) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let json = serde_json::to_string_pretty(document).map_err(io::Error::other)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(json.as_bytes())?;
    temp.write_all(b"\n")?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
