//! File reads and atomic writes

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Read a whole file.
pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::file_open(path, e))
}

/// Write content atomically to a file.
///
/// Writes to a temporary file in the target's directory (same filesystem),
/// syncs it, then renames it over the target. On failure the target is left
/// untouched and the temporary file is removed. An existing target's
/// permissions carry over to the new file.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(Error::output)?;
    temp.write_all(content).map_err(Error::output)?;
    temp.as_file().sync_all().map_err(Error::output)?;

    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(Error::output)?;
    }

    temp.persist(path).map_err(|e| Error::output(e.error))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Replaced file atomically");
    Ok(())
}
