//! Write-then-rename file replacement.

use crate::error::StoreError;
use log::debug;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `bytes` without ever exposing a partial file.
///
/// Bytes go to a temporary file in the destination directory, are flushed to
/// disk, and the temporary file is renamed over the destination. An existing
/// file is replaced; readers see either the old or the new contents.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let write_err = |source: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir).map_err(write_err)?;
    temp.write_all(bytes).map_err(write_err)?;
    temp.as_file().sync_all().map_err(write_err)?;
    temp.persist(path).map_err(|err| write_err(err.error))?;
    debug!(
        "wrote file atomically (path={}, bytes={})",
        path.display(),
        bytes.len()
    );
    Ok(())
}
