//! Error types for sidecar storage.

use qrmemory_codec::CodecError;
use qrmemory_protocol::Stage;
use std::path::PathBuf;

/// Errors returned by the sidecar store and the atomic writer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading a sidecar failed (missing file, permissions).
    #[error("read stage failed for {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing a file failed (missing directory, permissions, disk full).
    #[error("write stage failed for {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Sidecar contents are not a JSON object.
    #[error("parse stage failed for {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
    /// Record could not be serialized.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// Label cannot be used in a filename.
    #[error("invalid label {0:?}: must be non-empty and contain no path separators")]
    InvalidLabel(String),
}

impl StoreError {
    /// Pipeline stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            StoreError::Read { .. } => Stage::Read,
            StoreError::Write { .. } => Stage::Write,
            StoreError::Parse { .. } => Stage::Parse,
            StoreError::Codec(err) => err.stage(),
            StoreError::InvalidLabel(_) => Stage::Write,
        }
    }

    /// Path the failed operation targeted, when there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            StoreError::Read { path, .. }
            | StoreError::Write { path, .. }
            | StoreError::Parse { path, .. } => Some(path),
            StoreError::Codec(_) | StoreError::InvalidLabel(_) => None,
        }
    }

    /// True when a read failed because the file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
