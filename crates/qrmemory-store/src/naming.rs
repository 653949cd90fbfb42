//! Filenames for generated artifacts.

use crate::error::StoreError;
use qrmemory_config::NamingScheme;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Shared stem for the sidecar and barcode produced from one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactName {
    stem: String,
}

impl ArtifactName {
    /// Build a stem from a label and a unix timestamp under a naming scheme.
    pub fn new(label: &str, timestamp: i64, scheme: NamingScheme) -> Result<Self, StoreError> {
        validate_label(label)?;
        let stem = match scheme {
            NamingScheme::Timestamp => format!("{label}_{timestamp}"),
            NamingScheme::Unique => format!("{label}_{timestamp}_{}", Uuid::new_v4().simple()),
        };
        Ok(Self { stem })
    }

    /// Filename stem without extension.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// `<dir>/<stem>.json`
    pub fn sidecar_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.json", self.stem))
    }

    /// `<dir>/<stem>.png`
    pub fn barcode_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.png", self.stem))
    }
}

/// Labels become part of a filename, so they must be a single path component.
pub fn validate_label(label: &str) -> Result<(), StoreError> {
    let bad = label.trim().is_empty()
        || label == "."
        || label == ".."
        || label.chars().any(|ch| matches!(ch, '/' | '\\' | '\0'));
    if bad {
        return Err(StoreError::InvalidLabel(label.to_string()));
    }
    Ok(())
}
