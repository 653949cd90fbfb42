//! Sidecar store and loader.

use crate::error::StoreError;
use crate::fs::write_atomic;
use crate::naming::ArtifactName;
use chrono::Utc;
use log::{debug, info};
use qrmemory_codec::{parse_record, to_json_pretty};
use qrmemory_config::{NamingScheme, SidecarConfig};
use qrmemory_protocol::MemoryRecord;
use std::path::{Path, PathBuf};

/// Writes records as pretty-printed JSON sidecars and reads them back.
#[derive(Debug, Clone)]
pub struct SidecarStore {
    /// Directory generated sidecars are written to.
    root: PathBuf,
    naming: NamingScheme,
}

impl SidecarStore {
    /// Create a store writing under `root`. The directory is not created.
    pub fn new(root: impl AsRef<Path>, naming: NamingScheme) -> Self {
        let root = root.as_ref().to_path_buf();
        info!(
            "initialized sidecar store (root={}, naming={:?})",
            root.display(),
            naming
        );
        Self { root, naming }
    }

    /// Create a store from the sidecar section of the config.
    pub fn from_config(config: &SidecarConfig) -> Self {
        Self::new(config.resolved_dir(), config.naming)
    }

    /// Directory generated sidecars are written to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Naming scheme for generated sidecars.
    pub fn naming(&self) -> NamingScheme {
        self.naming
    }

    /// Filename stem for a label at the current wall-clock second.
    pub fn name_for(&self, label: &str) -> Result<ArtifactName, StoreError> {
        self.name_at(label, Utc::now().timestamp())
    }

    /// Filename stem for a label at a given unix timestamp.
    pub fn name_at(&self, label: &str, timestamp: i64) -> Result<ArtifactName, StoreError> {
        ArtifactName::new(label, timestamp, self.naming)
    }

    /// Write a record to an explicit path, replacing any existing file.
    pub fn store(&self, record: &MemoryRecord, path: &Path) -> Result<(), StoreError> {
        let json = to_json_pretty(record)?;
        write_atomic(path, json.as_bytes())?;
        debug!(
            "stored sidecar (path={}, keys={}, bytes={})",
            path.display(),
            record.len(),
            json.len()
        );
        Ok(())
    }

    /// Write a record under a generated `<label>_<timestamp>…json` name.
    pub fn store_labeled(
        &self,
        record: &MemoryRecord,
        label: &str,
    ) -> Result<PathBuf, StoreError> {
        let name = self.name_for(label)?;
        self.store_named(record, &name)
    }

    /// Create the output directory if it does not exist yet.
    pub fn ensure_root(&self) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.root).map_err(|source| StoreError::Write {
            path: self.root.clone(),
            source,
        })
    }

    /// Write a record under a precomputed name.
    pub fn store_named(
        &self,
        record: &MemoryRecord,
        name: &ArtifactName,
    ) -> Result<PathBuf, StoreError> {
        self.ensure_root()?;
        let path = name.sidecar_path(&self.root);
        self.store(record, &path)?;
        Ok(path)
    }

    /// Read a sidecar back into a record.
    pub fn load(&self, path: &Path) -> Result<MemoryRecord, StoreError> {
        let bytes = std::fs::read(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let record = parse_record(&bytes).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "loaded sidecar (path={}, keys={})",
            path.display(),
            record.len()
        );
        Ok(record)
    }
}
