//! End-to-end persistence of a record to a sidecar and a barcode.

use crate::error::QrMemoryError;
use log::{debug, info};
use qrmemory_barcode::{BarcodeRenderer, read_record};
use qrmemory_codec::Payload;
use qrmemory_config::QrMemoryConfig;
use qrmemory_protocol::{MemoryRecord, PersistedArtifact};
use qrmemory_store::{ArtifactName, SidecarStore};
use std::path::Path;

/// Persists records with one immutable configuration.
#[derive(Debug, Clone)]
pub struct QrMemory {
    config: QrMemoryConfig,
    store: SidecarStore,
    renderer: BarcodeRenderer,
}

impl QrMemory {
    /// Validate `config` and build the pipeline from it.
    pub fn new(config: QrMemoryConfig) -> Result<Self, QrMemoryError> {
        config.validate()?;
        let store = SidecarStore::from_config(&config.sidecar);
        let renderer = BarcodeRenderer::from_config(&config);
        debug!(
            "qrmemory ready (dir={}, level={:?}, compress={})",
            store.root().display(),
            config.barcode.error_correction,
            config.payload.compress
        );
        Ok(Self {
            config,
            store,
            renderer,
        })
    }

    /// Build from the user config file, or defaults when there is none.
    pub fn from_default_config() -> Result<Self, QrMemoryError> {
        Self::new(QrMemoryConfig::load_default()?)
    }

    pub fn config(&self) -> &QrMemoryConfig {
        &self.config
    }

    pub fn store(&self) -> &SidecarStore {
        &self.store
    }

    /// Write `record` as `<label>_<ts>….json` and `<label>_<ts>….png`.
    ///
    /// The barcode is rendered in memory first, so a capacity overflow
    /// leaves no files behind. The sidecar is written before the PNG.
    pub fn persist(
        &self,
        record: &MemoryRecord,
        label: &str,
    ) -> Result<PersistedArtifact, QrMemoryError> {
        let name = self.store.name_for(label)?;
        self.persist_named(record, &name)
    }

    /// Like [`QrMemory::persist`] with an explicit unix timestamp.
    pub fn persist_at(
        &self,
        record: &MemoryRecord,
        label: &str,
        timestamp: i64,
    ) -> Result<PersistedArtifact, QrMemoryError> {
        let name = self.store.name_at(label, timestamp)?;
        self.persist_named(record, &name)
    }

    fn persist_named(
        &self,
        record: &MemoryRecord,
        name: &ArtifactName,
    ) -> Result<PersistedArtifact, QrMemoryError> {
        let full = Payload::build(record, self.config.payload.level())?;
        let rendered = self.renderer.render(record, &full)?;

        let sidecar = self.store.store_named(record, name)?;
        let barcode = name.barcode_path(self.store.root());
        rendered.write_png(&barcode)?;

        info!(
            "persisted record (sidecar={}, barcode={}, tier={}, version={}, json_bytes={}, payload_bytes={}, chars={})",
            sidecar.display(),
            barcode.display(),
            rendered.tier,
            rendered.version,
            rendered.stats.json_bytes,
            rendered.stats.payload_bytes,
            rendered.stats.encoded_chars
        );
        Ok(PersistedArtifact {
            sidecar,
            barcode,
            tier: rendered.tier,
            qr_version: rendered.version,
            stats: rendered.stats,
        })
    }

    /// Read a sidecar back into a record.
    pub fn load(&self, path: &Path) -> Result<MemoryRecord, QrMemoryError> {
        Ok(self.store.load(path)?)
    }

    /// Decode the record carried by a barcode PNG.
    ///
    /// Returns the reduced record when the barcode holds a fallback tier.
    pub fn read_barcode(&self, path: &Path) -> Result<MemoryRecord, QrMemoryError> {
        Ok(read_record(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::QrMemory;
    use crate::QrMemoryError;
    use pretty_assertions::assert_eq;
    use qrmemory_config::QrMemoryConfig;
    use qrmemory_protocol::Tier;
    use qrmemory_test_utils::{config_in, consciousness_record};
    use tempfile::tempdir;

    #[test]
    fn rejects_invalid_config() {
        let mut config = QrMemoryConfig::default();
        config.payload.compression_level = 12;
        assert!(matches!(
            QrMemory::new(config),
            Err(QrMemoryError::Config(_))
        ));
    }

    #[test]
    fn persist_at_uses_shared_stem() {
        let temp = tempdir().expect("tempdir");
        let mut config = config_in(temp.path());
        config.sidecar.naming = qrmemory_config::NamingScheme::Timestamp;
        let memory = QrMemory::new(config).expect("memory");

        let artifact = memory
            .persist_at(&consciousness_record(), "qr_memory", 1_755_234_461)
            .expect("persist");
        assert_eq!(artifact.sidecar, temp.path().join("qr_memory_1755234461.json"));
        assert_eq!(artifact.barcode, temp.path().join("qr_memory_1755234461.png"));
        assert_eq!(artifact.tier, Tier::Full);
    }

    #[test]
    fn invalid_label_fails_at_write_stage() {
        let temp = tempdir().expect("tempdir");
        let memory = QrMemory::new(config_in(temp.path())).expect("memory");
        let err = memory
            .persist(&consciousness_record(), "a/b")
            .unwrap_err();
        assert_eq!(err.stage(), Some(qrmemory_protocol::Stage::Write));
        assert_eq!(std::fs::read_dir(temp.path()).expect("dir").count(), 0);
    }
}
