//! Persist key/value memory records as a JSON sidecar plus a QR-code PNG.
//!
//! [`QrMemory`] wires the serializer, compressor, encoder, barcode renderer,
//! and sidecar store together from one [`QrMemoryConfig`]. The sidecar is the
//! source of truth; the barcode is an export that may carry a reduced record
//! when the full one does not fit.

pub mod error;
pub mod persist;

/// Re-export for convenience.
pub use qrmemory_barcode as barcode;
/// Re-export for convenience.
pub use qrmemory_codec as codec;
/// Re-export for convenience.
pub use qrmemory_config as config;
/// Re-export for convenience.
pub use qrmemory_protocol as protocol;
/// Re-export for convenience.
pub use qrmemory_store as store;

pub use error::QrMemoryError;
pub use persist::QrMemory;
pub use qrmemory_config::QrMemoryConfig;
pub use qrmemory_protocol::{MemoryRecord, PersistedArtifact, Stage, Tier};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
