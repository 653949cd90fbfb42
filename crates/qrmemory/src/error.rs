//! Error type for the persistence facade.

use qrmemory_barcode::BarcodeError;
use qrmemory_codec::CodecError;
use qrmemory_config::ConfigError;
use qrmemory_protocol::Stage;
use qrmemory_store::StoreError;
use thiserror::Error;

/// Errors returned by [`crate::QrMemory`].
#[derive(Debug, Error)]
pub enum QrMemoryError {
    /// Configuration failed to load or validate.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Barcode(#[from] BarcodeError),
}

impl QrMemoryError {
    /// Pipeline stage that failed, or None for configuration errors.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            QrMemoryError::Config(_) => None,
            QrMemoryError::Codec(err) => Some(err.stage()),
            QrMemoryError::Store(err) => Some(err.stage()),
            QrMemoryError::Barcode(err) => Some(err.stage()),
        }
    }

    /// File involved in a read or write failure.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            QrMemoryError::Store(err) => err.path(),
            QrMemoryError::Barcode(BarcodeError::Read { path, .. }) => Some(path),
            QrMemoryError::Barcode(BarcodeError::Store(err)) => err.path(),
            _ => None,
        }
    }

    /// True when the error is a terminal QR capacity overflow.
    pub fn is_capacity_overflow(&self) -> bool {
        matches!(
            self,
            QrMemoryError::Barcode(BarcodeError::CapacityOverflow { .. })
        )
    }
}
