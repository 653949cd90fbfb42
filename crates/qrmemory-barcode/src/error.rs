//! Error types for barcode rendering and reading.

use qrmemory_codec::CodecError;
use qrmemory_config::ErrorCorrection;
use qrmemory_protocol::{Stage, Tier};
use qrmemory_store::StoreError;
use std::path::PathBuf;

/// Errors returned while rendering or reading barcodes.
#[derive(Debug, thiserror::Error)]
pub enum BarcodeError {
    /// Even the smallest fallback payload does not fit a symbol.
    #[error(
        "render stage failed: {tier} payload of {len} chars exceeds QR capacity \
         (error correction {level:?}, max version {max_version})"
    )]
    CapacityOverflow {
        /// Last tier attempted.
        tier: Tier,
        /// Length of the smallest payload text attempted.
        len: usize,
        level: ErrorCorrection,
        max_version: u8,
    },
    /// QR encoder rejected the payload for a reason other than size.
    #[error("render stage failed: {0}")]
    Qr(#[from] qrcode::types::QrError),
    /// PNG encoding failed.
    #[error("render stage failed: {0}")]
    Image(#[source] image::ImageError),
    /// Writing the PNG failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Reading a barcode file failed.
    #[error("read stage failed for {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not a decodable image.
    #[error("decode stage failed: {0}")]
    ImageDecode(#[source] image::ImageError),
    /// No QR symbol was found in the image.
    #[error("decode stage failed: no QR symbol found")]
    NoSymbol,
    /// A symbol was found but could not be decoded.
    #[error("decode stage failed: {0}")]
    Symbol(String),
    /// Payload text did not turn back into a record.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl BarcodeError {
    /// Pipeline stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            BarcodeError::CapacityOverflow { .. }
            | BarcodeError::Qr(_)
            | BarcodeError::Image(_) => Stage::Render,
            BarcodeError::Store(err) => err.stage(),
            BarcodeError::Read { .. } => Stage::Read,
            BarcodeError::ImageDecode(_) | BarcodeError::NoSymbol | BarcodeError::Symbol(_) => {
                Stage::Decode
            }
            BarcodeError::Codec(err) => err.stage(),
        }
    }
}
