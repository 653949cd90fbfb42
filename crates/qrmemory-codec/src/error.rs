//! Error types for codec stages.

use qrmemory_protocol::Stage;

/// Errors returned while turning records into payload text and back.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// serde_json refused the value.
    #[error("serialize stage failed: {0}")]
    Serialize(#[source] serde_json::Error),
    /// A float is NaN or infinite.
    #[error("serialize stage failed: {0}")]
    NonFinite(String),
    /// The value is JSON but not an object.
    #[error("serialize stage failed: record must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    /// zlib stream could not be written.
    #[error("compress stage failed: {0}")]
    Compress(#[source] std::io::Error),
    /// zlib stream could not be inflated.
    #[error("decompress stage failed: {0}")]
    Decompress(#[source] std::io::Error),
    /// Payload text is not valid base64.
    #[error("decode stage failed: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Payload text decoded to nothing.
    #[error("decode stage failed: empty payload")]
    EmptyPayload,
    /// JSON text could not be parsed into a record.
    #[error("parse stage failed: {0}")]
    Parse(#[source] serde_json::Error),
}

impl CodecError {
    /// Pipeline stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            CodecError::Serialize(_)
            | CodecError::NonFinite(_)
            | CodecError::NotAnObject(_) => Stage::Serialize,
            CodecError::Compress(_) | CodecError::Decompress(_) => Stage::Compress,
            CodecError::Base64(_) | CodecError::EmptyPayload => Stage::Decode,
            CodecError::Parse(_) => Stage::Parse,
        }
    }
}
