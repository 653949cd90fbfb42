//! Base64 text encoding for barcode payloads.

use crate::error::CodecError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Encode bytes as standard, padded base64.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard base64 text. Surrounding whitespace is ignored.
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    Ok(STANDARD.decode(text.trim())?)
}
