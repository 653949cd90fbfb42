//! Record serialization, compression, and base64 encoding.
//!
//! The stages compose into a `Payload`: the text that ends up inside a QR
//! barcode is `base64(zlib(JSON))` or `base64(JSON)` depending on whether
//! compression was requested.

pub mod compressor;
pub mod encoder;
pub mod error;
mod finite;
pub mod payload;
pub mod serializer;

/// Codec error type.
pub use error::CodecError;
/// Tagged raw/compressed payload.
pub use payload::Payload;
/// Record <-> JSON conversions.
pub use serializer::{parse_record, record_from_value, to_json, to_json_pretty, to_record};
