//! Barcode payloads as an explicit raw/compressed sum type.

use crate::compressor::{self, BEST_COMPRESSION};
use crate::encoder;
use crate::error::CodecError;
use crate::serializer::{parse_record, to_json};
use log::debug;
use qrmemory_protocol::{MemoryRecord, PayloadStats};

/// First byte of every zlib stream produced by the compressor.
const ZLIB_CMF: u8 = 0x78;

/// Bytes that go into a barcode, tagged by whether they were compressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Compact JSON bytes.
    Raw(Vec<u8>),
    /// zlib-compressed compact JSON bytes.
    Compressed(Vec<u8>),
}

impl Payload {
    /// Serialize a record without compression.
    pub fn raw(record: &MemoryRecord) -> Result<Self, CodecError> {
        Ok(Payload::Raw(to_json(record)?.into_bytes()))
    }

    /// Serialize and compress a record.
    pub fn compressed(record: &MemoryRecord, level: u32) -> Result<Self, CodecError> {
        let json = to_json(record)?;
        Ok(Payload::Compressed(compressor::compress(
            json.as_bytes(),
            level,
        )?))
    }

    /// Serialize a record, compressing when a level is given.
    pub fn build(record: &MemoryRecord, level: Option<u32>) -> Result<Self, CodecError> {
        match level {
            Some(level) => Self::compressed(record, level),
            None => Self::raw(record),
        }
    }

    /// Whichever of raw or best-compressed encodes to the shorter text.
    ///
    /// zlib framing costs more than it saves on a handful of keys, so small
    /// fallback payloads are often shorter raw.
    pub fn compact(record: &MemoryRecord) -> Result<Self, CodecError> {
        let raw = Self::raw(record)?;
        let compressed = Self::compressed(record, BEST_COMPRESSION)?;
        if compressed.encoded_len() < raw.encoded_len() {
            Ok(compressed)
        } else {
            Ok(raw)
        }
    }

    /// True for the compressed variant.
    pub fn is_compressed(&self) -> bool {
        matches!(self, Payload::Compressed(_))
    }

    /// Payload bytes before base64.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Payload::Raw(bytes) | Payload::Compressed(bytes) => bytes,
        }
    }

    /// Length of the base64 text without building it.
    pub fn encoded_len(&self) -> usize {
        self.bytes().len().div_ceil(3) * 4
    }

    /// Sizes of this payload, which must have been built from `record`.
    pub fn stats(&self, record: &MemoryRecord) -> Result<PayloadStats, CodecError> {
        let json_bytes = match self {
            Payload::Raw(bytes) => bytes.len(),
            Payload::Compressed(_) => to_json(record)?.len(),
        };
        Ok(PayloadStats {
            json_bytes,
            payload_bytes: self.bytes().len(),
            encoded_chars: self.encoded_len(),
            compressed: self.is_compressed(),
        })
    }

    /// Base64 text to embed in a barcode.
    pub fn encode(&self) -> String {
        encoder::encode(self.bytes())
    }

    /// Recover a payload from barcode text.
    ///
    /// The variant is recovered from the first decoded byte: compact JSON
    /// objects start with `{`, zlib streams with `0x78`.
    pub fn from_encoded(text: &str) -> Result<Self, CodecError> {
        let bytes = encoder::decode(text)?;
        let first = bytes
            .iter()
            .copied()
            .find(|byte| !byte.is_ascii_whitespace())
            .ok_or(CodecError::EmptyPayload)?;
        let payload = if first == ZLIB_CMF {
            Payload::Compressed(bytes)
        } else {
            Payload::Raw(bytes)
        };
        debug!(
            "decoded payload (compressed={}, bytes={})",
            payload.is_compressed(),
            payload.bytes().len()
        );
        Ok(payload)
    }

    /// Decompress if needed and parse the JSON back into a record.
    pub fn to_record(&self) -> Result<MemoryRecord, CodecError> {
        match self {
            Payload::Raw(bytes) => parse_record(bytes),
            Payload::Compressed(bytes) => parse_record(&compressor::decompress(bytes)?),
        }
    }
}
