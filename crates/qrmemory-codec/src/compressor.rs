//! zlib (DEFLATE) compression for payload bytes.

use crate::error::CodecError;
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use std::io::{Read, Write};

/// Level used for the degraded summary and micro payloads.
pub const BEST_COMPRESSION: u32 = 9;

/// Compress bytes into a zlib stream. Levels above 9 are clamped.
pub fn compress(bytes: &[u8], level: u32) -> Result<Vec<u8>, CodecError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level.min(BEST_COMPRESSION)));
    encoder.write_all(bytes).map_err(CodecError::Compress)?;
    encoder.finish().map_err(CodecError::Compress)
}

/// Inflate a zlib stream.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut decoder = ZlibDecoder::new(bytes);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(CodecError::Decompress)?;
    Ok(out)
}
