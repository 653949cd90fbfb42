//! Reading barcode PNGs back into payloads and records.

use crate::error::BarcodeError;
use image::ImageFormat;
use log::{debug, warn};
use qrmemory_codec::Payload;
use qrmemory_protocol::MemoryRecord;
use std::fs;
use std::path::Path;

/// Decode the text of the first QR symbol found in PNG bytes.
pub fn decode_png(bytes: &[u8]) -> Result<String, BarcodeError> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(BarcodeError::ImageDecode)?
        .to_luma8();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        image.width() as usize,
        image.height() as usize,
        |x, y| image.get_pixel(x as u32, y as u32).0[0],
    );
    let grids = prepared.detect_grids();
    if grids.len() > 1 {
        warn!("multiple qr symbols found, using the first (count={})", grids.len());
    }
    let grid = grids.first().ok_or(BarcodeError::NoSymbol)?;
    let (meta, text) = grid
        .decode()
        .map_err(|err| BarcodeError::Symbol(err.to_string()))?;
    debug!(
        "decoded qr symbol (version={}, chars={})",
        meta.version.0,
        text.len()
    );
    Ok(text)
}

/// Read the payload text embedded in a barcode file.
pub fn read_payload(path: &Path) -> Result<String, BarcodeError> {
    let bytes = fs::read(path).map_err(|source| BarcodeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_png(&bytes)
}

/// Read a barcode file back into the record it carries.
///
/// Reduced tiers come back as the reduced record, not the full one.
pub fn read_record(path: &Path) -> Result<MemoryRecord, BarcodeError> {
    let text = read_payload(path)?;
    let record = Payload::from_encoded(&text)?.to_record()?;
    Ok(record)
}
