//! QR symbol capacity and fitting.

use crate::error::BarcodeError;
use qrcode::bits::Bits;
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode, Version};
use qrmemory_config::{ErrorCorrection, MAX_QR_VERSION};

/// Mode indicator bits preceding a segment.
const MODE_INDICATOR_BITS: usize = 4;

/// Map the config level onto the encoder's level.
pub(crate) fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::L => EcLevel::L,
        ErrorCorrection::M => EcLevel::M,
        ErrorCorrection::Q => EcLevel::Q,
        ErrorCorrection::H => EcLevel::H,
    }
}

/// Bytes a single byte-mode segment can carry in a symbol of this version.
///
/// Returns None for versions outside 1..=40.
pub fn byte_capacity(version: u8, level: ErrorCorrection) -> Option<usize> {
    if !(1..=MAX_QR_VERSION).contains(&version) {
        return None;
    }
    let data_bits = Bits::new(Version::Normal(i16::from(version)))
        .max_len(ec_level(level))
        .ok()?;
    let count_bits = if version < 10 { 8 } else { 16 };
    Some(data_bits.saturating_sub(MODE_INDICATOR_BITS + count_bits) / 8)
}

/// Encode `text` as one byte-mode segment in the smallest symbol that
/// holds it.
///
/// The version chosen is always the first whose [`byte_capacity`] covers the
/// text. Returns None when no symbol up to `max_version` can carry it.
pub(crate) fn fit(
    text: &str,
    level: ErrorCorrection,
    max_version: u8,
) -> Result<Option<(QrCode, u8)>, BarcodeError> {
    let limit = max_version.min(MAX_QR_VERSION);
    let Some(version) = (1..=limit)
        .find(|&v| byte_capacity(v, level).is_some_and(|cap| text.len() <= cap))
    else {
        return Ok(None);
    };
    let mut bits = Bits::new(Version::Normal(i16::from(version)));
    match bits
        .push_byte_data(text.as_bytes())
        .and_then(|()| bits.push_terminator(ec_level(level)))
    {
        Ok(()) => {}
        Err(QrError::DataTooLong) => return Ok(None),
        Err(err) => return Err(BarcodeError::Qr(err)),
    }
    let code = QrCode::with_bits(bits, ec_level(level)).map_err(BarcodeError::Qr)?;
    Ok(Some((code, version)))
}

#[cfg(test)]
mod tests {
    use super::{byte_capacity, fit};
    use pretty_assertions::assert_eq;
    use qrmemory_config::ErrorCorrection;

    #[test]
    fn capacities_match_the_standard_tables() {
        assert_eq!(byte_capacity(1, ErrorCorrection::L), Some(17));
        assert_eq!(byte_capacity(1, ErrorCorrection::H), Some(7));
        assert_eq!(byte_capacity(10, ErrorCorrection::M), Some(213));
        assert_eq!(byte_capacity(40, ErrorCorrection::L), Some(2953));
        assert_eq!(byte_capacity(40, ErrorCorrection::H), Some(1273));
    }

    #[test]
    fn capacity_rejects_unknown_versions() {
        assert_eq!(byte_capacity(0, ErrorCorrection::L), None);
        assert_eq!(byte_capacity(41, ErrorCorrection::L), None);
    }

    #[test]
    fn fit_picks_smallest_version() {
        let (_, version) = fit("e30=", ErrorCorrection::L, 40)
            .expect("fit")
            .expect("symbol");
        assert_eq!(version, 1);
    }

    #[test]
    fn fit_respects_version_limit() {
        let text = "a".repeat(100);
        assert!(fit(&text, ErrorCorrection::H, 1).expect("fit").is_none());
        assert!(fit(&text, ErrorCorrection::H, 40).expect("fit").is_some());
    }

    #[test]
    fn fit_version_matches_byte_capacity() {
        let cap = byte_capacity(3, ErrorCorrection::M).expect("capacity");
        let (_, version) = fit(&"A".repeat(cap), ErrorCorrection::M, 40)
            .expect("fit")
            .expect("symbol");
        assert_eq!(version, 3);
        let (_, version) = fit(&"A".repeat(cap + 1), ErrorCorrection::M, 40)
            .expect("fit")
            .expect("symbol");
        assert_eq!(version, 4);
    }

    #[test]
    fn fit_reports_overflow_as_none() {
        let text = "z".repeat(4000);
        assert!(fit(&text, ErrorCorrection::L, 40).expect("fit").is_none());
    }
}
