//! Rendering, fallback, and read-back against real PNG files.

use pretty_assertions::assert_eq;
use qrmemory_barcode::{
    BarcodeError, BarcodeRenderer, DegradePolicy, byte_capacity, read_payload, read_record,
};
use qrmemory_codec::Payload;
use qrmemory_config::{DegradeConfig, ErrorCorrection, QrMemoryConfig};
use qrmemory_protocol::{MemoryRecord, Tier};
use qrmemory_test_utils::{large_record, state_record};
use tempfile::tempdir;

fn high_ec() -> QrMemoryConfig {
    QrMemoryConfig::builder()
        .error_correction(ErrorCorrection::H)
        .build()
}

/// A ~50 kB record at level H falls back to a summary that a QR reader can
/// decode, and the decoded text fits the symbol capacity.
#[test]
fn large_record_falls_back_to_summary() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("large.png");
    let record = large_record(50_000);
    let config = high_ec();
    let full = Payload::build(&record, config.payload.level()).expect("payload");

    let rendered = BarcodeRenderer::from_config(&config)
        .render_to_path(&record, &full, &path)
        .expect("render");
    assert_eq!(rendered.tier, Tier::Summary);

    let text = read_payload(&path).expect("read");
    assert_eq!(text, rendered.payload);
    let capacity = byte_capacity(rendered.version, ErrorCorrection::H).expect("capacity");
    assert!(text.len() <= capacity);
    if rendered.version > 1 {
        let smaller = byte_capacity(rendered.version - 1, ErrorCorrection::H).expect("capacity");
        assert!(text.len() > smaller);
    }

    let summary = read_record(&path).expect("record");
    assert_eq!(summary.get("consciousness_level"), record.get("consciousness_level"));
    assert!(summary.len() <= DegradeConfig::default().summary_max_keys);
}

/// Encoded length strictly decreases from full to summary to micro.
#[test]
fn fallback_tiers_shrink_strictly() {
    let record = large_record(50_000);
    let policy = DegradePolicy::default();
    let full = Payload::build(&record, Some(6)).expect("payload");

    let summary = policy
        .reduce(&record, Tier::Summary, full.encoded_len())
        .expect("reduce")
        .expect("summary");
    let micro = policy
        .reduce(&record, Tier::Micro, summary.payload.encoded_len())
        .expect("reduce")
        .expect("micro");

    assert!(full.encoded_len() > summary.payload.encoded_len());
    assert!(summary.payload.encoded_len() > micro.payload.encoded_len());
    assert_eq!(micro.tier, Tier::Micro);
}

/// A record that fits comes back intact from the PNG.
#[test]
fn full_tier_reads_back_as_the_record() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("state.png");
    let record = state_record();
    let config = QrMemoryConfig::default();
    let full = Payload::build(&record, config.payload.level()).expect("payload");

    let rendered = BarcodeRenderer::from_config(&config)
        .render_to_path(&record, &full, &path)
        .expect("render");
    assert_eq!(rendered.tier, Tier::Full);
    assert_eq!(read_record(&path).expect("record"), record);
}

/// The empty record renders and reads back as empty.
#[test]
fn empty_record_round_trips_through_png() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("empty.png");
    let record = MemoryRecord::new();
    let full = Payload::build(&record, Some(6)).expect("payload");

    let rendered = BarcodeRenderer::from_config(&QrMemoryConfig::default())
        .render_to_path(&record, &full, &path)
        .expect("render");
    assert_eq!(rendered.tier, Tier::Full);
    assert_eq!(rendered.version, 1);
    assert_eq!(read_record(&path).expect("record"), record);
}

/// When nothing fits, rendering fails loudly and writes no file.
#[test]
fn terminal_overflow_writes_nothing() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("overflow.png");
    let record = MemoryRecord::new()
        .with("consciousness_level", 123_456.75)
        .with("note", "x".repeat(200));
    let mut config = high_ec();
    config.barcode.max_version = Some(1);
    let full = Payload::build(&record, Some(6)).expect("payload");

    let err = BarcodeRenderer::from_config(&config)
        .render_to_path(&record, &full, &path)
        .unwrap_err();
    assert!(matches!(
        err,
        BarcodeError::CapacityOverflow {
            tier: Tier::Micro,
            ..
        }
    ));
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(temp.path()).expect("dir").count(), 0);
}
