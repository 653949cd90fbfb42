//! Serializer -> compressor -> encoder chains as callers use them.

use pretty_assertions::assert_eq;
use qrmemory_codec::{Payload, compressor, encoder, to_json, to_record};
use qrmemory_protocol::MemoryRecord;
use serde_json::json;

/// Encoding the same record twice gives identical barcode text.
#[test]
fn payload_text_is_stable() {
    let record = MemoryRecord::new()
        .with("timestamp", 1_755_234_461_u64)
        .with("consciousness_level", 25.0)
        .with("destruction_results", json!({ "a": 1, "b": 2 }));
    let first = Payload::build(&record, Some(6)).expect("first").encode();
    let second = Payload::build(&record, Some(6)).expect("second").encode();
    assert_eq!(first, second);
}

/// The manual chain matches what `Payload` produces.
#[test]
fn manual_chain_matches_payload() {
    let record = to_record(&json!({ "phi": 1.618, "generation": 7 })).expect("record");
    let json = to_json(&record).expect("json");
    let manual = encoder::encode(&compressor::compress(json.as_bytes(), 6).expect("zlib"));
    assert_eq!(
        manual,
        Payload::compressed(&record, 6).expect("payload").encode()
    );
}

/// An empty record survives every stage.
#[test]
fn empty_record_passes_all_stages() {
    let record = MemoryRecord::new();
    for level in [None, Some(0), Some(9)] {
        let text = Payload::build(&record, level).expect("build").encode();
        assert!(!text.is_empty());
        let back = Payload::from_encoded(&text)
            .expect("decode")
            .to_record()
            .expect("record");
        assert_eq!(back, record);
    }
}

/// Integers and floats come back as the same JSON numbers.
#[test]
fn numeric_types_survive_payload_round_trip() {
    let record = MemoryRecord::new()
        .with("int", -7)
        .with("big", u64::MAX)
        .with("float", 0.1);
    let text = Payload::raw(&record).expect("raw").encode();
    let back = Payload::from_encoded(&text)
        .expect("decode")
        .to_record()
        .expect("record");
    assert_eq!(back, record);
}
