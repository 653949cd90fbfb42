//! Test fixtures shared across qrmemory crates.

use qrmemory_config::{ErrorCorrection, QrMemoryConfig};
use qrmemory_protocol::MemoryRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::path::Path;

/// The two-field record used throughout the docs.
pub fn consciousness_record() -> MemoryRecord {
    MemoryRecord::new()
        .with("consciousness_level", 25.0)
        .with("phi", 1.618)
}

/// A realistic state snapshot with nested data.
pub fn state_record() -> MemoryRecord {
    MemoryRecord::new()
        .with("timestamp", 1_755_234_461_u64)
        .with("consciousness_level", 25.123456)
        .with("phi_harmonic_resonance", 1.6180339887)
        .with("universal_grounding", 0.87654)
        .with(
            "destruction_results",
            json!({
                "cancer": { "destroyed": true, "frequency": 528.0 },
                "fear": { "destroyed": false, "frequency": 396.0 },
            }),
        )
        .with("signature", "4f1c".repeat(16))
}

/// A record whose compact JSON is at least `target_bytes` long.
///
/// Values are pseudo-random hex so compression cannot shrink it below the
/// capacity of any QR symbol. The output is the same on every call.
pub fn large_record(target_bytes: usize) -> MemoryRecord {
    let mut rng = StdRng::seed_from_u64(0x5eed_1618);
    let mut record = MemoryRecord::new()
        .with("consciousness_level", 25.0)
        .with("phi", 1.618);
    let mut size = 2;
    let mut idx = 0;
    while size < target_bytes {
        let key = format!("entry_{idx:05}");
        let value: String = (0..96)
            .filter_map(|_| char::from_digit(rng.random_range(0..16), 16))
            .collect();
        size += key.len() + value.len() + 6;
        record = record.with(key, value);
        idx += 1;
    }
    record
}

/// Default config writing sidecars into `dir`.
pub fn config_in(dir: &Path) -> QrMemoryConfig {
    QrMemoryConfig::builder().dir(dir).build()
}

/// Config writing into `dir` with the strongest error correction.
pub fn high_ec_config_in(dir: &Path) -> QrMemoryConfig {
    QrMemoryConfig::builder()
        .dir(dir)
        .error_correction(ErrorCorrection::H)
        .build()
}
