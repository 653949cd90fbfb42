//! Tests for config loading and validation.

use super::*;
use crate::{ErrorCorrection, NamingScheme};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

/// An empty document yields the defaults.
#[test]
fn parse_minimal_config() {
    let config = QrMemoryConfig::load_from_str("{}").expect("config");
    assert_eq!(config, QrMemoryConfig::default());
    assert_eq!(config.payload.level(), Some(6));
    assert_eq!(config.barcode.version_limit(), MAX_QR_VERSION);
    assert_eq!(config.sidecar.naming, NamingScheme::Unique);
}

/// JSON5 syntax (comments, unquoted keys, trailing commas) is accepted.
#[test]
fn parse_json5_overrides() {
    let json5 = r#"{
        // write next to the caller's data
        sidecar: { dir: "memories", naming: "timestamp" },
        payload: { compress: false },
        barcode: { error_correction: "H", max_version: 10, },
        degrade: { summary_keys: ["consciousness_level", "timestamp"] },
    }"#;
    let config = QrMemoryConfig::load_from_str(json5).expect("config");
    assert_eq!(config.sidecar.resolved_dir(), PathBuf::from("memories"));
    assert_eq!(config.sidecar.naming, NamingScheme::Timestamp);
    assert_eq!(config.payload.level(), None);
    assert_eq!(config.barcode.error_correction, ErrorCorrection::H);
    assert_eq!(config.barcode.version_limit(), 10);
    assert_eq!(
        config.degrade.summary_keys,
        vec!["consciousness_level".to_string(), "timestamp".to_string()]
    );
}

/// Reject unexpected top-level config keys.
#[test]
fn rejects_unknown_top_level_key() {
    let err = QrMemoryConfig::load_from_str("{ unexpected: true }").unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("unknown key"));
    assert!(msg.contains("unexpected"));
}

/// Reject error-correction levels outside L/M/Q/H.
#[test]
fn rejects_invalid_error_correction() {
    let err = QrMemoryConfig::load_from_str(r#"{ barcode: { error_correction: "X" } }"#)
        .unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("barcode.error_correction"));
}

/// Versions beyond the QR standard fail validation.
#[test]
fn rejects_out_of_range_version() {
    let err = QrMemoryConfig::load_from_str("{ barcode: { max_version: 41 } }").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidField { ref path, .. } if path == "barcode.max_version"
    ));
}

/// Compression levels above 9 fail validation.
#[test]
fn rejects_compression_level_above_nine() {
    let err =
        QrMemoryConfig::load_from_str("{ payload: { compression_level: 12 } }").unwrap_err();
    assert!(format!("{err}").contains("payload.compression_level"));
}

/// Micro payloads cannot keep more keys than summaries.
#[test]
fn rejects_micro_larger_than_summary() {
    let err = QrMemoryConfig::load_from_str(
        "{ degrade: { summary_max_keys: 1, micro_max_keys: 2 } }",
    )
    .unwrap_err();
    assert!(format!("{err}").contains("degrade.micro_max_keys"));
}

/// Loading from disk goes through the same checks.
#[test]
fn load_from_path_reads_file() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join(DEFAULT_CONFIG_FILE);
    fs::write(&path, "{ barcode: { module_size: 4, quiet_zone: false } }").expect("write");

    let config = QrMemoryConfig::load_from_path(&path).expect("config");
    assert_eq!(config.barcode.module_size, 4);
    assert_eq!(config.barcode.quiet_zone, false);
}

/// Missing files surface as read failures.
#[test]
fn load_from_path_reports_missing_file() {
    let temp = TempDir::new().expect("tmp");
    let err = QrMemoryConfig::load_from_path(temp.path().join("absent.json5")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFailed(_)));
}

/// The builder produces configs that pass validation.
#[test]
fn builder_sets_fields() {
    let config = QrMemoryConfig::builder()
        .dir("out")
        .naming(NamingScheme::Timestamp)
        .error_correction(ErrorCorrection::Q)
        .build();
    config.validate().expect("valid");
    assert_eq!(config.sidecar.dir, Some(PathBuf::from("out")));
    assert_eq!(config.barcode.error_correction, ErrorCorrection::Q);
}
