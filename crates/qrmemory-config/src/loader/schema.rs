//! Schema validation helpers for qrmemory JSON5 configuration.

use crate::ConfigError;
use serde_json::{Map, Value};

/// Validate a raw config value against the schema.
pub(super) fn validate_schema(value: &Value, label: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, label, "")?;
    ensure_allowed_keys(
        map,
        &["$schema", "sidecar", "payload", "barcode", "degrade"],
        label,
        "",
    )?;

    if let Some(value) = map.get("$schema") {
        expect_string(value, label, "$schema")?;
    }
    if let Some(value) = map.get("sidecar") {
        validate_sidecar(value, label, "sidecar")?;
    }
    if let Some(value) = map.get("payload") {
        validate_payload(value, label, "payload")?;
    }
    if let Some(value) = map.get("barcode") {
        validate_barcode(value, label, "barcode")?;
    }
    if let Some(value) = map.get("degrade") {
        validate_degrade(value, label, "degrade")?;
    }
    Ok(())
}

/// Validate the "sidecar" block.
fn validate_sidecar(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, label, path)?;
    ensure_allowed_keys(map, &["dir", "naming"], label, path)?;
    if let Some(value) = map.get("dir") {
        expect_string(value, label, &join_path(path, "dir"))?;
    }
    if let Some(value) = map.get("naming") {
        expect_one_of(
            value,
            &["unique", "timestamp"],
            label,
            &join_path(path, "naming"),
        )?;
    }
    Ok(())
}

/// Validate the "payload" block.
fn validate_payload(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, label, path)?;
    ensure_allowed_keys(map, &["compress", "compression_level"], label, path)?;
    if let Some(value) = map.get("compress") {
        expect_bool(value, label, &join_path(path, "compress"))?;
    }
    if let Some(value) = map.get("compression_level") {
        expect_u64(value, label, &join_path(path, "compression_level"))?;
    }
    Ok(())
}

/// Validate the "barcode" block.
fn validate_barcode(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, label, path)?;
    ensure_allowed_keys(
        map,
        &["error_correction", "max_version", "module_size", "quiet_zone"],
        label,
        path,
    )?;
    if let Some(value) = map.get("error_correction") {
        expect_one_of(
            value,
            &["L", "M", "Q", "H"],
            label,
            &join_path(path, "error_correction"),
        )?;
    }
    if let Some(value) = map.get("max_version") {
        if !value.is_null() {
            expect_u64(value, label, &join_path(path, "max_version"))?;
        }
    }
    if let Some(value) = map.get("module_size") {
        expect_u64(value, label, &join_path(path, "module_size"))?;
    }
    if let Some(value) = map.get("quiet_zone") {
        expect_bool(value, label, &join_path(path, "quiet_zone"))?;
    }
    Ok(())
}

/// Validate the "degrade" block.
fn validate_degrade(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, label, path)?;
    ensure_allowed_keys(
        map,
        &[
            "summary_keys",
            "summary_max_keys",
            "summary_string_chars",
            "float_precision",
            "micro_keys",
            "micro_max_keys",
        ],
        label,
        path,
    )?;
    for key in ["summary_keys", "micro_keys"] {
        if let Some(value) = map.get(key) {
            validate_string_array(value, label, &join_path(path, key))?;
        }
    }
    for key in [
        "summary_max_keys",
        "summary_string_chars",
        "float_precision",
        "micro_max_keys",
    ] {
        if let Some(value) = map.get(key) {
            expect_u64(value, label, &join_path(path, key))?;
        }
    }
    Ok(())
}

fn expect_object<'a>(
    value: &'a Value,
    label: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    value
        .as_object()
        .ok_or_else(|| invalid_field(label, path, "expected object"))
}

fn expect_string(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_string() {
        Ok(())
    } else {
        Err(invalid_field(label, path, "expected string"))
    }
}

fn expect_bool(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_boolean() {
        Ok(())
    } else {
        Err(invalid_field(label, path, "expected boolean"))
    }
}

fn expect_u64(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_u64() {
        Ok(())
    } else {
        Err(invalid_field(label, path, "expected non-negative integer"))
    }
}

fn expect_one_of(
    value: &Value,
    allowed: &[&str],
    label: &str,
    path: &str,
) -> Result<(), ConfigError> {
    match value.as_str() {
        Some(text) if allowed.contains(&text) => Ok(()),
        _ => Err(invalid_field(
            label,
            path,
            &format!("expected one of: {}", allowed.join(", ")),
        )),
    }
}

fn validate_string_array(value: &Value, label: &str, path: &str) -> Result<(), ConfigError> {
    let Some(items) = value.as_array() else {
        return Err(invalid_field(label, path, "expected array"));
    };
    for (idx, item) in items.iter().enumerate() {
        expect_string(item, label, &format!("{path}[{idx}]"))?;
    }
    Ok(())
}

fn ensure_allowed_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    label: &str,
    path: &str,
) -> Result<(), ConfigError> {
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(invalid_field(label, &join_path(path, key), "unknown key"));
        }
    }
    Ok(())
}

/// Join nested paths for better error messages.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Build a structured invalid-field error.
fn invalid_field(label: &str, path: &str, message: &str) -> ConfigError {
    let normalized_path = if path.is_empty() { "root" } else { path };
    ConfigError::InvalidField {
        path: format!("{label}:{normalized_path}"),
        message: message.to_string(),
    }
}
