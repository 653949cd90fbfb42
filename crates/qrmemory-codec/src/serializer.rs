//! Canonical JSON conversions for memory records.

use crate::error::CodecError;
use crate::finite::ensure_finite;
use qrmemory_protocol::MemoryRecord;
use serde::Serialize;
use serde_json::Value;

/// Convert any serializable value into a record.
///
/// Fails when the value is not a JSON object or cannot be represented as JSON
/// at all (for example a map with non-string keys, or a NaN or infinite
/// float). Decimal or binary fields must be converted to strings or floats by
/// the caller first.
pub fn to_record<T: Serialize + ?Sized>(value: &T) -> Result<MemoryRecord, CodecError> {
    ensure_finite(value).map_err(|err| CodecError::NonFinite(err.to_string()))?;
    let value = serde_json::to_value(value).map_err(CodecError::Serialize)?;
    record_from_value(value)
}

/// Accept a JSON value as a record when it is an object.
pub fn record_from_value(value: Value) -> Result<MemoryRecord, CodecError> {
    match value {
        Value::Object(map) => Ok(MemoryRecord::from(map)),
        other => Err(CodecError::NotAnObject(kind_name(&other))),
    }
}

/// Compact canonical JSON (sorted keys, no whitespace).
pub fn to_json(record: &MemoryRecord) -> Result<String, CodecError> {
    serde_json::to_string(record).map_err(CodecError::Serialize)
}

/// Pretty JSON with 2-space indentation, as written to sidecar files.
pub fn to_json_pretty(record: &MemoryRecord) -> Result<String, CodecError> {
    serde_json::to_string_pretty(record).map_err(CodecError::Serialize)
}

/// Parse JSON bytes back into a record.
pub fn parse_record(bytes: &[u8]) -> Result<MemoryRecord, CodecError> {
    let value: Value = serde_json::from_slice(bytes).map_err(CodecError::Parse)?;
    match value {
        Value::Object(map) => Ok(MemoryRecord::from(map)),
        other => Err(CodecError::Parse(serde::de::Error::custom(format!(
            "expected JSON object, got {}",
            kind_name(&other)
        )))),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_record, to_json, to_json_pretty, to_record};
    use crate::CodecError;
    use pretty_assertions::assert_eq;
    use qrmemory_protocol::{MemoryRecord, Stage};
    use serde::Serialize;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct Snapshot {
        consciousness_level: f64,
        generation: u32,
        domains: Vec<&'static str>,
    }

    #[test]
    fn to_record_accepts_structs() {
        let record = to_record(&Snapshot {
            consciousness_level: 25.0,
            generation: 3,
            domains: vec!["math", "physics"],
        })
        .expect("record");
        assert_eq!(record.get("generation"), Some(&json!(3)));
        assert_eq!(record.get("domains"), Some(&json!(["math", "physics"])));
    }

    #[test]
    fn to_record_rejects_non_objects() {
        let err = to_record(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, CodecError::NotAnObject("array")));
        assert_eq!(err.stage(), Stage::Serialize);
    }

    #[test]
    fn to_record_rejects_non_string_keys() {
        let mut map = HashMap::new();
        map.insert((1, 2), "pair");
        let err = to_record(&map).unwrap_err();
        assert!(matches!(err, CodecError::Serialize(_)));
    }

    #[derive(Serialize)]
    struct Reading {
        level: f64,
    }

    #[test]
    fn to_record_rejects_non_finite_floats() {
        for level in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = to_record(&Reading { level }).unwrap_err();
            assert!(matches!(err, CodecError::NonFinite(_)));
            assert_eq!(err.stage(), Stage::Serialize);
            assert!(err.to_string().contains("at level"));
        }
        let nested = json!({ "ok": [1.0, 2.5] });
        assert!(to_record(&nested).is_ok());
    }

    #[test]
    fn compact_json_is_canonical() {
        let a = MemoryRecord::new().with("b", 2).with("a", json!({ "z": 1, "y": 2 }));
        let b = MemoryRecord::new().with("a", json!({ "y": 2, "z": 1 })).with("b", 2);
        assert_eq!(to_json(&a).expect("a"), to_json(&b).expect("b"));
        assert_eq!(to_json(&a).expect("a"), r#"{"a":{"y":2,"z":1},"b":2}"#);
    }

    #[test]
    fn pretty_json_uses_two_space_indent() {
        let record = MemoryRecord::new().with("phi", 1.618);
        assert_eq!(to_json_pretty(&record).expect("json"), "{\n  \"phi\": 1.618\n}");
    }

    #[test]
    fn empty_record_serializes() {
        assert_eq!(to_json(&MemoryRecord::new()).expect("json"), "{}");
        assert_eq!(parse_record(b"{}").expect("record"), MemoryRecord::new());
    }

    #[test]
    fn parse_record_rejects_arrays_and_garbage() {
        let err = parse_record(b"[1]").unwrap_err();
        assert_eq!(err.stage(), Stage::Parse);
        assert!(err.to_string().contains("expected JSON object"));
        assert!(matches!(parse_record(b"{oops"), Err(CodecError::Parse(_))));
    }
}
