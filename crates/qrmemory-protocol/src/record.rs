//! Key/value record handed to the persistence pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// JSON-compatible key/value record.
///
/// Keys are held in sorted order, so two records with the same entries always
/// serialize to the same text. Records are built once and then only read; there
/// is no in-place mutation API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryRecord(Map<String, Value>);

impl MemoryRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of the record with one more entry.
    ///
    /// Values go through `serde_json::Value`, which has no NaN or infinity:
    /// a non-finite `f64` becomes `null` here. Use [`MemoryRecord::with_f64`]
    /// when the float may be non-finite.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Like [`MemoryRecord::with`] for a float, or None when it is NaN or
    /// infinite.
    pub fn with_f64(self, key: impl Into<String>, value: f64) -> Option<Self> {
        let number = Number::from_f64(value)?;
        Some(self.with(key, Value::Number(number)))
    }

    /// Look up a top-level value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over top-level entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Top-level keys in key order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the record into its JSON object.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for MemoryRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<MemoryRecord> for Value {
    fn from(record: MemoryRecord) -> Self {
        Value::Object(record.0)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for MemoryRecord {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }
}
