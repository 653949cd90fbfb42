//! Summary and micro payloads used when a record overflows a QR symbol.
//!
//! Reduction never invents data: summaries keep a handful of top-level keys
//! with rounded numbers, shortened strings, and collections replaced by their
//! length; micro payloads keep one or two numeric fields rounded to integers,
//! or the first strings when there are no numbers. Each reduced payload must
//! encode strictly shorter than the payload it replaces, so keys are dropped
//! from the end until that holds. At least one key is always kept from a
//! non-empty record; a tier that cannot get shorter with one key is skipped.

use log::debug;
use qrmemory_codec::{CodecError, Payload};
use qrmemory_config::DegradeConfig;
use qrmemory_protocol::{MemoryRecord, Tier};
use serde_json::{Number, Value};

/// Characters kept from strings in micro payloads.
const MICRO_STRING_CHARS: usize = 8;

/// A reduced record and the payload it encodes to.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduced {
    pub tier: Tier,
    pub record: MemoryRecord,
    pub payload: Payload,
}

/// Builds fallback payloads from the degrade config.
#[derive(Debug, Clone, Default)]
pub struct DegradePolicy {
    config: DegradeConfig,
}

impl DegradePolicy {
    pub fn new(config: DegradeConfig) -> Self {
        Self { config }
    }

    /// Reduce `record` to `tier`, encoding strictly shorter than `limit` chars.
    ///
    /// Returns None when even an empty reduction is not shorter than `limit`,
    /// or when asked for the full tier.
    pub fn reduce(
        &self,
        record: &MemoryRecord,
        tier: Tier,
        limit: usize,
    ) -> Result<Option<Reduced>, CodecError> {
        let entries = match tier {
            Tier::Full => return Ok(None),
            Tier::Summary => self.summary_entries(record),
            Tier::Micro => self.micro_entries(record),
        };
        let reduced = shrink_below(tier, &entries, limit)?;
        match &reduced {
            Some(reduced) => debug!(
                "reduced record (tier={}, keys={}/{}, chars={}, limit={})",
                tier,
                reduced.record.len(),
                record.len(),
                reduced.payload.encoded_len(),
                limit
            ),
            None => debug!("tier cannot shrink below limit (tier={tier}, limit={limit})"),
        }
        Ok(reduced)
    }

    /// Summary of a record, before any length constraint.
    pub fn summarize(&self, record: &MemoryRecord) -> MemoryRecord {
        self.summary_entries(record).into_iter().collect()
    }

    /// Micro payload of a record, before any length constraint.
    pub fn micro(&self, record: &MemoryRecord) -> MemoryRecord {
        self.micro_entries(record).into_iter().collect()
    }

    fn summary_entries(&self, record: &MemoryRecord) -> Vec<(String, Value)> {
        let keys: Vec<&String> = if self.config.summary_keys.is_empty() {
            // Scalars carry the most information per byte, so they go first.
            let (scalars, collections): (Vec<_>, Vec<_>) = record
                .iter()
                .partition(|(_, value)| !matches!(value, Value::Array(_) | Value::Object(_)));
            scalars
                .into_iter()
                .chain(collections)
                .map(|(key, _)| key)
                .collect()
        } else {
            configured_keys(record, &self.config.summary_keys)
        };
        keys.into_iter()
            .take(self.config.summary_max_keys)
            .filter_map(|key| {
                let value = record.get(key)?;
                Some((key.clone(), self.summary_value(value)))
            })
            .collect()
    }

    fn summary_value(&self, value: &Value) -> Value {
        match value {
            Value::Number(number) => round_number(number, self.config.float_precision),
            Value::String(text) => {
                Value::String(text.chars().take(self.config.summary_string_chars).collect())
            }
            Value::Array(items) => Value::from(items.len()),
            Value::Object(map) => Value::from(map.len()),
            Value::Bool(_) | Value::Null => value.clone(),
        }
    }

    fn micro_entries(&self, record: &MemoryRecord) -> Vec<(String, Value)> {
        let keys: Vec<&String> = if self.config.micro_keys.is_empty() {
            micro_candidates(record)
        } else {
            configured_keys(record, &self.config.micro_keys)
        };
        keys.into_iter()
            .take(self.config.micro_max_keys)
            .filter_map(|key| {
                let value = record.get(key)?;
                Some((key.clone(), micro_value(value)))
            })
            .collect()
    }
}

/// Configured keys that exist in the record, in configured order.
fn configured_keys<'a>(record: &'a MemoryRecord, wanted: &[String]) -> Vec<&'a String> {
    wanted
        .iter()
        .filter_map(|key| record.keys().find(|candidate| *candidate == key))
        .collect()
}

/// Numeric fields, else strings, else whatever the record has.
fn micro_candidates(record: &MemoryRecord) -> Vec<&String> {
    let preferences: [fn(&Value) -> bool; 3] = [
        |value| matches!(value, Value::Number(_) | Value::Bool(_)),
        |value| matches!(value, Value::String(_)),
        |_| true,
    ];
    preferences
        .iter()
        .map(|accepts| {
            record
                .iter()
                .filter(|(_, value)| accepts(value))
                .map(|(key, _)| key)
                .collect::<Vec<_>>()
        })
        .find(|keys| !keys.is_empty())
        .unwrap_or_default()
}

fn micro_value(value: &Value) -> Value {
    match value {
        Value::Number(number) => round_number(number, 0),
        Value::String(text) => Value::String(text.chars().take(MICRO_STRING_CHARS).collect()),
        Value::Array(items) => Value::from(items.len()),
        Value::Object(map) => Value::from(map.len()),
        Value::Bool(_) | Value::Null => value.clone(),
    }
}

/// Round floats to `digits` decimals; zero digits yields an integer.
fn round_number(number: &Number, digits: u32) -> Value {
    if number.is_i64() || number.is_u64() {
        return Value::Number(number.clone());
    }
    let Some(float) = number.as_f64() else {
        return Value::Number(number.clone());
    };
    if digits == 0 {
        let rounded = float.round();
        if rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
            return Value::from(rounded as i64);
        }
        return Number::from_f64(rounded).map_or(Value::Null, Value::Number);
    }
    let scale = 10f64.powi(digits.min(15) as i32);
    Number::from_f64((float * scale).round() / scale)
        .map_or_else(|| Value::Number(number.clone()), Value::Number)
}

/// Keep the longest prefix of `entries` whose payload encodes under `limit`.
fn shrink_below(
    tier: Tier,
    entries: &[(String, Value)],
    limit: usize,
) -> Result<Option<Reduced>, CodecError> {
    let floor = usize::from(!entries.is_empty());
    for keep in (floor..=entries.len()).rev() {
        let record: MemoryRecord = entries[..keep].iter().cloned().collect();
        let payload = Payload::compact(&record)?;
        if payload.encoded_len() < limit {
            return Ok(Some(Reduced {
                tier,
                record,
                payload,
            }));
        }
    }
    Ok(None)
}
