use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use log::*;
use serde_json::{Map, Value};

use crate::BridgeError;

/// Some integrations wrap the sale one level down under this key.
pub const WRAPPER_KEY: &str = "rawSaleData";

/// Epoch values above this are taken to be milliseconds rather than seconds.
const EPOCH_MILLIS_THRESHOLD: f64 = 100_000_000_000.0;
/// 9999-12-31T23:59:59.999Z. Anything later (or before 1970) is not a plausible order timestamp.
const MAX_EPOCH_MILLIS: f64 = 253_402_300_799_999.0;

/// An untyped checkout event as delivered by the provider.
///
/// No field is guaranteed to exist or to have any particular type, so lookups return `None` for anything that is
/// missing, `null`, blank, or of a type that cannot be coerced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InboundEvent {
    fields: Map<String, Value>,
}

impl InboundEvent {
    pub fn from_slice(raw: &[u8]) -> Result<Self, BridgeError> {
        let value = serde_json::from_slice::<Value>(raw).map_err(|e| BridgeError::InvalidPayload(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, BridgeError> {
        let Value::Object(mut fields) = value else {
            return Err(BridgeError::InvalidPayload("The body is not a JSON object.".into()));
        };
        if let Some(Value::Object(inner)) = fields.remove(WRAPPER_KEY) {
            trace!("📨️ Unwrapping {WRAPPER_KEY}");
            return Ok(Self { fields: inner });
        }
        Ok(Self { fields })
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The first of `keys` holding a non-blank string or a non-zero number, as a trimmed string.
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|k| self.fields.get(*k).and_then(as_text))
    }

    /// The string stored under `key`, exactly as sent.
    pub fn raw_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// The first of `keys` holding a finite number, or a string that parses as one.
    pub fn number(&self, keys: &[&str]) -> Option<f64> {
        keys.iter().find_map(|k| self.fields.get(*k).and_then(as_number))
    }

    /// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (taken as UTC) and unix epochs in seconds or milliseconds.
    pub fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        let value = self.fields.get(key)?;
        let parsed = match value {
            Value::String(s) => parse_timestamp(s.trim()),
            Value::Number(_) => as_number(value).and_then(from_epoch),
            _ => None,
        };
        if parsed.is_none() && !value.is_null() {
            debug!("📨️ Ignoring unparseable timestamp in '{key}': {value}");
        }
        parsed
    }

    /// A nested object, e.g. a `trackingParameters` block.
    pub fn nested(&self, key: &str) -> Option<InboundEvent> {
        match self.fields.get(key) {
            Some(Value::Object(inner)) => Some(Self { fields: inner.clone() }),
            _ => None,
        }
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite()).and_then(from_epoch)
}

#[allow(clippy::cast_possible_truncation)]
fn from_epoch(value: f64) -> Option<DateTime<Utc>> {
    if !(0.0..=MAX_EPOCH_MILLIS).contains(&value) {
        return None;
    }
    if value >= EPOCH_MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(value as i64)
    } else {
        DateTime::from_timestamp(value as i64, 0)
    }
}
