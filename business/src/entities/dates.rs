//! Lenient timestamp fields.
//!
//! The backend is not consistent about date shapes, so every timestamp field
//! goes through [`deserialize`]: known shapes become UTC instants, anything
//! else becomes `None` and is logged once at ingestion.

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize as _, Deserializer};
use serde_json::Value;

use crate::table::parse_datetime;

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => {
            let parsed = parse_datetime(&text);
            if parsed.is_none() {
                warn!("unparseable date `{text}`, treating as missing");
            }
            parsed
        }
        Value::Number(number) => {
            let parsed = number
                .as_i64()
                .or_else(|| whole_millis(number.as_f64()?))
                .and_then(DateTime::from_timestamp_millis);
            if parsed.is_none() {
                warn!("timestamp {number} is out of range, treating as missing");
            }
            parsed
        }
        other => {
            warn!("unexpected date value `{other}`, treating as missing");
            None
        }
    })
}

/// Epoch millis sent as a float; the fraction is dropped.
fn whole_millis(millis: f64) -> Option<i64> {
    (millis.is_finite() && millis.abs() < 9.0e15).then(|| millis.trunc() as i64)
}
