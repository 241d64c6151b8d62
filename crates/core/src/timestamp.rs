//! Chromium long-date timestamp codec
//!
//! Bookmark timestamps are stored as microseconds since 1601-01-01 UTC
//! (the Windows FILETIME epoch). Decoding subtracts the offset between that
//! epoch and the Unix epoch; values that land before 1970 are treated as absent.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;
use std::fmt;

/// Seconds between 1601-01-01 and 1970-01-01 (2^8 * 3^3 * 5^2 * 79 * 853)
pub const EPOCH_OFFSET_SECS: i64 = 11_644_473_600;

const MICROS_PER_SEC: i64 = 1_000_000;
const EPOCH_OFFSET_MICROS: i64 = EPOCH_OFFSET_SECS * MICROS_PER_SEC;

/// Decode a long-date value into a UTC calendar time
///
/// Returns `None` for zero and for anything that falls before the Unix epoch.
pub fn decode(value: i64) -> Option<DateTime<Utc>> {
    if value == 0 {
        return None;
    }
    let unix_micros = value.checked_sub(EPOCH_OFFSET_MICROS)?;
    if unix_micros < 0 {
        return None;
    }
    Utc.timestamp_micros(unix_micros).single()
}

/// Encode a UTC calendar time as a long-date value
pub fn encode(time: &DateTime<Utc>) -> i64 {
    time.timestamp_micros() + EPOCH_OFFSET_MICROS
}

/// Long-date value for the current instant
pub fn now() -> i64 {
    encode(&Utc::now())
}

/// Long-date value for midnight UTC of the given calendar day
///
/// Returns `None` when the date does not exist.
pub fn encode_date(year: i32, month: u32, day: u32) -> Option<i64> {
    let midnight = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    Some(encode(&Utc.from_utc_datetime(&midnight)))
}

/// An integer field exactly as it was read from the document
///
/// Chromium writes ids and timestamps as decimal strings, older tools wrote
/// JSON numbers. Keeping the raw value makes record projection lossless;
/// numeric access goes through [`LongValue::as_i64`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongValue(Value);

impl LongValue {
    /// Wrap a raw JSON value; only numbers and strings qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(_) | Value::String(_) => Some(Self(value.clone())),
            _ => None,
        }
    }

    /// Build a value in the Chromium string form.
    pub fn from_i64(value: i64) -> Self {
        Self(Value::String(value.to_string()))
    }

    /// Numeric view; `None` when the raw value is not an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match &self.0 {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Decode as a long-date timestamp.
    pub fn decode(&self) -> Option<DateTime<Utc>> {
        self.as_i64().and_then(decode)
    }

    /// Raw JSON value, as read.
    pub fn to_value(&self) -> Value {
        self.0.clone()
    }

    /// Canonical text used for identity comparisons (`"42"` and `42` agree).
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl From<i64> for LongValue {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl fmt::Display for LongValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}
