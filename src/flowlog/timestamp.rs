use chrono::{TimeZone, Utc};
use tracing::warn;

/// Convert epoch seconds to RFC 3339 text in UTC.
///
/// Out-of-range values are not an error for the record stream; they yield
/// `None` and a warning, and the caller emits a null timestamp.
pub fn from_epoch(secs: i64) -> Option<String> {
    match Utc.timestamp_opt(secs, 0).single() {
        Some(dt) => Some(dt.to_rfc3339()),
        None => {
            warn!(epoch = secs, "Unix timestamp out of range");
            None
        }
    }
}

/// Normalize a raw tuple timestamp segment.
///
/// An all-digit segment takes the epoch path; anything else passes through
/// unchanged with no validation. The digit check alone decides the path, so
/// signed or fractional numeric strings are treated as text.
pub fn normalize(raw: &str) -> Option<String> {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        match raw.parse::<i64>() {
            Ok(secs) => from_epoch(secs),
            Err(_) => {
                warn!(value = %raw, "Numeric timestamp does not fit in an i64");
                None
            }
        }
    } else {
        Some(raw.to_string())
    }
}
