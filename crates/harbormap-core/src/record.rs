//! Raw record handling and timestamp normalization
//!
//! Records are the vendor's JSON objects, passed through untyped. The
//! catalog expects every timestamp-bearing field as a fixed-format
//! string, so the normalizer rewrites any RFC 3339 date-time found in a
//! record, at any nesting depth, to `YYYY-MM-DDTHH:MM:SS.ffffffZ`.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// A raw vendor record, as returned by a listing endpoint
pub type RawRecord = serde_json::Map<String, Value>;

/// The catalog's canonical timestamp format (microsecond precision, UTC)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Rewrite every RFC 3339 date-time in `value` to [`TIMESTAMP_FORMAT`].
///
/// Walks objects and arrays recursively and mutates in place. Scalars
/// that do not parse as a date-time pass through unchanged, so absent or
/// malformed fields are simply not matched. Idempotent: already
/// normalized strings still parse as RFC 3339 and re-format to
/// themselves.
pub fn normalize_timestamps(value: &mut Value) {
    match value {
        Value::String(s) => {
            if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
                *s = format_timestamp(&ts.with_timezone(&Utc));
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                normalize_timestamps(item);
            }
        }
        Value::Object(map) => {
            for (_, v) in map.iter_mut() {
                normalize_timestamps(v);
            }
        }
        _ => {}
    }
}

/// Normalize every field of a single record
pub fn normalize_record(record: &mut RawRecord) {
    for (_, v) in record.iter_mut() {
        normalize_timestamps(v);
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
