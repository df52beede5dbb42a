//! Timestamp utilities
//!
//! Records are stamped in UTC and stored as RFC 3339 with microsecond
//! precision. Older files carry naive ISO-8601 stamps with no offset; those
//! are read back as UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::{Error, Result};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Format a timestamp for persistence
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a persisted timestamp
///
/// Accepts RFC 3339 (any offset, normalized to UTC) and naive
/// `YYYY-MM-DDTHH:MM:SS[.ffffff]` stamps.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::InvalidInput(format!("Invalid timestamp '{}': {}", raw, e)))
}
