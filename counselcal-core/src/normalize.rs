//! Canonicalization of spreadsheet date/time values.
//!
//! The Apps Script backend returns whatever the sheet happens to hold:
//! already-canonical strings, full ISO timestamps, or time-only serials
//! anchored at the sheet's zero date (1899-12-30). Every value entering the
//! store passes through here. Normalization is best-effort: unparseable input
//! is returned unchanged rather than failing the caller.

use chrono::{DateTime, Timelike};

use crate::constants::SHEET_EPOCH_DATE;

/// Normalize a raw date value to `YYYY-MM-DD`.
///
/// Canonical input passes through unchanged. ISO timestamps keep the part
/// before the `T` separator; the time component is discarded.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if is_canonical_date(raw) {
        return raw.to_string();
    }
    if let Some((date, _)) = raw.split_once('T') {
        if is_canonical_date(date) {
            return date.to_string();
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Normalize a raw time value to `HH:MM`.
///
/// Time-only serials (timestamps anchored at 1899-12-30) carry their clock in
/// UTC; `offset_hours` is added and the hour wraps modulo 24. Other timestamps
/// use their UTC clock fields verbatim.
pub fn normalize_time(raw: &str, offset_hours: i64) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if is_canonical_time(raw) {
        return raw.to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        let dt = dt.to_utc();
        let mut hours = i64::from(dt.hour());
        if raw.contains(SHEET_EPOCH_DATE) {
            hours = (hours + offset_hours).rem_euclid(24);
        }
        return format!("{:02}:{:02}", hours, dt.minute());
    }
    raw.to_string()
}

/// `YYYY-MM-DD`
fn is_canonical_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|&i| bytes[i].is_ascii_digit())
}

/// `HH:MM`
fn is_canonical_time(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit())
}
