//! Schedule record types.
//!
//! `ScheduleRecord` is the canonical in-store shape. `RawRecord` is the
//! loosely-typed shape the proxy returns: the spreadsheet may hand back ISO
//! timestamps, time-only serials, or numbers where strings are expected, so
//! every field that can vary is kept as a `serde_json::Value` until it has
//! been through the normalizer.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::normalize::{normalize_date, normalize_time};

/// A single counseling appointment slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub id: String,
    pub counselor: String,
    pub client_name: String,
    /// Canonical `YYYY-MM-DD`
    pub date: String,
    /// Canonical `HH:MM`
    pub start_time: String,
    /// Canonical `HH:MM`
    pub end_time: String,
    pub session_number: SessionNumber,
}

/// Session ordinal, or the sentinel marking the counseling relationship as closed.
///
/// Wire form: a JSON number for ordinals, the string `"terminated"` for the
/// sentinel. The backend has been observed sending `0` for terminated rows;
/// that decodes as `Terminated` too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionNumber {
    Ordinal(u32),
    Terminated,
}

impl SessionNumber {
    pub const TERMINATED: &'static str = "terminated";

    pub fn from_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => match n.as_u64() {
                Some(0) => SessionNumber::Terminated,
                Some(n) => SessionNumber::Ordinal(n.min(u64::from(u32::MAX)) as u32),
                None => SessionNumber::Ordinal(1),
            },
            serde_json::Value::String(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case(Self::TERMINATED) {
                    SessionNumber::Terminated
                } else {
                    match s.parse::<u32>() {
                        Ok(0) => SessionNumber::Terminated,
                        Ok(n) => SessionNumber::Ordinal(n),
                        Err(_) => SessionNumber::Ordinal(1),
                    }
                }
            }
            _ => SessionNumber::Ordinal(1),
        }
    }
}

impl Serialize for SessionNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SessionNumber::Ordinal(n) => serializer.serialize_u32(*n),
            SessionNumber::Terminated => serializer.serialize_str(Self::TERMINATED),
        }
    }
}

impl<'de> Deserialize<'de> for SessionNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(SessionNumber::from_value(&value))
    }
}

/// A record as returned by the proxy, before normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub counselor: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub date: serde_json::Value,
    #[serde(default)]
    pub start_time: serde_json::Value,
    #[serde(default)]
    pub end_time: serde_json::Value,
    #[serde(default)]
    pub session_number: serde_json::Value,
}

impl RawRecord {
    /// Convert to the canonical record, running every date/time field through
    /// the normalizer. This is the only path from the wire into the store.
    pub fn into_record(self, tz_offset_hours: i64) -> ScheduleRecord {
        ScheduleRecord {
            id: value_to_string(&self.id),
            counselor: self.counselor,
            client_name: self.client_name,
            date: normalize_date(&value_to_string(&self.date)),
            start_time: normalize_time(&value_to_string(&self.start_time), tz_offset_hours),
            end_time: normalize_time(&value_to_string(&self.end_time), tz_offset_hours),
            session_number: SessionNumber::from_value(&self.session_number),
        }
    }
}

/// Coerce a JSON scalar to a string; the sheet sometimes returns numeric ids.
fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_number_decodes_numbers_and_sentinel() {
        assert_eq!(SessionNumber::from_value(&json!(3)), SessionNumber::Ordinal(3));
        assert_eq!(SessionNumber::from_value(&json!(0)), SessionNumber::Terminated);
        assert_eq!(
            SessionNumber::from_value(&json!("terminated")),
            SessionNumber::Terminated
        );
        assert_eq!(SessionNumber::from_value(&json!("7")), SessionNumber::Ordinal(7));
        assert_eq!(SessionNumber::from_value(&json!("weekly")), SessionNumber::Ordinal(1));
        assert_eq!(SessionNumber::from_value(&json!(null)), SessionNumber::Ordinal(1));
    }

    #[test]
    fn test_session_number_wire_encoding() {
        assert_eq!(serde_json::to_value(SessionNumber::Ordinal(4)).unwrap(), json!(4));
        assert_eq!(
            serde_json::to_value(SessionNumber::Terminated).unwrap(),
            json!("terminated")
        );
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = ScheduleRecord {
            id: "1736000000000".into(),
            counselor: "Kim".into(),
            client_name: "Lee".into(),
            date: "2025-01-05".into(),
            start_time: "10:00".into(),
            end_time: "11:00".into(),
            session_number: SessionNumber::Ordinal(2),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "1736000000000",
                "counselor": "Kim",
                "clientName": "Lee",
                "date": "2025-01-05",
                "startTime": "10:00",
                "endTime": "11:00",
                "sessionNumber": 2,
            })
        );
    }

    #[test]
    fn test_raw_record_normalizes_sheet_values() {
        let raw: RawRecord = serde_json::from_value(json!({
            "id": 1736000000000u64,
            "counselor": "Kim",
            "clientName": "Lee",
            "date": "2025-12-30T00:00:00.000Z",
            "startTime": "1899-12-30T01:32:00.000Z",
            "endTime": "1899-12-30T02:32:00.000Z",
            "sessionNumber": "terminated",
        }))
        .unwrap();

        let record = raw.into_record(9);
        assert_eq!(record.id, "1736000000000");
        assert_eq!(record.date, "2025-12-30");
        assert_eq!(record.start_time, "10:32");
        assert_eq!(record.end_time, "11:32");
        assert_eq!(record.session_number, SessionNumber::Terminated);
    }

    #[test]
    fn test_raw_record_tolerates_missing_fields() {
        let raw: RawRecord = serde_json::from_value(json!({ "counselor": "Kim" })).unwrap();
        let record = raw.into_record(9);
        assert_eq!(record.id, "");
        assert_eq!(record.date, "");
        assert_eq!(record.session_number, SessionNumber::Ordinal(1));
    }
}
