//! Pure projections over the schedule collection.
//!
//! Filtering, search, grouping and week arithmetic for the list and grid
//! views. Nothing here mutates the store.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::record::ScheduleRecord;

/// Filters for the list view. Every field is optional; an empty filter
/// matches everything.
#[derive(Debug, Clone, Default)]
pub struct ScheduleFilter {
    pub counselor: Option<String>,
    pub client: Option<String>,
    /// `YYYY-MM` prefix
    pub month: Option<String>,
    /// Case-insensitive, hits date, counselor and client name
    pub search: Option<String>,
}

impl ScheduleFilter {
    pub fn is_empty(&self) -> bool {
        self.counselor.is_none()
            && self.client.is_none()
            && self.month.is_none()
            && self.search.is_none()
    }

    pub fn matches(&self, record: &ScheduleRecord) -> bool {
        if let Some(counselor) = &self.counselor {
            if record.counselor != *counselor {
                return false;
            }
        }
        if let Some(client) = &self.client {
            if record.client_name != *client {
                return false;
            }
        }
        if let Some(month) = &self.month {
            if !record.date.starts_with(month.as_str()) {
                return false;
            }
        }
        if let Some(query) = &self.search {
            let query = query.to_lowercase();
            let hit = record.date.contains(&query)
                || record.counselor.to_lowercase().contains(&query)
                || record.client_name.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, records: &[ScheduleRecord]) -> Vec<ScheduleRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

/// Sorted distinct counselor names, for filter menus.
pub fn counselors(records: &[ScheduleRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.counselor.clone()))
}

/// Sorted distinct client names.
pub fn clients(records: &[ScheduleRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.client_name.clone()))
}

/// Distinct `YYYY-MM` months present, most recent first.
pub fn months(records: &[ScheduleRecord]) -> Vec<String> {
    let mut months = distinct(
        records
            .iter()
            .filter_map(|r| r.date.get(..7))
            .map(str::to_string),
    );
    months.reverse();
    months
}

fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut values: Vec<String> = values.collect();
    values.sort();
    values.dedup();
    values
}

/// Records grouped by date for the list view: dates descending, each group
/// sorted by start time descending.
pub fn group_by_date(records: &[ScheduleRecord]) -> Vec<(String, Vec<ScheduleRecord>)> {
    let mut grouped: BTreeMap<String, Vec<ScheduleRecord>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(record.date.clone())
            .or_default()
            .push(record.clone());
    }

    grouped
        .into_iter()
        .rev()
        .map(|(date, mut group)| {
            group.sort_by(|a, b| b.start_time.cmp(&a.start_time));
            (date, group)
        })
        .collect()
}

/// Records occupying one week-grid cell (exact date and start-time match).
pub fn for_slot<'a>(
    records: &'a [ScheduleRecord],
    date: &str,
    time: &str,
) -> Vec<&'a ScheduleRecord> {
    records
        .iter()
        .filter(|r| r.date == date && r.start_time == time)
        .collect()
}

/// The Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The latest schedule date, used as the initial navigation target.
pub fn most_recent_date(records: &[ScheduleRecord]) -> Option<NaiveDate> {
    records
        .iter()
        .filter_map(|r| NaiveDate::parse_from_str(&r.date, "%Y-%m-%d").ok())
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SessionNumber;

    fn make_record(id: &str, counselor: &str, client: &str, date: &str, start: &str) -> ScheduleRecord {
        ScheduleRecord {
            id: id.to_string(),
            counselor: counselor.to_string(),
            client_name: client.to_string(),
            date: date.to_string(),
            start_time: start.to_string(),
            end_time: "23:00".to_string(),
            session_number: SessionNumber::Ordinal(1),
        }
    }

    fn sample() -> Vec<ScheduleRecord> {
        vec![
            make_record("1", "Kim", "Lee", "2025-01-06", "10:00"),
            make_record("2", "Kim", "Park", "2025-01-06", "14:00"),
            make_record("3", "Choi", "Lee", "2025-02-03", "09:00"),
        ]
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = ScheduleFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&sample()).len(), 3);
    }

    #[test]
    fn test_counselor_and_month_filters() {
        let filter = ScheduleFilter {
            counselor: Some("Kim".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&sample()).len(), 2);

        let filter = ScheduleFilter {
            month: Some("2025-02".to_string()),
            ..Default::default()
        };
        let hits = filter.apply(&sample());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "3");
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let filter = ScheduleFilter {
            search: Some("LEE".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&sample()).len(), 2);

        let filter = ScheduleFilter {
            search: Some("2025-01".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&sample()).len(), 2);
    }

    #[test]
    fn test_distinct_menus() {
        let records = sample();
        assert_eq!(counselors(&records), vec!["Choi", "Kim"]);
        assert_eq!(clients(&records), vec!["Lee", "Park"]);
        assert_eq!(months(&records), vec!["2025-02", "2025-01"]);
    }

    #[test]
    fn test_group_by_date_orders_descending() {
        let groups = group_by_date(&sample());
        assert_eq!(groups[0].0, "2025-02-03");
        assert_eq!(groups[1].0, "2025-01-06");
        // Within a date, later start times first
        assert_eq!(groups[1].1[0].start_time, "14:00");
    }

    #[test]
    fn test_for_slot() {
        let records = sample();
        let cell = for_slot(&records, "2025-01-06", "10:00");
        assert_eq!(cell.len(), 1);
        assert_eq!(cell[0].id, "1");
        assert!(for_slot(&records, "2025-01-06", "11:00").is_empty());
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2025-01-08 is a Wednesday
        let wednesday = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
        assert_eq!(week_start(wednesday), NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        // Monday maps to itself
        let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert_eq!(week_start(monday), monday);
        // Sunday belongs to the week that started six days earlier
        let sunday = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();
        assert_eq!(week_start(sunday), monday);
    }

    #[test]
    fn test_most_recent_date_skips_unparseable() {
        let mut records = sample();
        records.push(make_record("4", "Kim", "Lee", "not-a-date", "10:00"));
        assert_eq!(
            most_recent_date(&records),
            NaiveDate::from_ymd_opt(2025, 2, 3)
        );
        assert_eq!(most_recent_date(&[]), None);
    }
}
