//! Terminal projection of the schedule store.
//!
//! Renders the store snapshot as a grouped list or a Mon-Fri week grid using
//! owo_colors. Rendering only reads records; all mutation goes through the
//! reconciler.

use chrono::{Duration, NaiveDate};
use counselcal_core::query;
use counselcal_core::record::{ScheduleRecord, SessionNumber};
use owo_colors::OwoColorize;

/// Hour rows shown in the week grid.
pub const TIME_SLOTS: [&str; 14] = [
    "08:00", "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00",
    "18:00", "19:00", "20:00", "21:00",
];

const WEEKDAY_LABELS: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

const CELL_WIDTH: usize = 18;

/// The one failure notice shown for any remote error; transport details are
/// not distinguished in user messaging.
pub fn failure_notice(action: &str) -> String {
    format!("{action} failed. Check your network and try again.")
        .red()
        .to_string()
}

/// Notice for a save that succeeded but whose follow-up fetch failed; the
/// displayed data stays optimistic until the next refresh.
pub fn stale_notice() -> String {
    "Saved, but the follow-up refresh failed; shown data may be stale."
        .yellow()
        .to_string()
}

pub fn session_label(session: &SessionNumber) -> String {
    match session {
        SessionNumber::Ordinal(n) => format!("session {n}"),
        SessionNumber::Terminated => "terminated".to_string(),
    }
}

/// Grouped list view: dates descending, later times first within a date.
pub fn list_view(records: &[ScheduleRecord]) -> String {
    if records.is_empty() {
        return "   No schedules".dimmed().to_string();
    }

    let mut lines = Vec::new();
    for (date, group) in query::group_by_date(records) {
        lines.push(date.bold().to_string());
        for record in group {
            let session = match record.session_number {
                SessionNumber::Terminated => session_label(&record.session_number).red().to_string(),
                _ => session_label(&record.session_number),
            };
            lines.push(format!(
                "   {}  {} ({})  {}  {}",
                format!("{} - {}", record.start_time, record.end_time).cyan(),
                record.client_name,
                session,
                record.counselor.dimmed(),
                format!("[{}]", record.id).dimmed(),
            ));
        }
    }
    lines.join("\n")
}

/// Mon-Fri grid over the fixed hour slots.
pub fn week_view(records: &[ScheduleRecord], week_start: NaiveDate) -> String {
    let days: Vec<NaiveDate> = (0..5).map(|i| week_start + Duration::days(i)).collect();

    let mut lines = Vec::new();

    let mut header = format!("{:<7}", "");
    for (label, day) in WEEKDAY_LABELS.iter().zip(&days) {
        header.push_str(&format!(
            "{:<width$}",
            format!("{} {}", label, day.format("%m/%d")),
            width = CELL_WIDTH
        ));
    }
    lines.push(header.bold().to_string());

    for slot in TIME_SLOTS {
        let mut row = format!("{:<7}", slot);
        for day in &days {
            let date = day.format("%Y-%m-%d").to_string();
            let cell = query::for_slot(records, &date, slot)
                .iter()
                .map(|r| grid_cell(r))
                .collect::<Vec<_>>()
                .join(", ");
            row.push_str(&format!("{:<width$}", truncate(&cell, CELL_WIDTH - 1), width = CELL_WIDTH));
        }
        lines.push(row.trim_end().to_string());
    }

    lines.join("\n")
}

fn grid_cell(record: &ScheduleRecord) -> String {
    match record.session_number {
        SessionNumber::Terminated => format!("{} (end)", record.client_name),
        SessionNumber::Ordinal(n) => format!("{} #{}", record.client_name, n),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use counselcal_core::record::SessionNumber;

    fn make_record(id: &str, date: &str, start: &str) -> ScheduleRecord {
        ScheduleRecord {
            id: id.to_string(),
            counselor: "Kim".to_string(),
            client_name: "Lee".to_string(),
            date: date.to_string(),
            start_time: start.to_string(),
            end_time: "11:00".to_string(),
            session_number: SessionNumber::Ordinal(2),
        }
    }

    #[test]
    fn test_list_view_empty() {
        assert!(list_view(&[]).contains("No schedules"));
    }

    #[test]
    fn test_list_view_groups_by_date() {
        let records = vec![
            make_record("1", "2025-01-06", "10:00"),
            make_record("2", "2025-01-07", "09:00"),
        ];
        let out = list_view(&records);
        let jan7 = out.find("2025-01-07").unwrap();
        let jan6 = out.find("2025-01-06").unwrap();
        assert!(jan7 < jan6, "newer dates render first");
    }

    #[test]
    fn test_week_view_places_record_in_slot_row() {
        let records = vec![make_record("1", "2025-01-06", "10:00")];
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let out = week_view(&records, start);

        let slot_row = out.lines().find(|l| l.starts_with("10:00")).unwrap();
        assert!(slot_row.contains("Lee #2"));
        let other_row = out.lines().find(|l| l.starts_with("11:00")).unwrap();
        assert!(!other_row.contains("Lee"));
    }

    #[test]
    fn test_truncate_keeps_short_strings() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-much-longer-cell", 8).chars().count(), 8);
    }
}
