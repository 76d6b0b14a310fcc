use anyhow::{Context, Result};
use chrono::NaiveDate;
use counselcal_core::Reconciler;
use counselcal_core::query::{self, ScheduleFilter};
use counselcal_core::remote::Remote;

use crate::render;

pub async fn run(
    reconciler: &Reconciler<Remote>,
    date: Option<&str>,
    counselor: Option<String>,
) -> Result<()> {
    reconciler.refresh().await?;

    let filter = ScheduleFilter {
        counselor,
        ..Default::default()
    };
    let records = filter.apply(&reconciler.snapshot());

    // Default to the week of the most recent schedule, like the original UI's
    // initial navigation; fall back to today when the store is empty.
    let anchor = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{raw}', expected YYYY-MM-DD"))?,
        None => query::most_recent_date(&records)
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
    };

    println!("{}", render::week_view(&records, query::week_start(anchor)));
    Ok(())
}
