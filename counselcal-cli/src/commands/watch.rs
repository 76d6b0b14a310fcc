use std::time::Duration;

use anyhow::Result;
use counselcal_core::Reconciler;
use counselcal_core::query::{self, ScheduleFilter};
use counselcal_core::remote::Remote;
use owo_colors::OwoColorize;

use crate::render;

/// Periodic refresh loop: re-fetches on a fixed interval and redraws the week
/// view whenever the store revision changes. The reconciler's mutation gate
/// keeps these refreshes from clobbering an in-flight save or delete.
pub async fn run(
    reconciler: &Reconciler<Remote>,
    interval_secs: u64,
    counselor: Option<String>,
) -> Result<()> {
    let mut changes = reconciler.subscribe();
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = reconciler.refresh().await {
                    eprintln!("{}", format!("Refresh failed: {e}").red());
                }
            }
            result = changes.changed() => {
                if result.is_err() {
                    return Ok(());
                }
                redraw(reconciler, counselor.clone(), interval_secs);
            }
        }
    }
}

fn redraw(reconciler: &Reconciler<Remote>, counselor: Option<String>, interval_secs: u64) {
    let filter = ScheduleFilter {
        counselor,
        ..Default::default()
    };
    let records = filter.apply(&reconciler.snapshot());

    let anchor = query::most_recent_date(&records)
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    // Clear screen and move the cursor home before redrawing
    print!("\x1b[2J\x1b[H");
    println!("{}", render::week_view(&records, query::week_start(anchor)));
    println!();
    println!(
        "{}",
        format!("Refreshing every {interval_secs}s. Ctrl-C to quit.").dimmed()
    );
}
