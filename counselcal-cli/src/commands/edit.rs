use anyhow::Result;
use counselcal_core::Reconciler;
use counselcal_core::record::SessionNumber;
use counselcal_core::remote::Remote;
use owo_colors::OwoColorize;

use crate::render;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    reconciler: &Reconciler<Remote>,
    id: &str,
    counselor: Option<String>,
    client: Option<String>,
    date: Option<String>,
    start: Option<String>,
    end: Option<String>,
    session: Option<u32>,
    terminated: bool,
) -> Result<()> {
    reconciler.refresh().await?;

    let mut record = reconciler
        .snapshot()
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| anyhow::anyhow!("Schedule '{}' not found", id))?;

    if let Some(counselor) = counselor {
        record.counselor = counselor;
    }
    if let Some(client) = client {
        record.client_name = client;
    }
    if let Some(date) = date {
        record.date = date;
    }
    if let Some(start) = start {
        record.start_time = start;
    }
    if let Some(end) = end {
        record.end_time = end;
    }
    if terminated {
        record.session_number = SessionNumber::Terminated;
    } else if let Some(session) = session {
        record.session_number = SessionNumber::Ordinal(session);
    }

    match reconciler.save(record).await {
        Ok(outcome) => {
            let saved = outcome.record;
            println!(
                "{} {} {} {}",
                "Updated".green(),
                saved.date,
                format!("{} - {}", saved.start_time, saved.end_time),
                saved.client_name,
            );
            if !outcome.refreshed {
                eprintln!("{}", render::stale_notice());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", render::failure_notice("Save"));
            Err(e.into())
        }
    }
}
