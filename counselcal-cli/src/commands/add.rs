use anyhow::Result;
use counselcal_core::Reconciler;
use counselcal_core::record::{ScheduleRecord, SessionNumber};
use counselcal_core::remote::Remote;
use owo_colors::OwoColorize;

use crate::render;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    reconciler: &Reconciler<Remote>,
    counselor: String,
    client: String,
    date: String,
    start: String,
    end: String,
    session: u32,
    terminated: bool,
) -> Result<()> {
    if counselor.trim().is_empty() {
        anyhow::bail!("Counselor must not be empty");
    }
    if client.trim().is_empty() {
        anyhow::bail!("Client must not be empty");
    }

    // Pull the current collection first so id generation sees every known id.
    reconciler.refresh().await?;

    let record = ScheduleRecord {
        id: String::new(),
        counselor,
        client_name: client,
        date,
        start_time: start,
        end_time: end,
        session_number: if terminated {
            SessionNumber::Terminated
        } else {
            SessionNumber::Ordinal(session)
        },
    };

    match reconciler.save(record).await {
        Ok(outcome) => {
            let saved = outcome.record;
            println!(
                "{} {} {} {} ({})",
                "Saved".green(),
                saved.date,
                format!("{} - {}", saved.start_time, saved.end_time),
                saved.client_name,
                render::session_label(&saved.session_number),
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
