use anyhow::Result;
use counselcal_core::Reconciler;
use counselcal_core::remote::Remote;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::render;

pub async fn run(reconciler: &Reconciler<Remote>, id: &str, yes: bool) -> Result<()> {
    reconciler.refresh().await?;

    let record = reconciler
        .snapshot()
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| anyhow::anyhow!("Schedule '{}' not found", id))?;

    if !yes {
        let prompt = format!(
            "Delete {} {} for {}?",
            record.date, record.start_time, record.client_name
        );
        if !Confirm::new().with_prompt(prompt).default(false).interact()? {
            println!("Cancelled");
            return Ok(());
        }
    }

    match reconciler.delete(id).await {
        Ok(()) => {
            println!("{}", "Deleted".green());
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", render::failure_notice("Delete"));
            Err(e.into())
        }
    }
}
