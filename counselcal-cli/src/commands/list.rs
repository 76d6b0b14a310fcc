use anyhow::Result;
use counselcal_core::Reconciler;
use counselcal_core::query::ScheduleFilter;
use counselcal_core::remote::Remote;

use crate::render;

pub async fn run(
    reconciler: &Reconciler<Remote>,
    counselor: Option<String>,
    client: Option<String>,
    month: Option<String>,
    search: Option<String>,
) -> Result<()> {
    reconciler.refresh().await?;

    let filter = ScheduleFilter {
        counselor,
        client,
        month,
        search,
    };
    let records = filter.apply(&reconciler.snapshot());

    println!("{}", render::list_view(&records));
    Ok(())
}
