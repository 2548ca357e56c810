//! One-shot refresh mode
//!
//! Runs the refresh pipeline once against the configured sources and
//! exits, for use from cron or deployment hooks.

use anyhow::Result;
use tracing::info;

use crate::config::StaticConfig;
use crate::runtime::lifetime;

pub async fn run_refresh_once(config: &StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(config).await?;

    let outcome = startup.refresh_service.refresh().await?;
    let status = startup.country_service.get_status().await?;

    info!(
        "Refresh complete: {} stored, {} skipped, {} rows in table",
        outcome.stored, outcome.skipped, status.total_countries
    );
    println!(
        "Database refresh successful: {} countries stored, {} skipped",
        outcome.stored, outcome.skipped
    );

    lifetime::shutdown::close_resources(startup.storage.get_db().clone()).await;
    Ok(())
}
