//! Export command handler: fetch a category, filter it by region
//! availability, and write the CSV.
//!
//! The stages run in strict sequence; any error is fatal and propagates to
//! `main`. There is no partial-output contract: a failure mid-write may
//! leave the destination incomplete.

use std::path::Path;

use dmx_core::AppConfig;
use dmx_scraper::{DetmirClient, FetchMode};

/// Runs the full fetch → filter → write pipeline for one category.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed, either fetch step
/// fails, a kept item fails validation, or the destination cannot be
/// written.
pub(crate) async fn run_export(
    config: &AppConfig,
    category: &str,
    out: &Path,
    regions: &[String],
) -> anyhow::Result<()> {
    let client = DetmirClient::with_base_url(
        &config.api_base_url,
        config.request_timeout_secs,
        &config.user_agent,
        FetchMode::parse(&config.fetch_mode),
    )
    .map_err(|e| anyhow::anyhow!("failed to build Detmir client: {e}"))?;

    tracing::info!(category, "fetching category listing");
    let raw_items = client.fetch_category(category).await?;
    let fetched = raw_items.len();

    let items = dmx_scraper::normalize_catalog(raw_items, regions)?;
    tracing::info!(
        fetched,
        kept = items.len(),
        regions = ?regions,
        "filtered catalog by offline availability"
    );

    dmx_export::write_catalog_file(&items, out)?;

    println!(
        "exported {} of {} \"{}\" products to {}",
        items.len(),
        fetched,
        category,
        out.display()
    );

    Ok(())
}
