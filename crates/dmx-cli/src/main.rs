use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod export;
#[cfg(test)]
mod tests;

#[derive(Debug, Parser)]
#[command(name = "dmx-cli")]
#[command(about = "Export a Detmir category catalog to CSV")]
struct Cli {
    /// Category alias to export, e.g. "lego".
    category: String,

    /// Output CSV path. Overwritten if it already exists.
    #[arg(long, default_value = "result.csv")]
    out: PathBuf,

    /// Region ISO codes a product must be available in offline. Repeat the
    /// flag to supply several.
    #[arg(
        long = "region",
        value_name = "ISO_CODE",
        default_values_t = [String::from("RU-MOW"), String::from("RU-SPE")]
    )]
    regions: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = dmx_core::load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    export::run_export(&config, &cli.category, &cli.out, &cli.regions).await
}
