//! # One-Shot Rates Trigger
//!
//! Runs a single `ingest` or `report` and prints the `{statusCode, body}`
//! envelope as JSON on stdout. Meant for external schedulers (cron, CI, a
//! function runtime). Exits non-zero when the envelope is a failure.

#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use lib_rates::loggers::setup_logging;
use lib_rates::{EcbFeed, RateIngestor, RateReporter, connect_store};
use servers::rates_logic::config::{OnceCli, Operation, load_config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = OnceCli::parse();
    let config = load_config(cli.config)?;
    let guard = setup_logging(&config.logging_options("rates_once")).context("failed to initialize logging")?;

    let rates_config = config.rates_settings().resolve()?;
    let store = connect_store(&rates_config).await?;

    let envelope = match cli.operation {
        Operation::Ingest => {
            let feed = Arc::new(EcbFeed::new(&rates_config)?);
            RateIngestor::new(feed, store).ingest().await
        }
        Operation::Report => RateReporter::new(store).report().await,
    };

    println!("{}", serde_json::to_string_pretty(&envelope)?);

    if !envelope.is_success() {
        // Flush file logs before exiting
        drop(guard);
        std::process::exit(1);
    }
    Ok(())
}
