//! # Live Feed Runner
//!
//! Downloads the real daily feed, parses it and ingests it into an in-memory
//! store, then prints the stored record and the resulting report. Needs
//! network access, so it is a runner binary rather than a `cargo test` case.

#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Parser;

use lib_rates::ingestors::FeedSource;
use lib_rates::markets::ecb::ECB_DAILY_URL;
use lib_rates::{EcbFeed, MemoryRateStore, RateIngestor, RateReporter, RatesSettings, parse_feed};

#[derive(Parser, Debug)]
#[command(about = "Fetch and parse the live ECB daily feed")]
struct Args {
    /// Feed URL to check.
    #[arg(long, default_value = ECB_DAILY_URL)]
    feed_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = RatesSettings {
        feed_url: Some(args.feed_url),
        ..Default::default()
    }
    .resolve()?;

    println!("--- Live feed check: {} ---", config.feed_url);

    // [Step 1] Raw fetch + parse
    let feed = Arc::new(EcbFeed::new(&config)?);
    let text = feed.fetch().await?;
    let parsed = parse_feed(&text);
    println!(
        "[Step 1] {} bytes, {} matches, {} rejected, {} currencies",
        text.len(),
        parsed.matches,
        parsed.rejected,
        parsed.rates.len()
    );
    if parsed.is_anomalous(&text) {
        bail!("feed returned content but no rates; the document layout may have changed");
    }

    // [Step 2] Full ingest into memory
    let store = MemoryRateStore::new();
    let envelope = RateIngestor::new(feed, Arc::new(store.clone())).ingest().await;
    println!("[Step 2] ingest -> {}", serde_json::to_string(&envelope)?);

    // [Step 3] Report (no yesterday in a fresh store, so every change is N/A)
    let envelope = RateReporter::new(Arc::new(store)).report().await;
    println!("[Step 3] report -> {}", serde_json::to_string_pretty(&envelope)?);

    println!("--- Live feed check passed ---");
    Ok(())
}
