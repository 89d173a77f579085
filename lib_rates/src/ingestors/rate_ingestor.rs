//! # Rate Ingestor
//!
//! A single linear pass, triggered by a scheduler or by hand:
//!
//! 1.  Fetch the feed (one GET, no retry unless configured on the feed client).
//! 2.  Parse it into a currency → rate mapping.
//! 3.  Key the record by the invocation's UTC date, not by any date inside the feed.
//! 4.  Write it, replacing whatever was stored for that date.
//!
//! Any failure is logged with its kind and collapsed into a generic 500 envelope.
//! The write is the last step, so a failure never leaves partial state behind.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::FeedSource;
use crate::connections::store::{DailyRateRecord, RateStore};
use crate::core::calendar::today_utc;
use crate::core::envelope::Envelope;
use crate::core::error::RatesError;
use crate::markets::ecb::feed_parser::parse_feed;

/// Message returned on a successful ingest.
pub const INGEST_OK: &str = "Exchange rates fetched and stored successfully.";
/// Message returned on any ingest failure.
pub const INGEST_FAILED: &str = "Failed to fetch exchange rates.";

/// What a successful ingest wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    /// The record that was stored.
    pub record: DailyRateRecord,
    /// Pattern hits in the feed, duplicates included.
    pub matches: usize,
    /// Hits skipped because their numeral did not parse.
    pub rejected: usize,
}

/// Fetches, parses and stores one day of rates.
pub struct RateIngestor {
    feed: Arc<dyn FeedSource>,
    store: Arc<dyn RateStore>,
}

impl RateIngestor {
    /// Wires an ingestor to its feed and store.
    pub fn new(feed: Arc<dyn FeedSource>, store: Arc<dyn RateStore>) -> Self {
        Self { feed, store }
    }

    /// Ingests for the current UTC date.
    pub async fn ingest(&self) -> Envelope {
        self.ingest_on(today_utc()).await
    }

    /// Ingests and keys the record under `date`.
    pub async fn ingest_on(&self, date: NaiveDate) -> Envelope {
        match self.try_ingest_on(date).await {
            Ok(_) => Envelope::message(INGEST_OK),
            Err(e) => {
                error!(kind = e.kind(), error = %e, date = %date, "error fetching exchange rates");
                Envelope::failure(INGEST_FAILED)
            }
        }
    }

    /// The typed form of [`ingest_on`](Self::ingest_on).
    pub async fn try_ingest_on(&self, date: NaiveDate) -> Result<IngestOutcome, RatesError> {
        let text = self.feed.fetch().await?;
        let parsed = parse_feed(&text);

        if parsed.is_anomalous(&text) {
            warn!(bytes = text.len(), date = %date, "feed had content but no rates; storing an empty record");
        }
        if parsed.rejected > 0 {
            warn!(rejected = parsed.rejected, "feed contained rates with no numeric value");
        }

        let record = DailyRateRecord::new(date, parsed.rates);
        self.store.put(&record).await?;

        info!(date = %date, currencies = record.rates.len(), "exchange rates stored");
        Ok(IngestOutcome {
            record,
            matches: parsed.matches,
            rejected: parsed.rejected,
        })
    }
}
