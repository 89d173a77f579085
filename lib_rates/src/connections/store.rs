//! # Rate Store Contract
//!
//! The store is an external collaborator: this crate only needs an overwrite
//! `put` and a two-key `batch_get`. Implementations decide how a date maps to
//! their own key space.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::error::RatesError;
use crate::markets::ecb::RateMap;

/// One stored day of rates, keyed by its UTC calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRateRecord {
    /// Primary key. Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Currency code → rate.
    pub rates: RateMap,
}

impl DailyRateRecord {
    /// Bundles a date and its rates.
    pub fn new(date: NaiveDate, rates: RateMap) -> Self {
        Self { date, rates }
    }

    /// The store key for this record's date.
    pub fn key(&self) -> String {
        self.date.to_string()
    }
}

/// Date-keyed persistence for [`DailyRateRecord`]s.
#[async_trait]
pub trait RateStore: Send + Sync {
    /// Writes `record`, replacing any existing record for the same date entirely.
    async fn put(&self, record: &DailyRateRecord) -> Result<(), RatesError>;

    /// Reads the records for `dates` in one round trip. Dates with no record are omitted.
    async fn batch_get(&self, dates: &[NaiveDate]) -> Result<Vec<DailyRateRecord>, RatesError>;
}
