//! # In-Memory Rate Store
//!
//! A `HashMap` behind a `tokio` lock. Useful for local runs and tests; nothing
//! survives the process.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::store::{DailyRateRecord, RateStore};
use crate::core::error::RatesError;

/// Process-local [`RateStore`]. Cloning shares the same map.
#[derive(Clone, Default)]
pub struct MemoryRateStore {
    records: Arc<RwLock<HashMap<NaiveDate, DailyRateRecord>>>,
}

impl MemoryRateStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// True when nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// The record for `date`, if any.
    pub async fn get(&self, date: NaiveDate) -> Option<DailyRateRecord> {
        self.records.read().await.get(&date).cloned()
    }
}

#[async_trait]
impl RateStore for MemoryRateStore {
    async fn put(&self, record: &DailyRateRecord) -> Result<(), RatesError> {
        self.records.write().await.insert(record.date, record.clone());
        Ok(())
    }

    async fn batch_get(&self, dates: &[NaiveDate]) -> Result<Vec<DailyRateRecord>, RatesError> {
        let records = self.records.read().await;
        Ok(dates.iter().filter_map(|d| records.get(d).cloned()).collect())
    }
}
