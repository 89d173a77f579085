//! # Redis Rate Store
//!
//! Each record is one string key, `<table>:<YYYY-MM-DD>`, holding the record as
//! JSON. `SET` gives the overwrite semantics; `MGET` fetches both report dates
//! in a single round trip.

use async_trait::async_trait;
use chrono::NaiveDate;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::debug;

use super::store::{DailyRateRecord, RateStore};
use crate::core::error::RatesError;

/// Redis-backed [`RateStore`].
pub struct RedisRateStore {
    conn: ConnectionManager,
    table: String,
}

impl RedisRateStore {
    /// Connects to `url` and namespaces keys under `table`.
    ///
    /// # Arguments
    /// * `url` - The redis URL (e.g., "redis://127.0.0.1/").
    /// * `table` - Key prefix.
    pub async fn connect(url: &str, table: &str) -> Result<Self, RatesError> {
        let client = Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    fn key_for(&self, date: NaiveDate) -> String {
        format!("{}:{}", self.table, date)
    }
}

#[async_trait]
impl RateStore for RedisRateStore {
    async fn put(&self, record: &DailyRateRecord) -> Result<(), RatesError> {
        let payload = serde_json::to_string(record)?;
        let key = self.key_for(record.date);
        // ConnectionManager is a cheap handle over one multiplexed connection
        let mut conn = self.conn.clone();
        let _: () = conn.set(&key, payload).await?;
        debug!(key = %key, "record stored");
        Ok(())
    }

    async fn batch_get(&self, dates: &[NaiveDate]) -> Result<Vec<DailyRateRecord>, RatesError> {
        if dates.is_empty() {
            return Ok(Vec::new());
        }
        let keys: Vec<String> = dates.iter().map(|d| self.key_for(*d)).collect();
        let mut conn = self.conn.clone();
        let values: Vec<Option<String>> = conn.mget(&keys).await?;

        let mut records = Vec::with_capacity(values.len());
        for raw in values.into_iter().flatten() {
            records.push(serde_json::from_str::<DailyRateRecord>(&raw)?);
        }
        Ok(records)
    }
}
