//! # PostgreSQL Rate Store
//!
//! One row per day in `<table>(date TEXT PRIMARY KEY, rates JSONB NOT NULL)`.
//! Connections come from a `deadpool_postgres` pool; writes are single-row
//! upserts so the last write for a date wins.

use async_trait::async_trait;
use chrono::NaiveDate;
use deadpool_postgres::{Config as DeadpoolConfig, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio_postgres::types::Json;
use tokio_postgres::NoTls;
use tracing::{debug, info};

use super::store::{DailyRateRecord, RateStore};
use crate::core::error::RatesError;
use crate::markets::ecb::RateMap;

/// PostgreSQL-backed [`RateStore`].
pub struct PostgresRateStore {
    pool: Pool,
    table: String,
}

impl PostgresRateStore {
    /// Creates a pool for `database_url`. No connection is opened until first use.
    ///
    /// `table` must already be a validated SQL identifier (see `RatesSettings::resolve`).
    pub fn connect(database_url: &str, table: &str) -> Result<Self, RatesError> {
        let mut pg_pool_config = DeadpoolConfig::new();
        pg_pool_config.url = Some(database_url.to_string());
        pg_pool_config.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let pool = pg_pool_config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| RatesError::Unexpected(format!("failed to create database pool: {}", e)))?;

        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }

    /// Creates the table if it does not exist yet.
    pub async fn ensure_table(&self) -> Result<(), RatesError> {
        let client = self.pool.get().await?;
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" (date TEXT PRIMARY KEY, rates JSONB NOT NULL)",
            self.table
        );
        client.batch_execute(&ddl).await?;
        info!(table = %self.table, "rate table ready");
        Ok(())
    }
}

#[async_trait]
impl RateStore for PostgresRateStore {
    async fn put(&self, record: &DailyRateRecord) -> Result<(), RatesError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "INSERT INTO \"{}\" (date, rates) VALUES ($1, $2) \
             ON CONFLICT (date) DO UPDATE SET rates = EXCLUDED.rates",
            self.table
        );
        let key = record.key();
        let rows = client.execute(&sql, &[&key, &Json(&record.rates)]).await?;
        debug!(date = %key, rows, "record upserted");
        Ok(())
    }

    async fn batch_get(&self, dates: &[NaiveDate]) -> Result<Vec<DailyRateRecord>, RatesError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT date, rates FROM \"{}\" WHERE date = ANY($1)", self.table);
        let keys: Vec<String> = dates.iter().map(|d| d.to_string()).collect();
        let rows = client.query(&sql, &[&keys]).await?;

        rows.iter()
            .map(|row| {
                let raw_date: String = row
                    .try_get("date")
                    .map_err(|e| RatesError::Unexpected(format!("undecodable date column: {}", e)))?;
                let Json(rates): Json<RateMap> = row
                    .try_get("rates")
                    .map_err(|e| RatesError::Unexpected(format!("undecodable rates column: {}", e)))?;
                let date = raw_date.parse::<NaiveDate>().map_err(|e| {
                    RatesError::Unexpected(format!("stored date {:?} is not YYYY-MM-DD: {}", raw_date, e))
                })?;
                Ok(DailyRateRecord { date, rates })
            })
            .collect()
    }
}
