//! # Connections Module
//!
//! This module handles the key-value store that holds one record per day,
//! plus the connection plumbing for each backend.
//!
//! - **`store`**: The `RateStore` trait and the `DailyRateRecord` entity.
//! - **`memory`**: A process-local store, used by default and in tests.
//! - **`cache_redis`**: Redis backend (feature `redis-store`).
//! - **`db_postgres`**: PostgreSQL backend (feature `postgres-store`).

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use std::sync::Arc;

use tracing::info;

use crate::configs::config_rates::{RatesConfig, StoreBackend};
use crate::core::error::RatesError;

/// The store contract and record type.
pub mod store;
/// In-process store.
pub mod memory;

/// Module for Redis store operations and connection handling.
#[cfg(feature = "redis-store")]
pub mod cache_redis;

/// Module for PostgreSQL connection pooling and store operations.
#[cfg(feature = "postgres-store")]
pub mod db_postgres;

pub use memory::MemoryRateStore;
pub use store::{DailyRateRecord, RateStore};

/// Opens the store selected by `config.store`.
///
/// # Errors
/// `UpstreamFetch` if the backend is unreachable, `Unexpected` if the
/// backend was not compiled in.
pub async fn connect_store(config: &RatesConfig) -> Result<Arc<dyn RateStore>, RatesError> {
    info!(backend = config.store.label(), table = %config.table_name, "opening rate store");

    match &config.store {
        StoreBackend::Memory => Ok(Arc::new(MemoryRateStore::new())),

        #[cfg(feature = "redis-store")]
        StoreBackend::Redis(url) => {
            let store = cache_redis::RedisRateStore::connect(url, &config.table_name).await?;
            Ok(Arc::new(store))
        }

        #[cfg(feature = "postgres-store")]
        StoreBackend::Postgres(url) => {
            let store = db_postgres::PostgresRateStore::connect(url, &config.table_name)?;
            store.ensure_table().await?;
            Ok(Arc::new(store))
        }

        #[allow(unreachable_patterns)]
        other => Err(RatesError::Unexpected(format!(
            "store backend {} is not enabled in this build",
            other.label()
        ))),
    }
}
