//! # Data Ingestors Module
//!
//! The "front door" for external rate data. An ingestor pulls a document from
//! a [`FeedSource`], parses it, and persists the result as today's record.
//!
//! ## Contained Modules:
//! - **`rate_ingestor`**: The daily ingest operation.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use async_trait::async_trait;

use crate::core::error::RatesError;

/// The daily fetch → parse → write operation.
pub mod rate_ingestor;

pub use rate_ingestor::{IngestOutcome, RateIngestor, INGEST_FAILED, INGEST_OK};

/// Anything that can produce the raw feed text.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Downloads the full feed payload.
    async fn fetch(&self) -> Result<String, RatesError>;
}
