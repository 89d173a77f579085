//! # lib_rates
//!
//! Daily exchange-rate ingestion and reporting.
//!
//! Two independent operations share nothing but configuration and the store:
//!
//! - [`RateIngestor`] fetches the ECB daily feed, parses it and writes one
//!   record keyed by today's UTC date.
//! - [`RateReporter`] reads today's and yesterday's records and reports each
//!   currency's current rate with its day-over-day change.
//!
//! Both answer with an [`Envelope`] (`{statusCode, body}`) and never return
//! an error to the caller; failures are logged and reported as status 500.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod configs;
pub mod connections;
pub mod core;
pub mod ingestors;
#[cfg(feature = "loggers")]
pub mod loggers;
pub mod markets;
pub mod reporters;
pub mod retrieve;

// --- Public API Re-exports ---
pub use crate::configs::{ConfigError, RatesConfig, RatesSettings, StoreBackend};
pub use crate::connections::{connect_store, DailyRateRecord, MemoryRateStore, RateStore};
pub use crate::core::{Envelope, RatesError};
pub use crate::ingestors::{FeedSource, RateIngestor};
pub use crate::markets::ecb::{parse_feed, EcbFeed, ParsedFeed, RateMap};
pub use crate::reporters::{RateReport, RateReporter};
