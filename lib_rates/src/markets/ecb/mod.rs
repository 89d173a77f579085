//! # ECB Daily Reference Rates
//!
//! - **`feed_parser`**: Turns the raw `eurofxref-daily.xml` text into a
//!   currency → rate mapping.
//! - **`eurofxref`**: Downloads the feed through the shared `ApiClient`.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Pattern-based parser for the daily feed document.
pub mod feed_parser;
/// HTTP client for the daily feed.
pub mod eurofxref;

pub use eurofxref::{EcbFeed, ECB_DAILY_URL};
pub use feed_parser::{parse_feed, ParsedFeed, RateMap};
