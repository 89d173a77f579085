//! # Core Module
//!
//! The small set of types every other folder in `lib_rates` depends on.
//!
//! ## Core Components:
//!
//! - **`error`**: `RatesError`, the two-kind error enumeration that both
//!   operations collapse into a generic status-500 envelope at their boundary.
//! - **`envelope`**: `Envelope`, the `{statusCode, body}` response pair returned
//!   by the ingest and report operations.
//! - **`calendar`**: UTC calendar helpers used to key records by date.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Error kinds surfaced by the rate operations.
pub mod error;
/// The `{statusCode, body}` response envelope.
pub mod envelope;
/// Date helpers for record keys.
pub mod calendar;

// --- Public API Re-exports ---
pub use calendar::{previous_day, today_utc};
pub use envelope::Envelope;
pub use error::RatesError;
