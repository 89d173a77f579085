//! # Reporters Module
//!
//! Read-only views derived from stored records.
//!
//! ## Contained Modules:
//! - **`rate_reporter`**: Today's rates with their change since yesterday.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// The day-over-day report operation.
pub mod rate_reporter;

pub use rate_reporter::{compute_changes, RateChange, RateReport, RateReporter, NOT_AVAILABLE, REPORT_FAILED};
