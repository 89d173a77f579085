//! # Loggers Module
//!
//! Subscriber setup shared by every binary in the workspace.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Console + daily-rolling JSON file subscriber.
pub mod setup;

pub use setup::{setup_logging, LoggingOptions};
