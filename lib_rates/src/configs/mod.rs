//! # Configuration Modules
//!
//! Layered configuration for the rate operations. Binaries collect partial
//! settings from defaults, a JSON file, the environment and the command line,
//! merge them, and resolve the result into one explicit, validated
//! `RatesConfig` that is handed to every constructor. Nothing here is global.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Settings, validation and store backend selection.
pub mod config_rates;

pub use config_rates::{ConfigError, RatesConfig, RatesSettings, StoreBackend};
