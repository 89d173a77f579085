//! # Rates Servers
//!
//! Shared plumbing for the `server_rates` and `rates_once` binaries:
//! layered configuration, the HTTP router and the daily ingest schedule.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, unused_qualifications)]

pub mod rates_logic;
