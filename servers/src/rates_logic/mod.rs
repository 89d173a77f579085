//! Building blocks of the rates server.

/// Layered configuration (defaults → file → env / CLI).
pub mod config;
/// HTTP routes over the two operations.
pub mod routes;
/// Cron-driven ingest.
pub mod scheduler;
/// Shared handler state.
pub mod state;
