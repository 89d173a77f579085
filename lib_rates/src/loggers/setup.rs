//! # Logging Setup
//!
//! Installs a `tracing` registry with three parts:
//!
//! - an `EnvFilter` taken from `RUST_LOG`, falling back to the configured level;
//! - an ANSI console layer with targets;
//! - a JSON file layer written through a non-blocking, daily-rolling appender.
//!
//! The returned [`WorkerGuard`] flushes the file writer when dropped, so the
//! caller must hold it for as long as it wants file output.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Where and how much to log.
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Directory for rolling log files. Created if missing.
    pub log_dir: PathBuf,
    /// Level used when `RUST_LOG` is unset (trace, debug, info, warn, error).
    pub log_level: String,
    /// File name prefix, usually the binary name.
    pub file_prefix: String,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("./logs"),
            log_level: "info".to_string(),
            file_prefix: "rates".to_string(),
        }
    }
}

/// Installs the global subscriber.
///
/// # Errors
/// Fails if the log directory cannot be created, the level is not a valid
/// filter directive, or a global subscriber is already installed.
pub fn setup_logging(options: &LoggingOptions) -> io::Result<WorkerGuard> {
    fs::create_dir_all(&options.log_dir)?;

    let file_appender = rolling::daily(&options.log_dir, &options.file_prefix);
    let (non_blocking_appender, guard) = non_blocking(file_appender);

    let console_layer = fmt::layer().with_target(true).with_ansi(true);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking_appender)
        .json();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&options.log_level))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    info!(
        level = %options.log_level,
        dir = %options.log_dir.display(),
        "logging initialized"
    );
    Ok(guard)
}
