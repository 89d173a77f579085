//! Server configuration, merged the same way for both binaries:
//! built-in defaults, then a JSON config file, then environment variables and
//! command-line flags.

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use lib_rates::configs::config_rates::DEFAULT_STORE_URL;
use lib_rates::loggers::LoggingOptions;
use lib_rates::RatesSettings;

/// Config file looked up in the working directory when `--config-path` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "server_rates.conf";

#[derive(Debug, Error)]
pub enum ServerConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
}

#[derive(Args, Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[arg(long, global = true, env = "RATES_PORT", help = "Port to listen on for HTTP requests.")]
    pub port: Option<u16>,

    #[arg(long, global = true, env = "RATES_CONFIG_PATH", help = "Path to the JSON configuration file.")]
    pub config_path: Option<PathBuf>,

    #[arg(long, global = true, env = "RATES_LOG_DIR", help = "Directory for log files.")]
    pub log_dir: Option<PathBuf>,

    #[arg(long, global = true, env = "RATES_LOG_LEVEL", help = "Logging level (trace, debug, info, warn, error).")]
    pub log_level: Option<String>,

    #[arg(long, global = true, env = "RATES_INGEST_CRON", help = "Six-field cron expression (UTC) for the daily ingest.")]
    pub ingest_cron: Option<String>,

    #[arg(long, global = true, env = "RATES_TABLE_NAME", help = "Table identifier (Redis key prefix / PostgreSQL table).")]
    pub table_name: Option<String>,

    #[arg(long, global = true, env = "RATES_FEED_URL", help = "Daily rates feed URL.")]
    pub feed_url: Option<String>,

    #[arg(long, global = true, env = "RATES_STORE_URL", help = "Store URL: memory://, redis://... or postgres://...")]
    pub store_url: Option<String>,

    #[arg(long, global = true, env = "RATES_FEED_MAX_RETRIES", help = "Retries for the feed download (0 = single attempt).")]
    pub feed_max_retries: Option<u32>,

    #[arg(long, global = true, env = "RATES_FEED_TIMEOUT_SECS", help = "Timeout in seconds for the feed download.")]
    pub feed_timeout_secs: Option<u64>,
}

#[derive(Parser, Debug)]
#[command(about = "Daily exchange-rate server", version)]
pub struct ServerCli {
    #[command(flatten)]
    pub config: Config,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Fetch the feed and store today's record.
    Ingest,
    /// Print today's rates with their change since yesterday.
    Report,
}

#[derive(Parser, Debug)]
#[command(about = "Run one exchange-rate operation and print its response envelope", version)]
pub struct OnceCli {
    #[command(subcommand)]
    pub operation: Operation,

    #[command(flatten)]
    pub config: Config,
}

impl Config {
    // Merge two Config structs, where 'other' overrides 'self' for Some values
    fn merge(self, other: Config) -> Config {
        Config {
            port: other.port.or(self.port),
            config_path: other.config_path.or(self.config_path),
            log_dir: other.log_dir.or(self.log_dir),
            log_level: other.log_level.or(self.log_level),
            ingest_cron: other.ingest_cron.or(self.ingest_cron),
            table_name: other.table_name.or(self.table_name),
            feed_url: other.feed_url.or(self.feed_url),
            store_url: other.store_url.or(self.store_url),
            feed_max_retries: other.feed_max_retries.or(self.feed_max_retries),
            feed_timeout_secs: other.feed_timeout_secs.or(self.feed_timeout_secs),
        }
    }

    /// The subset handed to `lib_rates`.
    pub fn rates_settings(&self) -> RatesSettings {
        RatesSettings {
            table_name: self.table_name.clone(),
            feed_url: self.feed_url.clone(),
            store_url: self.store_url.clone(),
            feed_max_retries: self.feed_max_retries,
            feed_timeout_secs: self.feed_timeout_secs,
        }
    }

    pub fn logging_options(&self, file_prefix: &str) -> LoggingOptions {
        LoggingOptions {
            log_dir: self.log_dir.clone().unwrap_or_else(|| PathBuf::from("./logs")),
            log_level: self.log_level.clone().unwrap_or_else(|| "info".to_string()),
            file_prefix: file_prefix.to_string(),
        }
    }
}

fn defaults() -> Config {
    Config {
        port: Some(9010),
        log_dir: Some(PathBuf::from("./logs")),
        log_level: Some("info".to_string()),
        // ECB publishes around 16:00 CET; run after that
        ingest_cron: Some("0 0 16 * * *".to_string()),
        store_url: Some(DEFAULT_STORE_URL.to_string()),
        feed_max_retries: Some(0),
        ..Default::default()
    }
}

/// Layers defaults, the config file and the already-parsed CLI/env values.
///
/// A missing default config file is not an error; an explicitly named one is.
pub fn load_config(cli: Config) -> Result<Config, ServerConfigError> {
    let explicit = cli.config_path.is_some();
    let config_file_path = cli
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let mut current_config = defaults();

    if explicit || config_file_path.exists() {
        let config_str = fs::read_to_string(&config_file_path)
            .map_err(|e| ServerConfigError::Read { path: config_file_path.clone(), source: e })?;
        let file_config = serde_json::from_str::<Config>(&config_str)
            .map_err(|e| ServerConfigError::Parse { path: config_file_path.clone(), source: e })?;
        current_config = current_config.merge(file_config);
    }

    Ok(current_config.merge(cli))
}
