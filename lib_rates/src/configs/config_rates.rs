//! # Rates Configuration
//!
//! [`RatesSettings`] is the all-optional form read from files and flags;
//! [`RatesSettings::resolve`] fills the gaps with defaults and validates the
//! result into a [`RatesConfig`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::markets::ecb::ECB_DAILY_URL;

/// Default table identifier (Redis key prefix / PostgreSQL table name).
pub const DEFAULT_TABLE_NAME: &str = "ExchangeRates";
/// Default store: process-local memory.
pub const DEFAULT_STORE_URL: &str = "memory://";

static TABLE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static pattern compiles"));

/// Configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid JSON for [`RatesSettings`].
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        /// File that was being parsed.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// A value is present but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Where daily records are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local map. Lost on exit.
    Memory,
    /// Redis at the given URL.
    Redis(String),
    /// PostgreSQL at the given URL.
    Postgres(String),
}

impl StoreBackend {
    /// Picks a backend from the URL scheme.
    pub fn from_url(raw: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(raw).map_err(|e| ConfigError::Invalid(format!("store URL {:?}: {}", raw, e)))?;
        match url.scheme() {
            "memory" => Ok(StoreBackend::Memory),
            "redis" | "rediss" => Ok(StoreBackend::Redis(raw.to_string())),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres(raw.to_string())),
            other => Err(ConfigError::Invalid(format!("unsupported store scheme {:?}", other))),
        }
    }

    /// Short name for logs. Never includes credentials.
    pub fn label(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Redis(_) => "redis",
            StoreBackend::Postgres(_) => "postgres",
        }
    }
}

/// Partial settings. Every field is optional so layers can be merged.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatesSettings {
    /// Table identifier.
    pub table_name: Option<String>,
    /// Feed location.
    pub feed_url: Option<String>,
    /// Store location; the scheme selects the backend.
    pub store_url: Option<String>,
    /// Retries for the feed download.
    pub feed_max_retries: Option<u32>,
    /// Timeout for the feed download, in seconds.
    pub feed_timeout_secs: Option<u64>,
}

impl RatesSettings {
    /// Merge two layers, where `other` overrides `self` for `Some` values.
    pub fn merge(self, other: RatesSettings) -> RatesSettings {
        RatesSettings {
            table_name: other.table_name.or(self.table_name),
            feed_url: other.feed_url.or(self.feed_url),
            store_url: other.store_url.or(self.store_url),
            feed_max_retries: other.feed_max_retries.or(self.feed_max_retries),
            feed_timeout_secs: other.feed_timeout_secs.or(self.feed_timeout_secs),
        }
    }

    /// Reads a JSON settings file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies defaults and validates.
    pub fn resolve(self) -> Result<RatesConfig, ConfigError> {
        let table_name = self.table_name.unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());
        if !TABLE_NAME_PATTERN.is_match(&table_name) {
            return Err(ConfigError::Invalid(format!(
                "table name {:?} must be letters, digits and underscores",
                table_name
            )));
        }

        let feed_url = self.feed_url.unwrap_or_else(|| ECB_DAILY_URL.to_string());
        Url::parse(&feed_url).map_err(|e| ConfigError::Invalid(format!("feed URL {:?}: {}", feed_url, e)))?;

        let store = StoreBackend::from_url(self.store_url.as_deref().unwrap_or(DEFAULT_STORE_URL))?;

        Ok(RatesConfig {
            table_name,
            feed_url,
            store,
            feed_max_retries: self.feed_max_retries.unwrap_or(0),
            feed_timeout: self.feed_timeout_secs.map(Duration::from_secs),
        })
    }
}

/// Validated configuration shared by the feed client and the store.
#[derive(Debug, Clone, PartialEq)]
pub struct RatesConfig {
    /// Table identifier.
    pub table_name: String,
    /// Feed location.
    pub feed_url: String,
    /// Store backend and its location.
    pub store: StoreBackend,
    /// Retries for the feed download.
    pub feed_max_retries: u32,
    /// Timeout for the feed download.
    pub feed_timeout: Option<Duration>,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            feed_url: ECB_DAILY_URL.to_string(),
            store: StoreBackend::Memory,
            feed_max_retries: 0,
            feed_timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_resolve() {
        let config = RatesSettings::default().resolve().unwrap();
        assert_eq!(config, RatesConfig::default());
    }

    #[test]
    fn test_later_layer_overrides_earlier() {
        let file = RatesSettings {
            table_name: Some("FileTable".into()),
            feed_max_retries: Some(2),
            ..Default::default()
        };
        let cli = RatesSettings {
            table_name: Some("CliTable".into()),
            ..Default::default()
        };
        let merged = file.merge(cli);
        assert_eq!(merged.table_name.as_deref(), Some("CliTable"));
        assert_eq!(merged.feed_max_retries, Some(2));
    }

    #[test]
    fn test_reads_camel_case_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "tableName": "Rates_2", "storeUrl": "redis://127.0.0.1/", "feedTimeoutSecs": 5 }}"#
        )
        .unwrap();

        let config = RatesSettings::from_json_file(file.path()).unwrap().resolve().unwrap();
        assert_eq!(config.table_name, "Rates_2");
        assert_eq!(config.store, StoreBackend::Redis("redis://127.0.0.1/".into()));
        assert_eq!(config.feed_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_rejects_unsafe_table_name() {
        let settings = RatesSettings {
            table_name: Some("rates; DROP TABLE x".into()),
            ..Default::default()
        };
        assert!(matches!(settings.resolve(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_store_scheme_selects_backend() {
        assert_eq!(StoreBackend::from_url("memory://").unwrap(), StoreBackend::Memory);
        assert_eq!(StoreBackend::from_url("postgresql://u:p@db/rates").unwrap().label(), "postgres");
        assert!(StoreBackend::from_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RatesSettings::from_json_file(Path::new("/definitely/not/here.conf")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
