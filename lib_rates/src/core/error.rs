//! # Rate Operation Errors
//!
//! Both operations distinguish only two failure kinds. Either one is logged
//! with its kind and then reported to the caller as the same generic failure,
//! so the distinction exists for diagnostics rather than for clients.

use thiserror::Error;

/// Errors raised while ingesting or reporting exchange rates.
#[derive(Debug, Error)]
pub enum RatesError {
    /// The feed or the store could not be reached, or answered with an error.
    #[error("upstream fetch failed: {0}")]
    UpstreamFetch(String),

    /// Anything else, e.g. a stored record whose shape could not be decoded.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl RatesError {
    /// A stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RatesError::UpstreamFetch(_) => "UpstreamFetchError",
            RatesError::Unexpected(_) => "UnexpectedError",
        }
    }
}

impl From<serde_json::Error> for RatesError {
    fn from(e: serde_json::Error) -> Self {
        RatesError::Unexpected(e.to_string())
    }
}

#[cfg(feature = "redis-store")]
impl From<redis::RedisError> for RatesError {
    fn from(e: redis::RedisError) -> Self {
        RatesError::UpstreamFetch(e.to_string())
    }
}

#[cfg(feature = "postgres-store")]
impl From<tokio_postgres::Error> for RatesError {
    fn from(e: tokio_postgres::Error) -> Self {
        RatesError::UpstreamFetch(e.to_string())
    }
}

#[cfg(feature = "postgres-store")]
impl From<deadpool_postgres::PoolError> for RatesError {
    fn from(e: deadpool_postgres::PoolError) -> Self {
        RatesError::UpstreamFetch(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(RatesError::UpstreamFetch("x".into()).kind(), "UpstreamFetchError");
        assert_eq!(RatesError::Unexpected("x".into()).kind(), "UnexpectedError");
    }

    #[test]
    fn test_json_errors_are_unexpected() {
        let err: RatesError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, RatesError::Unexpected(_)));
    }
}
