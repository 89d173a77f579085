//! # ECB Feed Client
//!
//! Downloads the daily reference-rate document. One GET per call; retries and
//! a timeout are available through [`ClientOptions`] but both are off unless
//! configured.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, LAST_MODIFIED};
use tracing::{debug, error};

use crate::configs::config_rates::RatesConfig;
use crate::core::error::RatesError;
use crate::ingestors::FeedSource;
use crate::retrieve::ky_http::{ApiClient, ClientOptions};

/// The published location of the daily feed.
pub const ECB_DAILY_URL: &str = "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-daily.xml";

/// HTTP source for the ECB daily feed.
pub struct EcbFeed {
    client: ApiClient,
}

impl EcbFeed {
    /// Builds a client for `config.feed_url` with the configured retry and timeout options.
    pub fn new(config: &RatesConfig) -> Result<Self, RatesError> {
        let options = ClientOptions {
            max_retries: config.feed_max_retries,
            timeout: config.feed_timeout,
        };
        let client = ApiClient::new(&config.feed_url, options)
            .map_err(|e| RatesError::Unexpected(format!("invalid feed URL {}: {}", config.feed_url, e)))?;
        Ok(Self { client })
    }
}

/// The feed's publication stamp, or `-` when the server omits it.
fn last_modified(headers: &HeaderMap) -> &str {
    headers
        .get(LAST_MODIFIED)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
}

#[async_trait]
impl FeedSource for EcbFeed {
    async fn fetch(&self) -> Result<String, RatesError> {
        let response = self
            .client
            .get_text("")
            .await
            .map_err(|e| RatesError::UpstreamFetch(format!("{:#}", e)))?;

        if response.success {
            let body = response.data.unwrap_or_default();
            let last_modified = last_modified(&response.headers);
            debug!(bytes = body.len(), url = %self.client.base_url(), last_modified, "feed downloaded");
            Ok(body)
        } else {
            error!(
                status = response.status,
                url = %self.client.base_url(),
                body = response.error_body.as_deref().unwrap_or(""),
                "feed request rejected"
            );
            Err(RatesError::UpstreamFetch(format!(
                "feed responded with HTTP {}",
                response.status
            )))
        }
    }
}
