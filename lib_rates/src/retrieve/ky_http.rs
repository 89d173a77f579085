//! # HTTP Retrieval Utilities
//!
//! This module provides an asynchronous API client wrapper around `reqwest`.
//! It includes middleware support for exponential backoff retries and a
//! standardized response container that does not treat non-2xx statuses as
//! transport errors.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Url;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};

/// A standardized container for API responses.
///
/// This struct wraps the response body along with metadata about the
/// HTTP transaction, such as status codes and headers.
#[derive(Debug)]
pub struct ApiResponse<T> {
    /// The response body on success.
    pub data: Option<T>,
    /// The raw error body returned by the server if the request failed.
    pub error_body: Option<String>,
    /// The numeric HTTP status code.
    pub status: u16,
    /// Indicates if the status code was in the 2xx range.
    pub success: bool,
    /// The headers returned by the server.
    pub headers: HeaderMap,
}

/// Transport options for [`ApiClient`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientOptions {
    /// Retries on transient failures. `0` sends exactly one request.
    pub max_retries: u32,
    /// Whole-request timeout. `None` waits for the server indefinitely.
    pub timeout: Option<Duration>,
}

/// A flexible asynchronous HTTP client.
///
/// Built on top of `reqwest_middleware`, it handles base URLs and
/// optional automatic retries.
pub struct ApiClient {
    /// The underlying middleware-enabled client.
    inner: ClientWithMiddleware,
    /// The base URL to which all relative paths are joined.
    base_url: Url,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Arguments
    /// * `base_url` - The absolute base URL (e.g., "https://api.example.com/v1/").
    /// * `options` - Retry and timeout settings.
    ///
    /// # Errors
    /// Returns an error if `base_url` is not a valid absolute URL or the
    /// underlying client cannot be built.
    pub fn new(base_url: &str, options: ClientOptions) -> anyhow::Result<Self> {
        let url = Url::parse(base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let mut middleware = ClientBuilder::new(client);
        if options.max_retries > 0 {
            let retry_policy = ExponentialBackoff::builder().build_with_max_retries(options.max_retries);
            middleware = middleware.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }

        Ok(Self {
            inner: middleware.build(),
            base_url: url,
        })
    }

    /// The base URL every request is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Performs a GET and returns the body as text.
    ///
    /// An empty `path` requests the base URL itself.
    ///
    /// # Errors
    /// Returns an `anyhow::Error` if URL joining, network execution or body
    /// decoding fails. Non-2xx statuses are *not* errors; see [`ApiResponse::success`].
    pub async fn get_text(&self, path: &str) -> anyhow::Result<ApiResponse<String>> {
        let full_url = self.base_url.join(path)?;

        let response: reqwest::Response = self.inner.get(full_url).send().await?;
        let status = response.status();
        let resp_headers = response.headers().clone();

        if status.is_success() {
            let data = response.text().await?;
            Ok(ApiResponse {
                data: Some(data),
                error_body: None,
                status: status.as_u16(),
                success: true,
                headers: resp_headers,
            })
        } else {
            // Keep the error body for diagnostics
            let error_text = response.text().await.ok();
            Ok(ApiResponse {
                data: None,
                error_body: error_text,
                status: status.as_u16(),
                success: false,
                headers: resp_headers,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_relative_base_url() {
        assert!(ApiClient::new("not a url", ClientOptions::default()).is_err());
    }

    #[test]
    fn test_empty_path_targets_base_url() {
        let api = ApiClient::new(
            "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-daily.xml",
            ClientOptions::default(),
        )
        .unwrap();
        let joined = api.base_url().join("").unwrap();
        assert_eq!(joined.as_str(), "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-daily.xml");
    }
}
