/*
[INPUT]:  HTTP configuration (base URL, connect timeout, optional request timeout)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
[UPDATE]: 2026-09-30 Generate calls wait indefinitely; request timeout is opt-in
*/

use crate::http::{DashboardError, Result};
use crate::types::ApiEnvelope;
use reqwest::{Client, Method, RequestBuilder, Url};
use std::time::Duration;

/// Default backend location when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8083";

const INVALID_JSON_MESSAGE: &str = "server returned an invalid JSON response";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub connect_timeout: Duration,
    /// Total request timeout. `None` waits for the backend indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// Main HTTP client for the creator backend
#[derive(Debug, Clone)]
pub struct CreatorClient {
    http_client: Client,
    base_url: Url,
}

impl CreatorClient {
    /// Create a new client against the default local backend
    pub fn new() -> Result<Self> {
        Self::with_config_and_base_url(ClientConfig::default(), DEFAULT_BASE_URL)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a new client with custom configuration and base URL.
    ///
    /// Tests use this to point the client at a wiremock server.
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let mut builder = Client::builder().connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        // Endpoints are joined relative to the base, so keep a trailing slash
        // to preserve any path prefix the backend is mounted under.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)?;
        if base_url.cannot_be_a_base() {
            return Err(DashboardError::Config(format!(
                "base url cannot carry paths: {base_url}"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for an API endpoint
    fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    /// Build request builder for an API endpoint
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.endpoint_url(endpoint)?;
        Ok(self.http_client.request(method, url))
    }

    /// Build request builder for an endpoint whose last path segment is caller data
    pub(crate) fn request_with_segment(
        &self,
        method: Method,
        endpoint: &str,
        segment: &str,
    ) -> Result<RequestBuilder> {
        let mut url = self.endpoint_url(endpoint)?;
        let url_text = url.to_string();
        url.path_segments_mut()
            .map_err(|_| DashboardError::Config(format!("url cannot carry paths: {url_text}")))?
            .pop_if_empty()
            .push(segment);
        Ok(self.http_client.request(method, url))
    }

    /// Send a request and read the body as a JSON envelope.
    ///
    /// Non-2xx statuses are not errors here; callers decide how to classify
    /// them. A body that is not JSON becomes `InvalidResponse` carrying the
    /// raw text.
    pub(crate) async fn send_envelope(&self, builder: RequestBuilder) -> Result<ApiEnvelope> {
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str(&text) {
            Ok(body) => Ok(ApiEnvelope { status, body }),
            Err(err) => {
                tracing::debug!(status = %status, error = %err, "response body is not json");
                let detail = if text.trim().is_empty() {
                    INVALID_JSON_MESSAGE.to_string()
                } else {
                    text
                };
                Err(DashboardError::InvalidResponse(detail))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let client =
            CreatorClient::with_config_and_base_url(ClientConfig::default(), "http://host/app")
                .expect("client init");
        let url = client.endpoint_url("/api/config").expect("endpoint url");
        assert_eq!(url.as_str(), "http://host/app/api/config");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = CreatorClient::with_config_and_base_url(ClientConfig::default(), "not a url")
            .expect_err("should fail");
        assert!(matches!(err, DashboardError::UrlParse(_)));
    }

    #[test]
    fn test_default_config_has_no_request_timeout() {
        let config = ClientConfig::default();
        assert!(config.request_timeout.is_none());
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }
}
