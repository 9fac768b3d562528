//! The network capability the pipeline consumes.
//!
//! Adapters never touch sockets directly; they go through [`Fetch`], so tests
//! can swap in canned responses and production can route through whatever
//! proxy the host provides.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::error::IngestError;

/// A fully read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl FetchResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True when the declared content type is JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
    }
}

/// Issues one GET and hands back status, content type and body.
///
/// Non-2xx statuses are returned as responses, not errors; only transport
/// failures (DNS, connect, timeout, body read) produce `Err`.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, IngestError>;
}

/// [`Fetch`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, IngestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an existing client, e.g. one already configured with a proxy.
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, IngestError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;
        Ok(FetchResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, content_type: Option<&str>) -> FetchResponse {
        FetchResponse {
            status,
            content_type: content_type.map(str::to_string),
            body: String::new(),
        }
    }

    #[test]
    fn success_covers_2xx_only() {
        assert!(response(200, None).is_success());
        assert!(response(204, None).is_success());
        assert!(!response(301, None).is_success());
        assert!(!response(429, None).is_success());
        assert!(!response(503, None).is_success());
    }

    #[test]
    fn json_detection_tolerates_charset_and_case() {
        assert!(response(200, Some("application/json; charset=utf-8")).is_json());
        assert!(response(200, Some("Application/JSON")).is_json());
        assert!(!response(200, Some("text/html")).is_json());
        assert!(!response(200, None).is_json());
    }
}
