//! HTTP transport contract and its `reqwest` implementation

use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use reqwest::Client;
use url::Url;

use crate::error::DriverError;

/// Fully prepared upstream request
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    /// HTTP method
    pub method: Method,
    /// Target URL, including any injected query parameters
    pub url: Url,
    /// Outgoing headers
    pub headers: HeaderMap,
    /// Encoded body
    pub body: Vec<u8>,
}

/// Raw upstream response
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// Status returned by upstream
    pub status: StatusCode,
    /// Response body bytes
    pub body: Vec<u8>,
}

/// Sends prepared requests to the provider
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and collect the full response body
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, DriverError>;
}

/// [`Transport`] backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with an optional overall request timeout
    ///
    /// # Errors
    ///
    /// Returns `DriverError::Configuration` if the client cannot be built.
    pub fn new(timeout: Option<Duration>) -> Result<Self, DriverError> {
        let mut builder = Client::builder();

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| DriverError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, DriverError> {
        let response = self
            .client
            .request(request.method, request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "upstream request failed");
                DriverError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| DriverError::Transport(format!("failed to read upstream body: {e}")))?;

        Ok(UpstreamResponse {
            status,
            body: body.to_vec(),
        })
    }
}
