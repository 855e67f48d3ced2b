//! Anthropic driver: transform, route, authenticate, send, normalize

use http::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use http::{Method, StatusCode};
use tessera_config::ProviderConfig;
use url::Url;

use super::auth::AuthInjector;
use super::transport::{ReqwestTransport, Transport, UpstreamRequest};
use crate::error::DriverError;
use crate::protocol::anthropic::{AnthropicErrorResponse, PROVIDER};
use crate::route::RouteType;
use crate::transform::{JSON_CONTENT_TYPE, Outbound, from_format, parse_route, to_format};
use crate::types::ModelConfig;

/// Default Anthropic API base URL
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Header carrying the Anthropic API version
const ANTHROPIC_VERSION: &str = "anthropic-version";

/// Performs one upstream round trip per canonical request
pub struct AnthropicDriver<T = ReqwestTransport> {
    transport: T,
    base_url: Url,
    api_version: String,
    auth: AuthInjector,
}

impl AnthropicDriver<ReqwestTransport> {
    /// Create a driver backed by `reqwest`
    ///
    /// # Errors
    ///
    /// Returns `DriverError::Configuration` if the timeout or credentials are
    /// invalid or the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self, DriverError> {
        let timeout = config
            .timeout_duration()
            .map_err(|e| DriverError::Configuration(e.to_string()))?;

        Self::with_transport(config, ReqwestTransport::new(timeout)?)
    }
}

impl<T: Transport> AnthropicDriver<T> {
    /// Create a driver with a custom transport
    ///
    /// # Errors
    ///
    /// Returns `DriverError::Configuration` if the credentials are invalid.
    pub fn with_transport(config: &ProviderConfig, transport: T) -> Result<Self, DriverError> {
        let base_url = match &config.base_url {
            Some(url) => url.clone(),
            None => Url::parse(DEFAULT_BASE_URL).map_err(|e| DriverError::Internal(e.into()))?,
        };

        let auth = AuthInjector::from_config(config.auth.as_ref())?;
        if !auth.is_configured() {
            tracing::debug!(provider = PROVIDER, "no upstream credential configured");
        }

        Ok(Self {
            transport,
            base_url,
            api_version: config.api_version.clone(),
            auth,
        })
    }

    /// Send the canonical request body upstream on `route` and return the
    /// canonical response body
    ///
    /// On `preserve` the request bytes are forwarded untouched. Upstream statuses above 299 are returned as `DriverError::Upstream`
    /// without attempting normalization.
    ///
    /// # Errors
    ///
    /// Any transform error, a missing upstream URL for `preserve`, transport
    /// failures and upstream error statuses.
    pub async fn subrequest(
        &self,
        request: &[u8],
        model: &ModelConfig,
        route: &str,
    ) -> Result<Vec<u8>, DriverError> {
        let route_type = parse_route(route)?;
        let outbound = to_format(request, model, route)?;

        let (mut url, method) = self.resolve(route_type, model)?;
        let mut headers = self.headers(&outbound, model)?;
        let body = outbound.to_body().map_err(|e| DriverError::Internal(e.into()))?;

        tracing::debug!(provider = PROVIDER, route = %route_type, url = %url, "sending upstream request");

        self.auth.apply(&mut headers, &mut url);

        let response = self
            .transport
            .send(UpstreamRequest {
                method,
                url,
                headers,
                body,
            })
            .await?;

        if response.status.as_u16() > 299 {
            let message = upstream_message(response.status, &response.body);
            tracing::warn!(provider = PROVIDER, status = %response.status, "upstream returned error");
            return Err(DriverError::Upstream {
                status: response.status,
                message,
            });
        }

        Ok(from_format(&response.body, model, route)?)
    }

    /// Upstream URL and method for a route
    fn resolve(&self, route: RouteType, model: &ModelConfig) -> Result<(Url, Method), DriverError> {
        let upstream = route.upstream();
        let method = upstream.as_ref().map_or(Method::POST, |u| u.method.clone());

        if let Some(url) = model.upstream_url() {
            return Ok((url.clone(), method));
        }

        let Some(upstream) = upstream else {
            return Err(DriverError::Configuration(format!(
                "model '{}' has no upstream_url for route {route}",
                model.name
            )));
        };

        let base = self.base_url.as_str().trim_end_matches('/');
        let url = Url::parse(&format!("{base}{}", upstream.path))
            .map_err(|e| DriverError::Configuration(format!("invalid upstream URL: {e}")))?;

        Ok((url, method))
    }

    fn headers(&self, outbound: &Outbound, model: &ModelConfig) -> Result<HeaderMap, DriverError> {
        let mut headers = HeaderMap::new();

        if let Some(content_type) = outbound.content_type() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

        let version = model.provider_version().unwrap_or(&self.api_version);
        let version = HeaderValue::try_from(version)
            .map_err(|e| DriverError::Configuration(format!("invalid anthropic-version '{version}': {e}")))?;
        headers.insert(HeaderName::from_static(ANTHROPIC_VERSION), version);

        Ok(headers)
    }
}

/// Extract a readable message from an upstream error body
fn upstream_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(error) = serde_json::from_slice::<AnthropicErrorResponse>(body) {
        return error.error.message;
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_owned()
    } else {
        text.to_owned()
    }
}
