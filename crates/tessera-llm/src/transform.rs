//! Public entry points for request and response conversion
//!
//! Both directions validate the route string, delegate to the per-route
//! builder or normalizer in [`crate::convert::anthropic`], and return either
//! a complete result or a typed error. Nothing here touches shared state.

use crate::convert::anthropic::{
    build_completion_request, build_messages_request, normalize_completion_response, normalize_messages_response,
};
use crate::error::TransformError;
use crate::protocol::anthropic::{PROVIDER, ProviderRequest};
use crate::route::RouteType;
use crate::types::{CanonicalRequest, ModelConfig};

/// Content type of every transformed request body
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Result of [`to_format`]
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// Provider-shaped request and its content type
    Provider {
        /// Request body
        body: ProviderRequest,
        /// Content type to send with the body
        content_type: &'static str,
    },
    /// Pass-through request bytes, exactly as given
    Preserved(Vec<u8>),
}

impl Outbound {
    /// Content type to send; `None` for pass-through
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Provider { content_type, .. } => Some(*content_type),
            Self::Preserved(_) => None,
        }
    }

    /// Serialize the body for transport
    pub fn to_body(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Self::Provider { body, .. } => serde_json::to_vec(body),
            Self::Preserved(raw) => Ok(raw.clone()),
        }
    }
}

/// Parse a route string, mapping unknown values to `UnsupportedRoute`
pub fn parse_route(route: &str) -> Result<RouteType, TransformError> {
    route.parse().map_err(|_| TransformError::UnsupportedRoute {
        provider: PROVIDER,
        route: route.to_owned(),
    })
}

/// Convert a canonical request body into the provider request for `route`
///
/// `preserve` returns the body untouched; it is never parsed. The other
/// routes decode it as a [`CanonicalRequest`] first.
///
/// # Errors
///
/// `UnsupportedRoute` for an unknown route string, `Build` when the body is
/// not a canonical request or lacks the input the route needs.
pub fn to_format(request: &[u8], model: &ModelConfig, route: &str) -> Result<Outbound, TransformError> {
    let route = parse_route(route).inspect_err(|e| tracing::warn!(error = %e, "rejecting request"))?;

    tracing::debug!(provider = PROVIDER, route = %route, model = %model.name, "converting request to provider format");

    let body = match route {
        RouteType::Preserve => return Ok(Outbound::Preserved(request.to_vec())),
        RouteType::Chat => decode_request(request)
            .and_then(|request| build_messages_request(&request, model))
            .map(ProviderRequest::Messages),
        RouteType::Completions => decode_request(request)
            .and_then(|request| build_completion_request(&request, model))
            .map(ProviderRequest::Completion),
    }
    .map_err(|source| TransformError::Build {
        provider: PROVIDER,
        route,
        source: Box::new(source),
    })
    .inspect_err(|e| tracing::warn!(error = %e, "request transformation failed"))?;

    Ok(Outbound::Provider {
        body,
        content_type: JSON_CONTENT_TYPE,
    })
}

fn decode_request(raw: &[u8]) -> Result<CanonicalRequest, TransformError> {
    serde_json::from_slice(raw).map_err(TransformError::InvalidRequest)
}

/// Convert a provider response body into a canonical JSON body for `route`
///
/// `preserve` returns the body unchanged.
///
/// # Errors
///
/// `UnsupportedRoute`, `Decode`, `MissingField` or `Normalization`; no
/// partial body is ever returned alongside an error.
pub fn from_format(body: &[u8], model: &ModelConfig, route: &str) -> Result<Vec<u8>, TransformError> {
    let route = parse_route(route).inspect_err(|e| tracing::warn!(error = %e, "rejecting response"))?;

    tracing::debug!(provider = PROVIDER, route = %route, model = %model.name, "converting response from provider format");

    let response = match route {
        RouteType::Preserve => return Ok(body.to_vec()),
        RouteType::Chat => normalize_messages_response(body),
        RouteType::Completions => normalize_completion_response(body),
    }
    .inspect_err(|e| tracing::warn!(error = %e, "response transformation failed"))?;

    serde_json::to_vec(&response).map_err(|e| TransformError::Normalization {
        provider: PROVIDER,
        route,
        reason: e.to_string(),
    })
}
