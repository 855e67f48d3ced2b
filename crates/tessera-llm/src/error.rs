use http::StatusCode;
use tessera_core::HttpError;
use thiserror::Error;

use crate::route::RouteType;

/// Errors raised while converting between canonical and provider formats
///
/// Every variant reachable from the public entry points names the provider
/// and route so failures are diagnosable from the message alone.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Neither or both of `prompt`/`messages` supplied
    #[error("{0}")]
    MissingInput(&'static str),

    /// Request body is not a canonical request
    #[error("request is not a valid canonical request: {0}")]
    InvalidRequest(#[source] serde_json::Error),

    /// Route type not recognized for this provider
    #[error("no transformer available for {provider}://{route}")]
    UnsupportedRoute { provider: &'static str, route: String },

    /// Provider payload is not valid JSON
    #[error("failed to decode {provider}://{route} response: {source}")]
    Decode {
        provider: &'static str,
        route: RouteType,
        #[source]
        source: serde_json::Error,
    },

    /// Discriminating field absent; the payload is most likely an upstream error body
    #[error("'{field}' not in {provider}://{route} response")]
    MissingField {
        provider: &'static str,
        route: RouteType,
        field: &'static str,
    },

    /// Request assembly failed
    #[error("failed to transform {route} to {provider} format: {source}")]
    Build {
        provider: &'static str,
        route: RouteType,
        #[source]
        source: Box<TransformError>,
    },

    /// Unexpected shape while assembling the canonical response
    #[error("transformation failed from type {provider}://{route}: {reason}")]
    Normalization {
        provider: &'static str,
        route: RouteType,
        reason: String,
    },
}

impl HttpError for TransformError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingInput(_) | Self::InvalidRequest(_) | Self::Build { .. } => StatusCode::BAD_REQUEST,
            Self::UnsupportedRoute { .. } => StatusCode::NOT_FOUND,
            Self::Decode { .. } | Self::MissingField { .. } | Self::Normalization { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::MissingInput(_) | Self::InvalidRequest(_) | Self::Build { .. } => "invalid_request_error",
            Self::UnsupportedRoute { .. } => "not_found_error",
            Self::Decode { .. } | Self::MissingField { .. } | Self::Normalization { .. } => "upstream_error",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

/// Errors raised by the driver around a transform: routing, auth, transport
#[derive(Debug, Error)]
pub enum DriverError {
    /// Request or response conversion failed
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Driver cannot be set up from the given configuration
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Upstream could not be reached
    #[error("request to ai service failed: {0}")]
    Transport(String),

    /// Upstream answered with a non-success status
    #[error("upstream returned status {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl HttpError for DriverError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Transform(e) => e.status_code(),
            Self::Configuration(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Transport(_) => StatusCode::BAD_GATEWAY,
            Self::Upstream { status, .. } => *status,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Transform(e) => e.error_type(),
            Self::Configuration(_) | Self::Internal(_) => "internal_error",
            Self::Transport(_) | Self::Upstream { .. } => "upstream_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Configuration(_) | Self::Internal(_) => "an internal error occurred".to_owned(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_error_names_route_and_cause() {
        let err = TransformError::Build {
            provider: "anthropic",
            route: RouteType::Chat,
            source: Box::new(TransformError::MissingInput("request is missing .messages")),
        };

        assert_eq!(
            err.to_string(),
            "failed to transform llm/v1/chat to anthropic format: request is missing .messages"
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_field_is_upstream_error() {
        let err = TransformError::MissingField {
            provider: "anthropic",
            route: RouteType::Completions,
            field: "completion",
        };

        assert_eq!(err.to_string(), "'completion' not in anthropic://llm/v1/completions response");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_type(), "upstream_error");
    }

    #[test]
    fn driver_hides_internal_details() {
        let err = DriverError::Configuration("bad header value for x-api-key".to_owned());
        assert_eq!(err.client_message(), "an internal error occurred");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn driver_passes_upstream_status_through() {
        let err = DriverError::Upstream {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "rate limited".to_owned(),
        };
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.error_type(), "upstream_error");
    }
}
