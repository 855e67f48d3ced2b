use http::StatusCode;
use serde::Serialize;

/// Trait for domain errors that surface to gateway callers
///
/// Implemented by each feature crate's error type. Callers decide how to
/// emit the error (HTTP response, CLI output) from these three facts,
/// which keeps the domain errors free of any transport.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

/// JSON error envelope, `{"error": {"type": ..., "message": ..., "status": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Error details
    pub error: ErrorDetail,
}

/// Inner part of [`ErrorBody`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    /// Machine-readable error type
    #[serde(rename = "type")]
    pub error_type: String,
    /// Client-safe message
    pub message: String,
    /// Numeric HTTP status
    pub status: u16,
}

impl ErrorBody {
    /// Build the envelope for any [`HttpError`]
    pub fn from_error<E: HttpError + ?Sized>(error: &E) -> Self {
        Self {
            error: ErrorDetail {
                error_type: error.error_type().to_owned(),
                message: error.client_message(),
                status: error.status_code().as_u16(),
            },
        }
    }

    /// Serialize the envelope to a JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                r#"{{"error":{{"type":"{}","message":"error serialization failed","status":{}}}}}"#,
                self.error.error_type, self.error.status
            )
        })
    }
}
