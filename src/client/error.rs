//! Client error types

use serde_json::Value;
use thiserror::Error;

use crate::error::NexoraError;
use crate::session::Route;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The session could not be refreshed; the tokens are gone
    #[error("Session expired, log in again ({redirect})")]
    SessionExpired { redirect: Route },

    /// Reading or writing the stored tokens failed
    #[error("Token store error: {0}")]
    TokenStore(String),

    /// A report download failed
    #[error("Export failed: {0}")]
    Export(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Build an error from a status and a raw response body
    pub fn from_body(status: reqwest::StatusCode, body: &[u8]) -> Self {
        let message = error_message(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string())
        });
        Self::from_status(status, message)
    }

    /// Whether the user has to log in again
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired { .. })
    }

    /// Where to send the user, when this error ends the session
    pub fn redirect(&self) -> Option<Route> {
        match self {
            Self::SessionExpired { redirect } => Some(*redirect),
            _ => None,
        }
    }

    /// HTTP status behind this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } => Some(*status),
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<NexoraError> for ClientError {
    fn from(err: NexoraError) -> Self {
        match err {
            NexoraError::Api(inner) => inner,
            other => Self::TokenStore(other.to_string()),
        }
    }
}

/// Pull a human readable message out of an API error body
///
/// Understands `{"detail": "..."}` and field error maps such as
/// `{"username": ["already taken"]}`. Returns `None` for bodies that are
/// not JSON or carry nothing useful.
pub fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;

    match &value {
        Value::Object(map) => {
            if let Some(detail) = map.get("detail").and_then(Value::as_str) {
                return Some(detail.to_string());
            }
            let fields: Vec<String> = map
                .iter()
                .filter_map(|(field, errors)| {
                    let text = match errors {
                        Value::String(s) => s.clone(),
                        Value::Array(items) => items
                            .iter()
                            .filter_map(Value::as_str)
                            .collect::<Vec<_>>()
                            .join(" "),
                        _ => return None,
                    };
                    (!text.is_empty()).then(|| format!("{}: {}", field, text))
                })
                .collect();
            (!fields.is_empty()).then(|| fields.join("; "))
        }
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
