//! Custom error types for Nexora
//!
//! This module defines the error hierarchy for the local side of the client
//! (configuration, session storage, form validation) using thiserror. Errors
//! raised while talking to the API live in [`crate::client::ClientError`].

use thiserror::Error;

use crate::client::ClientError;
use crate::session::Route;

/// The main error type for Nexora operations
#[derive(Error, Debug)]
pub enum NexoraError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for form input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Token storage errors
    #[error("Session storage error: {0}")]
    Storage(String),

    /// Invalid session state transition
    #[error("Session error: {0}")]
    Session(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// API errors
    #[error(transparent)]
    Api(#[from] ClientError),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl NexoraError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for wallets
    pub fn wallet_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Wallet",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if the session ended and the user must log in again
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Api(err) if err.is_session_expired())
    }

    /// Login route to show when this error ended the session
    pub fn redirect(&self) -> Option<Route> {
        match self {
            Self::Api(err) => err.redirect(),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NexoraError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for NexoraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Nexora operations
pub type NexoraResult<T> = Result<T, NexoraError>;
