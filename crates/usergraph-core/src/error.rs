//! Unified error type for all layers of the service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for UserGraph.
///
/// The service performs no domain-level recovery: anything the graph
/// database reports ends up in [`UserGraphError::Database`] and is passed
/// to the caller unchanged.
#[derive(Error, Debug)]
pub enum UserGraphError {
    /// Graph database error (connectivity, constraint violation, bad statement, decoding)
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl UserGraphError {
    /// Returns the HTTP status code for this error.
    ///
    /// Every variant is a server-side failure; malformed requests are
    /// rejected by the transport before reaching the service.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a database error.
    #[must_use]
    pub fn database<T: Into<String>>(message: T) -> Self {
        Self::Database(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "neo4j")]
impl From<neo4rs::Error> for UserGraphError {
    fn from(err: neo4rs::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for UserGraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {err}"))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `UserGraphError`.
    #[must_use]
    pub fn from_error(error: &UserGraphError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<&UserGraphError> for ErrorResponse {
    fn from(error: &UserGraphError) -> Self {
        Self::from_error(error)
    }
}
