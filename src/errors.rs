//! # Error Handling
//!
//! Two families of errors live here:
//!
//! - [`ApiError`]: request-time failures. Each variant maps to an HTTP status
//!   and a sanitized `{"detail": ...}` body; internal causes are logged with
//!   `tracing` and never sent to clients.
//! - [`SeedError`] and [`ConfigError`]: startup failures. They are fatal and
//!   keep the service from accepting traffic.
//!
//! A malformed numeric filter and an unparsable calorie string are not
//! errors at all: the former is skipped, the latter leaves the recipe out of
//! calorie-filtered results.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// API error type with automatic logging and sanitized responses
#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found - Resource doesn't exist
    NotFound {
        /// Resource type (e.g., "Recipe")
        resource: String,
        /// Requested id, logged but not echoed back
        id: Option<String>,
    },

    /// 422 Unprocessable Entity - query parameters out of their declared bounds
    ValidationFailed {
        /// User-facing validation errors
        errors: Vec<String>,
    },

    /// 500 Internal Server Error - Database error (details logged, not exposed)
    Database {
        /// User-facing generic message
        message: String,
        /// Internal error (logged, not sent to user)
        internal: DbErr,
    },
}

impl ApiError {
    /// Create a 404 Not Found error
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    /// Create a 422 Validation Failed error
    pub fn validation_failed(errors: Vec<String>) -> Self {
        Self::ValidationFailed { errors }
    }

    /// Create a 500 Internal Server Error from a database error
    ///
    /// The database error details are logged but NOT sent to the user.
    #[must_use]
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the user-facing error message (sanitized)
    fn user_message(&self) -> String {
        match self {
            Self::NotFound { resource, .. } => format!("{resource} not found"),
            Self::ValidationFailed { errors } => {
                if errors.len() == 1 {
                    errors[0].clone()
                } else {
                    format!("Validation failed: {}", errors.join(", "))
                }
            }
            Self::Database { message, .. } => message.clone(),
        }
    }

    /// Log internal error details (not sent to user)
    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            Self::NotFound {
                resource,
                id: Some(id),
            } => {
                tracing::debug!(resource = %resource, id = %id, "Resource not found");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

/// `detail` is a list for validation failures and a string otherwise
#[derive(Serialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Errors(Vec<String>),
}

/// Error response sent to users (sanitized)
#[derive(Serialize)]
struct ErrorResponse {
    detail: Detail,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let detail = match self {
            Self::ValidationFailed { errors } => Detail::Errors(errors),
            other => Detail::Message(other.user_message()),
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

/// Failure to load the seed source. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("seed source must be a JSON object mapping keys to recipes, found {found}")]
    InvalidShape { found: &'static str },

    #[error("failed to store seed records: {0}")]
    Database(#[from] DbErr),
}

/// Invalid environment configuration. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}
