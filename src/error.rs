//! Application error taxonomy and HTTP response mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Typed outcomes for every fallible operation in the service.
///
/// Each variant maps to exactly one HTTP status (see the [`IntoResponse`]
/// impl). `Conflict` carries storage uniqueness races on the short code and
/// is normally consumed by the allocator retry loop before it can reach a
/// client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input: invalid URL, bad credentials, policy violation.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The original URL has already been shortened.
    #[error("{message}")]
    Duplicate { message: String, details: Value },

    /// Missing or invalid caller identity.
    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    /// Authenticated, but not allowed to perform the operation.
    #[error("{message}")]
    Forbidden { message: String, details: Value },

    /// Unknown id or short code.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Storage-level uniqueness race (short code, email).
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Code-space collision retries exhausted.
    #[error("{message}")]
    AllocationExhausted { message: String, details: Value },

    /// Transient storage failure; the caller may retry.
    #[error("{message}")]
    Unavailable { message: String, details: Value },

    /// Anything that should never happen.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn duplicate(message: impl Into<String>, details: Value) -> Self {
        Self::Duplicate {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn allocation_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::AllocationExhausted {
            message: message.into(),
            details,
        }
    }
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            // 400 rather than 409, with a distinct code so clients can tell
            // "already shortened" from a malformed request.
            AppError::Duplicate { message, details } => {
                (StatusCode::BAD_REQUEST, "duplicate_url", message, details)
            }
            AppError::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message, details)
            }
            AppError::Forbidden { message, details } => {
                (StatusCode::FORBIDDEN, "forbidden", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::AllocationExhausted { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "allocation_exhausted",
                message,
                details,
            ),
            AppError::Unavailable { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "storage_unavailable",
                message,
                details,
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Classifies a SQLx error into the taxonomy.
///
/// Unique violations become [`AppError::Conflict`] with the constraint name
/// attached; the Pg repositories match specific constraints before falling
/// back to this. Pool and network failures map to the retryable
/// [`AppError::Unavailable`].
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
        return AppError::internal("Database error", json!({}));
    }

    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            AppError::unavailable("Storage temporarily unavailable", json!({}))
        }
        sqlx::Error::RowNotFound => AppError::not_found("Record not found", json!({})),
        _ => AppError::internal("Database error", json!({})),
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&e).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Validation failed", details)
    }
}
