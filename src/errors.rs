//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion into the uniform
//! `{success, error: {code, message}}` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("You must be signed in")]
    Unauthorized,

    #[error("Admin access required")]
    Forbidden,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("You have already applied to this event")]
    DuplicateApplication,

    // Validation
    #[error("{0}")]
    Validation(String),

    // Operation-scoped storage failures. The cause is logged
    // server-side only; the client sees a generic message.
    #[error("Failed to fetch data")]
    Fetch(#[source] sea_orm::DbErr),

    #[error("Failed to create record")]
    Create(#[source] sea_orm::DbErr),

    #[error("Failed to update record")]
    Update(#[source] sea_orm::DbErr),

    #[error("Failed to delete record")]
    Delete(#[source] sea_orm::DbErr),

    #[error("Invalid or expired session")]
    Session(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error envelope body: `{success: false, error: {code, message}}`
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::NotFound => "NOT_FOUND",
            AppError::DuplicateApplication => "DUPLICATE_APPLICATION",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Fetch(_) => "FETCH_ERROR",
            AppError::Create(_) => "CREATE_ERROR",
            AppError::Update(_) => "UPDATE_ERROR",
            AppError::Delete(_) => "DELETE_ERROR",
            AppError::Session(_) => "UNAUTHORIZED",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::Session(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::DuplicateApplication | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Fetch(_)
            | AppError::Create(_)
            | AppError::Update(_)
            | AppError::Delete(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Fetch(e)
            | AppError::Create(e)
            | AppError::Update(e)
            | AppError::Delete(e) => {
                tracing::error!("Database error: {:?}", e);
                self.to_string()
            }
            AppError::Session(e) => {
                tracing::warn!("Session verification failed: {:?}", e);
                "Invalid or expired session".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            success: false,
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Translate an insert failure, mapping a violation of the
    /// (user_id, event_id) uniqueness constraint to the duplicate
    /// outcome. The pre-insert check is advisory; this constraint is
    /// the authoritative guard under concurrent submissions.
    pub fn from_insert(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateApplication,
            _ => AppError::Create(err),
        }
    }
}
