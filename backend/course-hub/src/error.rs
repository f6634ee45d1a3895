/// Error types for course-hub
///
/// Every failure is rendered as the `{ success: false, message }` envelope.
/// Store and internal failures log their detail and return a generic message.
use actix_middleware::AuthError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;
use thiserror::Error;

/// Result type for course-hub operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Record kinds named in ownership failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Post,
    Course,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Post => f.write_str("Post"),
            Resource::Course => f.write_str("Course"),
        }
    }
}

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid credentials
    #[error(transparent)]
    Unauthenticated(#[from] AuthError),

    /// A required field is empty or a field failed to parse
    #[error("{0}")]
    Validation(String),

    /// Compound id+owner lookup missed: no such record, or not the caller's
    #[error("{0} not found or user not authorised")]
    NotFoundOrDenied(Resource),

    /// Caller is already in the course's learner set
    #[error("Cannot rating")]
    AlreadyRated,

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// Persistence failure
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message exposed to clients
    fn public_message(&self) -> String {
        match self {
            AppError::Database(_) | AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated(_)
            | AppError::NotFoundOrDenied(_)
            | AppError::AlreadyRated => StatusCode::UNAUTHORIZED,
            AppError::Validation(_)
            | AppError::InvalidCredentials
            | AppError::Conflict(_)
            | AppError::NotFound(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "request failed: {}", self);
        }

        HttpResponse::build(status).json(serde_json::json!({
            "success": false,
            "message": self.public_message(),
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}
