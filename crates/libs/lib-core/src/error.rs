//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used by the
//! repositories, the auth flow and the HTTP layer.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx) - shown to the user as-is
//!    - [`InvalidInput`](AppError::InvalidInput) → 400 Bad Request
//!    - [`InvalidCredentials`](AppError::InvalidCredentials) → 401 Unauthorized
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!    - [`MethodNotAllowed`](AppError::MethodNotAllowed) → 405 Method Not Allowed
//!    - [`Conflict`](AppError::Conflict) → 409 Conflict
//!
//! 2. **Server Errors** (5xx) - logged in full, answered with a generic message
//!    - [`Config`](AppError::Config) → 500
//!    - [`Storage`](AppError::Storage) → 500
//!    - [`Internal`](AppError::Internal) → 500
//!
//! A wrong password and an unknown account both become
//! [`InvalidCredentials`](AppError::InvalidCredentials) with the same message.
//!
//! ## Error Conversion
//!
//! - `From<sqlx::Error>` - unique-constraint violations become `Conflict`
//! - `From<lib_auth::Error>` - malformed stored hashes are `Internal`, failed session writes `Storage`
//! - `From<anyhow::Error>` / `From<serde_json::Error>`

use thiserror::Error;
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use crate::dto::ErrorResponse;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input validation error.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unknown account or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Username or email already taken.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP method or action not supported on this endpoint.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Backing store failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server error (unexpected failures, corrupt data).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Config(_) | AppError::Storage(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For server errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::InvalidCredentials => "Invalid username or password".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::MethodNotAllowed => "Method not allowed".to_string(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::Config(_) | AppError::Storage(_) | AppError::Internal(_) => {
                "An internal error occurred".to_string()
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::InvalidCredentials => "InvalidCredentials",
            AppError::Conflict(_) => "Conflict",
            AppError::NotFound(_) => "NotFound",
            AppError::MethodNotAllowed => "MethodNotAllowed",
            AppError::Storage(_) => "Storage",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Json(ErrorResponse {
            error: message,
            code: self.code().to_string(),
        });

        (status, body).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert `sqlx::Error` to `AppError`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Database record not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("User with this username or email already exists".to_string())
            }
            sqlx::Error::Database(db_err) => {
                AppError::Storage(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Storage(format!("Database error: {}", err)),
        }
    }
}

/// Convert `lib_auth::Error` to `AppError`.
impl From<lib_auth::Error> for AppError {
    fn from(err: lib_auth::Error) -> Self {
        match err {
            lib_auth::Error::MalformedHash(_) => AppError::Internal(err.to_string()),
            lib_auth::Error::SessionPersistence(_) => AppError::Storage(err.to_string()),
        }
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("Invalid JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidInput("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::MethodNotAllowed.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(AppError::Storage("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = AppError::Internal("Malformed password hash: salt is not valid hex".into());
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[test]
    fn test_malformed_hash_is_internal() {
        let err: AppError = lib_auth::Error::MalformedHash("missing '$' delimiter".into()).into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_session_persistence_is_storage() {
        let err: AppError = lib_auth::Error::SessionPersistence(
            lib_auth::StoreError::Backend("gone".into()),
        )
        .into();
        assert!(matches!(err, AppError::Storage(_)));
    }

    #[tokio::test]
    async fn test_response_body_is_error_response() {
        let response = AppError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(
            parsed,
            ErrorResponse {
                error: "Invalid username or password".to_string(),
                code: "InvalidCredentials".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_server_error_body_is_generic() {
        let response = AppError::Storage("disk I/O error at /var/db".into()).into_response();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(parsed.error, "An internal error occurred");
        assert_eq!(parsed.code, "Storage");
    }
}
