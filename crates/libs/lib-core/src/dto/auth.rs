//! # Authentication Data Transfer Objects
//!
//! Request and response bodies of the auth endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/auth` - [`AuthRequest`] (dispatches on `action`) -> [`AuthResponse`]
//! - `POST /api/auth/register` - [`RegisterRequest`] -> [`AuthResponse`] (201)
//! - `POST /api/auth/login` - [`LoginRequest`] -> [`AuthResponse`] (200)
//!
//! Errors use [`ErrorResponse`]: `{"error": ..., "code": ...}`.
//!
//! ## Wire Format
//!
//! ```text
//! POST /api/auth
//! Content-Type: application/json
//!
//! { "action": "login", "username": "alice", "password": "secret1" }
//! ```
//!
//! Response:
//! ```text
//! {
//!   "user": { "id": 1, "username": "alice", "email": "a@x.com", "avatar_url": null,
//!             "created_at": "2024-01-01T00:00:00+00:00" },
//!   "session_token": "q8m3...",
//!   "message": "Login successful"
//! }
//! ```

use crate::model::store::User;
use lib_utils::format_time;
use serde::{Deserialize, Serialize};

/// Body of the combined `POST /api/auth` endpoint.
///
/// Missing fields deserialize as empty so that validation, not JSON parsing,
/// reports them. A missing `action` means `register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login request. `username` may hold either a username or an email.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl From<AuthRequest> for RegisterRequest {
    fn from(req: AuthRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
        }
    }
}

impl From<AuthRequest> for LoginRequest {
    fn from(req: AuthRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
        }
    }
}

/// Public user information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            avatar_url: user.avatar_url.clone(),
            created_at: Some(format_time(user.created_at)),
        }
    }
}

/// Returned on successful registration or login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub user: UserInfo,
    pub session_token: String,
    pub message: String,
}

/// Error body written by [`AppError`](crate::AppError).
///
/// `code` names the error variant, e.g. `InvalidCredentials`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
