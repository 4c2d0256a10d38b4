//! # Authentication Handlers
//!
//! HTTP request handlers for the auth endpoints.
//!
//! ## Overview
//!
//! - `POST /api/auth` dispatches on the `action` field (`register` when absent)
//! - `POST /api/auth/register` creates an account and returns `201`
//! - `POST /api/auth/login` accepts a username or email and returns `200`
//!
//! Any other method on these paths, and any unknown `action`, yields `405`.
//! CORS preflights are answered by the router's CORS layer.
//! Bodies that are not valid JSON yield `400`. Both successes carry the
//! public user fields and a fresh session token.
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{Router, routing::post};
//! use lib_web::handlers::auth::{register, login};
//! use lib_web::AuthService;
//!
//! let app: Router<AuthService> = Router::new()
//!     .route("/register", post(register))
//!     .route("/login", post(login));
//! ```

use crate::services::AuthService;
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
};
use lib_core::dto::{AuthRequest, AuthResponse, LoginRequest, RegisterRequest};
use lib_core::AppError;
use tracing::{info, instrument, warn};

type AuthResult = Result<(StatusCode, Json<AuthResponse>), AppError>;

/// Combined endpoint: `{"action": "register" | "login", ...}`.
#[instrument(skip_all)]
pub async fn auth(
    State(service): State<AuthService>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> AuthResult {
    let Json(req) = payload.map_err(reject_body)?;
    let action = req.action.clone().unwrap_or_else(|| "register".to_string());

    info!(action = %action, "[AUTH] Request received");

    match action.as_str() {
        "register" => register_inner(&service, req.into()).await,
        "login" => login_inner(&service, req.into()).await,
        other => {
            warn!(action = %other, "[AUTH] Unsupported action");
            Err(AppError::MethodNotAllowed)
        }
    }
}

/// Registration endpoint.
///
/// # Returns
///
/// * `201` with [`AuthResponse`] on success
/// * `400` on invalid input, `409` when the username or email is taken
#[instrument(skip_all)]
pub async fn register(
    State(service): State<AuthService>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult {
    let Json(req) = payload.map_err(reject_body)?;
    register_inner(&service, req).await
}

/// Login endpoint.
///
/// # Returns
///
/// * `200` with [`AuthResponse`] on success
/// * `400` when a field is empty, `401` on bad credentials
#[instrument(skip_all)]
pub async fn login(
    State(service): State<AuthService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult {
    let Json(req) = payload.map_err(reject_body)?;
    login_inner(&service, req).await
}

/// Any method the auth routes do not serve.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

async fn register_inner(service: &AuthService, req: RegisterRequest) -> AuthResult {
    let response = service.register(req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login_inner(service: &AuthService, req: LoginRequest) -> AuthResult {
    let response = service.login(req).await?;
    Ok((StatusCode::OK, Json(response)))
}

fn reject_body(rejection: JsonRejection) -> AppError {
    warn!(error = %rejection.body_text(), "[AUTH] Rejected request body");
    AppError::InvalidInput("Invalid JSON body".to_string())
}

#[cfg(test)]
mod tests;
