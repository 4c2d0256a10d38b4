//! # HTTP Request Handlers
//!
//! Axum handlers organized by feature domain. Handlers parse the request,
//! delegate to [`crate::services`] and map results onto status codes.
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: Registration and login
//!   - `POST /api/auth` - Combined endpoint dispatching on `action`
//!   - `POST /api/auth/register` - Create an account
//!   - `POST /api/auth/login` - Authenticate with username or email
//!
//! - **[`health`]**: Liveness
//!   - `GET /health` - `OK` when the database answers
//!
//! ## Error Handling
//!
//! Handlers return `Result<T, AppError>`; [`lib_core::AppError`] renders as
//! `{"error": "...", "code": "..."}` with the matching status.

pub mod auth;
pub mod health;
