//! # Services
//!
//! Business flows invoked by the HTTP handlers.

pub mod auth;

pub use auth::AuthService;
