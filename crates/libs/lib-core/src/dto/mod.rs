//! # Data Transfer Objects (DTOs)
//!
//! Request and response bodies of the auth HTTP endpoints.

pub mod auth;

pub use auth::*;
