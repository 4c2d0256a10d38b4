//! # Web Library
//!
//! Registration/login flow, HTTP handlers, middleware and server startup.

pub mod handlers;
pub mod middleware;
pub mod services;
pub mod server;

pub use server::{create_router, start_server, AppState, ServerConfig};
pub use services::AuthService;
