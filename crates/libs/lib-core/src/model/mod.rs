//! # Model Layer
//!
//! Persistence for users and sessions.

pub mod store;
