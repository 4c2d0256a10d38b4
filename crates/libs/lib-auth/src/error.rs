//! # Auth Errors
//!
//! A wrong password is not an error: [`CredentialCodec::verify`](crate::CredentialCodec::verify)
//! returns `Ok(false)`. Only corrupt stored data and failed writes use this channel.

use thiserror::Error;

/// Convenience type alias for `Result<T, lib_auth::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The stored password hash could not be parsed. This is a data-integrity
    /// problem and must never be reported to the end user as a failed login.
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),

    /// The session store rejected or failed the write; no token was issued.
    #[error("Session persistence failed: {0}")]
    SessionPersistence(#[source] StoreError),
}

/// Failure reported by a [`SessionStore`](crate::SessionStore) implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the record.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The backing store is unavailable or failed the write.
    #[error("Storage error: {0}")]
    Backend(String),
}
