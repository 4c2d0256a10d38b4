//! # Authentication Library
//!
//! Password hashing and verification, and session token issuance.
//!
//! - [`pwd`]: [`CredentialCodec`] derives and verifies salted PBKDF2-HMAC-SHA256 hashes.
//! - [`token`]: [`SessionIssuer`] mints bearer tokens and persists them through a [`SessionStore`].
//! - [`rng`]: the [`SecureRandom`] source both of them draw from.

pub mod error;
pub mod pwd;
pub mod rng;
pub mod token;

// Re-export commonly used types
pub use error::{Error, Result, StoreError};
pub use pwd::{hash_password, verify_password, CredentialCodec, PasswordHash};
pub use rng::{OsRandom, SecureRandom};
pub use token::{SessionIssuer, SessionStore, SessionToken};
