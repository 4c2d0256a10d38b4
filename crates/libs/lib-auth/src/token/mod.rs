//! # Session Tokens
//!
//! Opaque bearer tokens bound to a user and an expiry.
//!
//! A token is handed back to the caller only after the [`SessionStore`] has
//! acknowledged the write. There is no revocation or refresh; a session lives
//! until its `expires_at`, and any number of sessions may exist per user.

use crate::error::{Error, Result, StoreError};
use crate::rng::SecureRandom;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use lib_utils::{b64u_encode, Clock};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Random bytes per token before encoding (43 base64url chars).
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Default session lifetime.
pub const SESSION_TTL_DAYS: i64 = 30;

/// Persistence boundary for session records.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Durably record a new session. Must not return before the write is acknowledged.
    async fn create_session(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> std::result::Result<(), StoreError>;
}

/// An issued session token.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    value: String,
    user_id: i64,
    expires_at: DateTime<Utc>,
}

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("value", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Mints session tokens and persists them through a [`SessionStore`].
#[derive(Clone)]
pub struct SessionIssuer {
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    rng: Arc<dyn SecureRandom>,
    ttl: Duration,
}

impl SessionIssuer {
    pub fn new(
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        rng: Arc<dyn SecureRandom>,
    ) -> Self {
        Self {
            store,
            clock,
            rng,
            ttl: Duration::days(SESSION_TTL_DAYS),
        }
    }

    /// Override the session lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a new session for `user_id`.
    ///
    /// # Errors
    ///
    /// [`Error::SessionPersistence`] if the store write fails. Nothing is retried
    /// and no token is returned.
    pub async fn issue_session(&self, user_id: i64) -> Result<SessionToken> {
        let value = b64u_encode(self.rng.bytes(SESSION_TOKEN_BYTES));
        let expires_at = self.clock.now() + self.ttl;

        self.store
            .create_session(user_id, &value, expires_at)
            .await
            .map_err(|e| {
                warn!(user_id, error = %e, "session write failed, no token issued");
                Error::SessionPersistence(e)
            })?;

        debug!(user_id, %expires_at, "session issued");

        Ok(SessionToken {
            value,
            user_id,
            expires_at,
        })
    }
}
