//! # Session Repository
//!
//! SQLite implementation of [`SessionStore`] plus the maintenance queries
//! used by the `purge-sessions` utility.

use super::models::Session;
use super::DbPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lib_auth::{SessionStore, StoreError};
use sqlx::query_as;

/// Session persistence backed by the `user_sessions` table.
#[derive(Clone, Debug)]
pub struct SessionRepository {
    pool: DbPool,
}

impl SessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Look up a session by its token.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<Session>, sqlx::Error> {
        query_as::<_, Session>("SELECT * FROM user_sessions WHERE session_token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
    }

    /// Number of sessions held by a user, expired or not.
    pub async fn count_for_user(&self, user_id: i64) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = query_as("SELECT COUNT(*) FROM user_sessions WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Number of sessions whose expiry is at or before `now`.
    pub async fn count_expired(&self, now: DateTime<Utc>) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = query_as("SELECT COUNT(*) FROM user_sessions WHERE expires_at <= ?")
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Delete every session whose expiry is at or before `now`.
    ///
    /// Returns the number of rows deleted.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn create_session(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO user_sessions (user_id, session_token, expires_at) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(token)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    StoreError::Conflict("session token already exists".to_string())
                }
                other => StoreError::Backend(other.to_string()),
            })?;
        Ok(())
    }
}
