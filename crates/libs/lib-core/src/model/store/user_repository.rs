//! # User Repository
//!
//! Provides database access layer for user-related operations.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{UserRepository, UserForCreate, create_pool};
//! # async fn example() -> anyhow::Result<()> {
//! let pool = create_pool("sqlite:data/forum.db").await?;
//!
//! let user = UserRepository::create(
//!     &pool,
//!     UserForCreate::new("alice".into(), "a@x.com".into(), "<hash>".into()),
//! ).await?;
//!
//! let found = UserRepository::find_by_username_or_email(&pool, "a@x.com").await?;
//! assert_eq!(found.map(|u| u.id), Some(user.id));
//! # Ok(())
//! # }
//! ```

use super::models::{User, UserForCreate, STATUS_ONLINE};
use super::DbPool;
use chrono::{DateTime, Utc};
use sqlx::query_as;

/// User repository for database operations.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by ID.
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user whose username equals `identifier` or whose email equals
    /// `identifier` lowercased.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - matching user
    /// * `Ok(None)` - no user matches
    /// * `Err(sqlx::Error)` - database error occurred
    pub async fn find_by_username_or_email(
        pool: &DbPool,
        identifier: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE username = ? OR email = ? ORDER BY id LIMIT 1")
            .bind(identifier)
            .bind(identifier.to_lowercase())
            .fetch_optional(pool)
            .await
    }

    /// Whether any user already holds `username` or `email`.
    pub async fn exists_by_username_or_email(
        pool: &DbPool,
        username: &str,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        let (count,): (i64,) = query_as("SELECT COUNT(*) FROM users WHERE username = ? OR email = ?")
            .bind(username)
            .bind(email)
            .fetch_one(pool)
            .await?;
        Ok(count > 0)
    }

    /// Create a new user with status `online`.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if:
    /// - Username already exists (UNIQUE constraint violation)
    /// - Email already exists (UNIQUE constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &DbPool, user_data: UserForCreate) -> Result<User, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash, status) VALUES (?, ?, ?, ?)"
        )
        .bind(&user_data.username)
        .bind(&user_data.email)
        .bind(&user_data.password_hash)
        .bind(STATUS_ONLINE)
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();

        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Mark a user online and stamp `last_seen`.
    ///
    /// Succeeds without touching any row if the user does not exist.
    pub async fn mark_online(pool: &DbPool, id: i64, at: DateTime<Utc>) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET status = ?, last_seen = ? WHERE id = ?")
            .bind(STATUS_ONLINE)
            .bind(at)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::model::store::test_support::setup_test_db;
    use chrono::TimeZone;
    use lib_auth::hash_password;

    fn new_user(username: &str, email: &str) -> UserForCreate {
        UserForCreate::new(username.to_string(), email.to_string(), "salt$digest".to_string())
    }

    // ========== User Creation Tests ==========

    #[tokio::test]
    async fn test_create_user() {
        let pool = setup_test_db().await;
        let password_hash = hash_password("secret1").to_string();

        let user = UserRepository::create(
            &pool,
            UserForCreate::new("alice".into(), "a@x.com".into(), password_hash.clone()),
        )
        .await
        .unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.password_hash, password_hash);
        assert_eq!(user.status, "online");
        assert!(user.avatar_url.is_none());
        assert!(user.last_seen.is_none());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email_is_conflict() {
        let pool = setup_test_db().await;

        UserRepository::create(&pool, new_user("user1", "a@x.com")).await.unwrap();
        let err = UserRepository::create(&pool, new_user("user2", "a@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(AppError::from(err), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username_is_conflict() {
        let pool = setup_test_db().await;

        UserRepository::create(&pool, new_user("alice", "a1@x.com")).await.unwrap();
        let err = UserRepository::create(&pool, new_user("alice", "a2@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(AppError::from(err), AppError::Conflict(_)));
    }

    // ========== User Retrieval Tests ==========

    #[tokio::test]
    async fn test_find_by_username_or_email() {
        let pool = setup_test_db().await;
        let created = UserRepository::create(&pool, new_user("alice", "a@x.com")).await.unwrap();

        let by_name = UserRepository::find_by_username_or_email(&pool, "alice").await.unwrap();
        let by_email = UserRepository::find_by_username_or_email(&pool, "a@x.com").await.unwrap();

        assert_eq!(by_name.map(|u| u.id), Some(created.id));
        assert_eq!(by_email.map(|u| u.id), Some(created.id));
    }

    #[tokio::test]
    async fn test_find_by_email_lowercases_identifier() {
        let pool = setup_test_db().await;
        UserRepository::create(&pool, new_user("alice", "a@x.com")).await.unwrap();

        let found = UserRepository::find_by_username_or_email(&pool, "A@X.COM").await.unwrap();

        assert_eq!(found.map(|u| u.username), Some("alice".to_string()));
    }

    #[tokio::test]
    async fn test_find_by_username_or_email_not_found() {
        let pool = setup_test_db().await;

        let found = UserRepository::find_by_username_or_email(&pool, "nobody").await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_exists_by_username_or_email() {
        let pool = setup_test_db().await;
        UserRepository::create(&pool, new_user("alice", "a@x.com")).await.unwrap();

        assert!(UserRepository::exists_by_username_or_email(&pool, "alice", "other@x.com").await.unwrap());
        assert!(UserRepository::exists_by_username_or_email(&pool, "bob", "a@x.com").await.unwrap());
        assert!(!UserRepository::exists_by_username_or_email(&pool, "bob", "b@x.com").await.unwrap());
    }

    // ========== Presence Tests ==========

    #[tokio::test]
    async fn test_mark_online() {
        let pool = setup_test_db().await;
        let user = UserRepository::create(&pool, new_user("alice", "a@x.com")).await.unwrap();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();

        UserRepository::mark_online(&pool, user.id, at).await.unwrap();

        let updated = UserRepository::find_by_id(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(updated.status, "online");
        assert_eq!(updated.last_seen, Some(at));
    }

    #[tokio::test]
    async fn test_mark_online_nonexistent_user() {
        let pool = setup_test_db().await;

        let result = UserRepository::mark_online(&pool, 99999, Utc::now()).await;

        assert!(result.is_ok());
    }
}
