//! # Database Store
//!
//! SQLite connection pool, embedded migrations and repository implementations.

// region: --- Modules
pub mod models;
pub mod session_repository;
pub mod user_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use models::{Session, User, UserForCreate};
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::migrate::Migrator;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Schema migrations for `users` and `user_sessions`.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../../migrations");

/// Create a new SQLite connection pool for `database_url`.
///
/// The database file is created if missing. Foreign keys are enforced.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}

/// Round-trip a trivial query to check the database is reachable.
pub async fn ping(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
// endregion: --- Types and Functions
