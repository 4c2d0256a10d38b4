//! # Health Handler

use axum::extract::State;
use lib_core::{ping, AppError, DbPool};
use tracing::error;

/// `GET /health`: `OK` when the database answers, 500 otherwise.
pub async fn health(State(pool): State<DbPool>) -> Result<&'static str, AppError> {
    ping(&pool).await.map_err(|e| {
        error!(error = %e, "[HEALTH] Database unreachable");
        AppError::from(e)
    })?;
    Ok("OK")
}
