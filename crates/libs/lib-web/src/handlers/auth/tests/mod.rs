//! # Auth Handler Tests
//!
//! Drive the full router over an in-memory database.

mod integration;

use crate::server::{create_router, AppState};
use crate::services::AuthService;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use lib_auth::{CredentialCodec, OsRandom, SessionIssuer};
use lib_core::model::store::SessionRepository;
use lib_core::{DbPool, MIGRATOR};
use lib_utils::{Clock, FixedClock};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

/// Fixed "now" used by every test clock.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Setup test database with schema
pub async fn setup_test_db() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    MIGRATOR.run(&pool).await.expect("Failed to run migrations");

    pool
}

/// Create test app with routes
pub fn test_app(pool: DbPool) -> Router {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(test_now()));
    let store = Arc::new(SessionRepository::new(pool.clone()));
    let issuer = SessionIssuer::new(store, clock.clone(), Arc::new(OsRandom));
    let auth = AuthService::new(pool.clone(), CredentialCodec::default(), issuer, clock);

    let state = AppState { db: pool, auth };

    create_router(state, &["*".to_string()])
}

/// POST a JSON body and return status plus parsed response body.
pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// Send a request and return status plus parsed response body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Register `alice` / `a@x.com` / `secret1` through the combined endpoint.
pub async fn register_alice(pool: &DbPool) -> Value {
    let (status, body) = post_json(
        test_app(pool.clone()),
        "/api/auth",
        serde_json::json!({
            "action": "register",
            "username": "alice",
            "email": "a@x.com",
            "password": "secret1"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}
