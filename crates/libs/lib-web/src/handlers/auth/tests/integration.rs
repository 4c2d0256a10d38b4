//! # Integration Tests
//!
//! Routing edge cases: dispatch, methods, malformed bodies and CORS.

use super::*;
use serde_json::json;

#[tokio::test]
async fn test_register_then_login_twice() {
    let pool = setup_test_db().await;
    let registered = register_alice(&pool).await;
    let user_id = registered["user"]["id"].as_i64().unwrap();

    let mut tokens = Vec::new();
    for _ in 0..2 {
        let (status, body) = post_json(
            test_app(pool.clone()),
            "/api/auth",
            json!({ "action": "login", "username": "a@x.com", "password": "secret1" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        tokens.push(body["session_token"].as_str().unwrap().to_string());
    }

    assert_ne!(tokens[0], tokens[1]);
    let repo = SessionRepository::new(pool);
    assert_eq!(repo.count_for_user(user_id).await.unwrap(), 3);
}

#[tokio::test]
async fn test_unknown_action_is_method_not_allowed() {
    let pool = setup_test_db().await;

    let (status, body) = post_json(
        test_app(pool),
        "/api/auth",
        json!({ "action": "logout", "username": "alice", "password": "secret1" }),
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "Method not allowed");
}

#[tokio::test]
async fn test_get_is_method_not_allowed() {
    let pool = setup_test_db().await;

    for uri in ["/api/auth", "/api/auth/login", "/api/auth/register"] {
        let (status, body) = send(
            test_app(pool.clone()),
            Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        assert_eq!(body["error"], "Method not allowed");
    }
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let pool = setup_test_db().await;

    let (status, body) = send(
        test_app(pool),
        Request::builder()
            .method("POST")
            .uri("/api/auth")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON body");
}

#[tokio::test]
async fn test_cors_preflight() {
    let pool = setup_test_db().await;

    let response = test_app(pool)
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/auth")
                .header("origin", "http://forum.example")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type,x-session-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-max-age"], "86400");
    let allowed = headers["access-control-allow-headers"].to_str().unwrap().to_lowercase();
    assert!(allowed.contains("content-type"));
    assert!(allowed.contains("x-session-token"));
}

#[tokio::test]
async fn test_bare_options_is_ok() {
    let pool = setup_test_db().await;

    let (status, _) = send(
        test_app(pool),
        Request::builder().method("OPTIONS").uri("/api/auth").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_and_unknown_route() {
    let pool = setup_test_db().await;

    let health = test_app(pool.clone())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    let (status, body) = send(
        test_app(pool),
        Request::builder().uri("/nope").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NotFound");
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let pool = setup_test_db().await;
    let app = test_app(pool.clone());
    pool.close().await;

    let (status, body) = send(
        app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "Storage");
    assert_eq!(body["error"], "An internal error occurred");
}
