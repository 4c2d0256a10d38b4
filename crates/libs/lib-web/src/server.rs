//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! [`start_server`] wires logging, configuration, the SQLite pool and the
//! auth service together; [`create_router`] builds the Axum router and is
//! also what the handler tests drive.

// region: --- Imports
use crate::handlers;
use crate::middleware::{log_requests, stamp_req, RequestStamp};
use crate::services::AuthService;
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use lib_core::{create_pool, AppError, Config, DbPool, MIGRATOR};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
// endregion: --- Imports

/// Header carrying the session token on authenticated requests.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// How long browsers may cache a CORS preflight answer.
const CORS_MAX_AGE: Duration = Duration::from_secs(86_400);

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(db: DbPool, config: &Config) -> Self {
        let auth = AuthService::from_config(db.clone(), config);
        Self { db, auth }
    }
}

impl axum::extract::FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3001")
    pub bind_address: String,
    /// Allowed CORS origins; `"*"` allows any origin
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3001".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - The tracing subscriber cannot be installed
/// - Configuration loading or validation fails
/// - Database connection or migrations fail
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let log_level = init_tracing()?;

    info!(" FORUM AUTH SERVICE STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    app_config.validate().map_err(|e| anyhow::anyhow!(e))?;

    info!("Database URL: {}", app_config.database_url);
    info!("Session lifetime: {} days", app_config.session_ttl_days);

    // Ensure data directory exists for SQLite database
    if let Some(db_path) = app_config.database_url.strip_prefix("sqlite:") {
        let db_path = db_path.trim_start_matches("//");
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                info!("Created database directory: {:?}", parent);
            }
        }
    }

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;

    info!(" Running database migrations...");
    MIGRATOR.run(&pool).await?;
    info!(" Migrations complete");

    let state = AppState::new(pool, &app_config);
    let app = create_router(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;

    Ok(())
}

/// Install the global subscriber. `LOG_LEVEL` picks the level, default `info`.
fn init_tracing() -> anyhow::Result<String> {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            tracing_subscriber::EnvFilter::new(&log_level)
        }
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    Ok(log_level)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(SESSION_TOKEN_HEADER),
        ])
        .max_age(CORS_MAX_AGE);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    cors.allow_origin(origins)
}

/// Build the application router.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    info!("[ROUTE SETUP] Registering HTTP routes...");

    Router::new()
        .route(
            "/api/auth",
            post(handlers::auth::auth).fallback(handlers::auth::method_not_allowed),
        )
        .route(
            "/api/auth/register",
            post(handlers::auth::register).fallback(handlers::auth::method_not_allowed),
        )
        .route(
            "/api/auth/login",
            post(handlers::auth::login).fallback(handlers::auth::method_not_allowed),
        )
        .route("/health", get(handlers::health::health))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            AppError::NotFound("Route not found".to_string())
        })
        .with_state(state)
        .layer(axum::middleware::from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                })
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: Duration,
                     _span: &tracing::Span| {
                        tracing::error!(
                            error = ?error,
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE]"
                        );
                    },
                ),
        )
        // Outermost of the request-scoped layers so the stamp is visible to the two above
        .layer(axum::middleware::from_fn(stamp_req))
        .layer(cors_layer(allowed_origins))
}

fn log_server_info() {
    info!(" AUTH:");
    info!("   • POST /api/auth            {{\"action\": \"register\" | \"login\", ...}}");
    info!("   • POST /api/auth/register");
    info!("   • POST /api/auth/login");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
