//! # Auth Service
//!
//! Registration and login: validate input, check or derive the password hash,
//! then issue a session.
//!
//! Input rules are enforced here, before the credential codec is reached:
//!
//! - all fields present
//! - username 3-50 characters
//! - email shaped like an address (stored lowercased)
//! - password at least 6 characters
//!
//! An unknown account and a wrong password produce the same
//! [`AppError::InvalidCredentials`], and both spend one KDF pass.

use lib_auth::{CredentialCodec, OsRandom, SecureRandom, SessionIssuer};
use lib_core::dto::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};
use lib_core::model::store::{SessionRepository, User, UserForCreate, UserRepository};
use lib_core::{AppError, Config, DbPool, Result};
use lib_utils::{validate_email, validate_length_range, validate_min_length, Clock, SystemClock};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 50;
pub const PASSWORD_MIN_LEN: usize = 6;

/// Registration and login flow.
#[derive(Clone)]
pub struct AuthService {
    pool: DbPool,
    codec: CredentialCodec,
    issuer: SessionIssuer,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    pub fn new(
        pool: DbPool,
        codec: CredentialCodec,
        issuer: SessionIssuer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            pool,
            codec,
            issuer,
            clock,
        }
    }

    /// Production wiring: OS randomness, system clock, SQLite session store.
    pub fn from_config(pool: DbPool, config: &Config) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let rng: Arc<dyn SecureRandom> = Arc::new(OsRandom);
        let store = Arc::new(SessionRepository::new(pool.clone()));
        let issuer = SessionIssuer::new(store, clock.clone(), rng.clone())
            .with_ttl(config.session_ttl());

        Self::new(pool, CredentialCodec::new(rng), issuer, clock)
    }

    /// Create an account and open its first session.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] when a field fails validation
    /// - [`AppError::Conflict`] when the username or email is taken
    /// - [`AppError::Storage`] when the user or session write fails
    #[instrument(skip_all, fields(username = %req.username.trim()))]
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse> {
        let username = req.username.trim().to_string();
        let email = req.email.trim().to_lowercase();
        let password = req.password;

        validate_registration(&username, &email, &password)?;

        if UserRepository::exists_by_username_or_email(&self.pool, &username, &email).await? {
            warn!("[REGISTER] Username or email already taken");
            return Err(AppError::Conflict(
                "User with this username or email already exists".to_string(),
            ));
        }

        debug!("[REGISTER] Hashing password...");
        let codec = self.codec.clone();
        let password_hash = tokio::task::spawn_blocking(move || codec.hash(&password).to_string())
            .await
            .map_err(|e| AppError::Internal(format!("password hashing task failed: {}", e)))?;

        debug!("[REGISTER] Creating user...");
        let user = UserRepository::create(
            &self.pool,
            UserForCreate::new(username, email, password_hash),
        )
        .await?;

        let session = self.issuer.issue_session(user.id).await?;

        info!(user_id = user.id, "[REGISTER] User created and signed in");

        Ok(AuthResponse {
            user: UserInfo::from(&user),
            session_token: session.into_string(),
            message: "Registration successful".to_string(),
        })
    }

    /// Authenticate by username or email and open a new session.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] when a field is empty
    /// - [`AppError::InvalidCredentials`] for an unknown account or wrong password
    /// - [`AppError::Internal`] when the stored hash is corrupt
    /// - [`AppError::Storage`] when a lookup or the session write fails
    #[instrument(skip_all)]
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse> {
        let identifier = req.username.trim().to_string();
        let password = req.password;

        if identifier.is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput(
                "Enter username or email and password".to_string(),
            ));
        }

        let user = UserRepository::find_by_username_or_email(&self.pool, &identifier).await?;

        let Some(user) = user else {
            let codec = self.codec.clone();
            tokio::task::spawn_blocking(move || codec.verify_dummy(&password))
                .await
                .map_err(|e| AppError::Internal(format!("password check task failed: {}", e)))?;
            warn!("[LOGIN] Unknown account");
            return Err(AppError::InvalidCredentials);
        };

        if !self.check_password(&user, password).await? {
            warn!(user_id = user.id, "[LOGIN] Wrong password");
            return Err(AppError::InvalidCredentials);
        }

        if let Err(e) = UserRepository::mark_online(&self.pool, user.id, self.clock.now()).await {
            warn!(user_id = user.id, error = %e, "[LOGIN] Failed to update presence");
        }

        let session = self.issuer.issue_session(user.id).await?;

        info!(user_id = user.id, "[LOGIN] User authenticated");

        Ok(AuthResponse {
            user: UserInfo::from(&user),
            session_token: session.into_string(),
            message: "Login successful".to_string(),
        })
    }

    async fn check_password(&self, user: &User, password: String) -> Result<bool> {
        let codec = self.codec.clone();
        let stored = user.password_hash.clone();

        let outcome = tokio::task::spawn_blocking(move || codec.verify(&password, &stored))
            .await
            .map_err(|e| AppError::Internal(format!("password check task failed: {}", e)))?;

        outcome.map_err(|e| {
            error!(user_id = user.id, error = %e, "[LOGIN] Stored password hash is corrupt");
            AppError::from(e)
        })
    }
}

fn validate_registration(username: &str, email: &str, password: &str) -> Result<()> {
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AppError::InvalidInput("All fields are required".to_string()));
    }

    validate_length_range(username, USERNAME_MIN_LEN, USERNAME_MAX_LEN, "Username")
        .map_err(AppError::InvalidInput)?;
    validate_email(email).map_err(AppError::InvalidInput)?;
    validate_min_length(password, PASSWORD_MIN_LEN, "Password").map_err(AppError::InvalidInput)?;

    Ok(())
}
