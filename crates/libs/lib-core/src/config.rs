//! # Application Configuration
//!
//! Configuration loaded from environment variables and validated on startup
//! to fail fast if misconfigured. The loaded [`Config`] is passed explicitly
//! to whatever needs it; there is no global instance.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `DATABASE_URL` | `sqlite:data/forum.db` | SQLite connection URL |
//! | `SESSION_TTL_DAYS` | `30` | Lifetime of issued session tokens |

use lib_auth::token::SESSION_TTL_DAYS;
use lib_utils::{get_env_or, get_env_parse_or};

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Session token validity period in days.
    ///
    /// Valid range: 1-365
    pub session_ttl_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data/forum.db".to_string(),
            session_ttl_days: SESSION_TTL_DAYS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let database_url = get_env_or("DATABASE_URL", &defaults.database_url);

        let session_ttl_days = get_env_parse_or("SESSION_TTL_DAYS", defaults.session_ttl_days)
            .map_err(|e| format!("SESSION_TTL_DAYS must be a valid number: {}", e))?;

        Ok(Self {
            database_url,
            session_ttl_days,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.database_url.trim().is_empty() {
            return Err("DATABASE_URL must not be empty".to_string());
        }

        if self.session_ttl_days < 1 || self.session_ttl_days > 365 {
            return Err("SESSION_TTL_DAYS must be between 1 and 365".to_string());
        }

        Ok(())
    }

    /// Session lifetime as a duration.
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.session_ttl_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.session_ttl(), chrono::Duration::days(30));
    }

    #[test]
    fn test_validate_ttl_range() {
        let mut config = Config::default();

        config.session_ttl_days = 0;
        assert!(config.validate().is_err());

        config.session_ttl_days = 366;
        assert!(config.validate().is_err());

        config.session_ttl_days = 365;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_database_url() {
        let config = Config {
            database_url: "  ".to_string(),
            ..Config::default()
        };

        assert_eq!(config.validate().unwrap_err(), "DATABASE_URL must not be empty");
    }
}
