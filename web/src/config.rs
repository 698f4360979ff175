//! Service configuration.
//!
//! Read once from the environment at startup; the `with_*` setters exist for
//! tests and embedding.

use chrono::Duration;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// An environment variable is set but cannot be parsed.
    #[error("Invalid value for {name}: {value}")]
    InvalidVar {
        /// The variable's name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Runtime configuration for the HTTP service.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    /// How long issued sessions stay valid.
    pub session_ttl: Duration,
}

impl Config {
    /// Build a configuration with defaults for everything but the database.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            session_ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
        }
    }

    /// Read configuration from the environment.
    ///
    /// `DATABASE_URL` is required. `BIND_ADDR` defaults to `0.0.0.0:8000`
    /// and `SESSION_TTL_HOURS` to 24.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] when `DATABASE_URL` is unset, or
    /// [`ConfigError::InvalidVar`] when `SESSION_TTL_HOURS` is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let session_ttl = match std::env::var("SESSION_TTL_HOURS") {
            Ok(raw) => {
                let hours = raw.parse::<i64>().map_err(|_| ConfigError::InvalidVar {
                    name: "SESSION_TTL_HOURS",
                    value: raw.clone(),
                })?;
                Duration::hours(hours)
            }
            Err(_) => Duration::hours(DEFAULT_SESSION_TTL_HOURS),
        };

        Ok(Self {
            database_url,
            bind_addr,
            session_ttl,
        })
    }

    /// Override the bind address.
    #[must_use]
    pub fn with_bind_addr(mut self, bind_addr: impl Into<String>) -> Self {
        self.bind_addr = bind_addr.into();
        self
    }

    /// Override the session time-to-live.
    #[must_use]
    pub const fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::new("postgres://localhost/marketd");
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.session_ttl, Duration::hours(24));
    }

    #[test]
    fn setters_override_defaults() {
        let config = Config::new("postgres://localhost/marketd")
            .with_bind_addr("127.0.0.1:9999")
            .with_session_ttl(Duration::hours(1));
        assert_eq!(config.bind_addr, "127.0.0.1:9999");
        assert_eq!(config.session_ttl, Duration::hours(1));
    }
}
