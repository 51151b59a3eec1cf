//! Configuration for the page fetcher.
//!
//! Values are read from environment variables with development defaults, the
//! same way for every caller. The result is a plain value that is handed to
//! [`HttpFetcher::new`](crate::fetcher::HttpFetcher::new); nothing here is
//! global.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Environment variable names. Public so tests and callers can refer to them.
pub const ENV_USER_AGENT: &str = "CFWATCH_USER_AGENT";
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "CFWATCH_CONNECT_TIMEOUT_SECS";
pub const ENV_TIMEOUT_SECS: &str = "CFWATCH_TIMEOUT_SECS";
pub const ENV_MAX_BODY_BYTES: &str = "CFWATCH_MAX_BODY_BYTES";

/// Default values used when environment variables are absent.
const DEFAULT_USER_AGENT: &str = concat!("cfwatch/", env!("CARGO_PKG_VERSION"));
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_BODY_BYTES: u64 = 5 * 1024 * 1024; // 5MB

/// HTTP settings for fetching judge pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    user_agent: String,
    connect_timeout: Duration,
    timeout: Duration,
    max_body_bytes: u64,
}

impl FetcherConfig {
    /// Create a new config explicitly.
    pub fn new(
        user_agent: impl Into<String>,
        connect_timeout: Duration,
        timeout: Duration,
        max_body_bytes: u64,
    ) -> Self {
        Self {
            user_agent: user_agent.into(),
            connect_timeout,
            timeout,
            max_body_bytes,
        }
    }

    /// Load from environment variables, falling back to defaults.
    ///
    /// Numeric variables that are set but do not parse as unsigned integers
    /// are reported as [`ConfigError::InvalidValue`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let user_agent =
            env::var(ENV_USER_AGENT).unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        let connect_timeout = read_u64(ENV_CONNECT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS)?;
        let timeout = read_u64(ENV_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS)?;
        let max_body_bytes = read_u64(ENV_MAX_BODY_BYTES, DEFAULT_MAX_BODY_BYTES)?;

        Ok(Self {
            user_agent,
            connect_timeout: Duration::from_secs(connect_timeout),
            timeout: Duration::from_secs(timeout),
            max_body_bytes,
        })
    }

    /// `User-Agent` header sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
    /// Time allowed for establishing the connection.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
    /// Time allowed for the whole request, body included.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
    /// Largest body accepted before the fetch is aborted.
    pub fn max_body_bytes(&self) -> u64 {
        self.max_body_bytes
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_USER_AGENT,
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            DEFAULT_MAX_BODY_BYTES,
        )
    }
}

fn read_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
            field: key,
            reason: format!("{raw:?}: {e}"),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
