//! Server configuration parsed from environment variables.
//!
//! Recognized variables:
//! - `PORT`: listen port, default 3000
//! - `IAM_API_URL`: upstream IAM backend; when unset or blank the server
//!   answers `/api/*` itself from demo fixtures
//! - `IAM_PROXY_TIMEOUT_SECS`: upstream request timeout, default 30

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0:?}")]
    InvalidPort(String),
    #[error("invalid IAM_PROXY_TIMEOUT_SECS: {0:?}")]
    InvalidTimeout(String),
    #[error("IAM_API_URL must start with http:// or https://, got {0:?}")]
    InvalidUpstream(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Base URL of the IAM backend, without a trailing slash.
    pub upstream: Option<String>,
    pub proxy_timeout: Duration,
}

impl ServerConfig {
    /// Build the config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first malformed variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first malformed variable.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match non_blank(get("PORT")) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match non_blank(get("IAM_PROXY_TIMEOUT_SECS")) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => DEFAULT_PROXY_TIMEOUT_SECS,
        };

        let upstream = match non_blank(get("IAM_API_URL")) {
            Some(raw) if raw.starts_with("http://") || raw.starts_with("https://") => {
                Some(raw.trim_end_matches('/').to_owned())
            }
            Some(raw) => return Err(ConfigError::InvalidUpstream(raw)),
            None => None,
        };

        Ok(Self { port, upstream, proxy_timeout: Duration::from_secs(timeout_secs) })
    }

    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.upstream.is_none()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}
