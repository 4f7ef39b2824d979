//! Connection configuration.
//!
//! A `Config` is built once at startup and handed to `HinemosClient::new`.
//! Credentials are immutable after construction and reused verbatim on
//! every re-authentication.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Timeout must be greater than zero")]
    InvalidTimeout,
}

/// Login credentials for the Hinemos manager.
#[derive(Clone)]
pub struct Credentials {
    pub user_id: String,
    password: String,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// Password stays out of logs and panics.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: Url,
    pub credentials: Credentials,
    pub timeout: Duration,
}

impl Config {
    /// Validate and build a configuration.
    ///
    /// `endpoint` is the manager base URL, e.g. `http://manager:8080`.
    /// A trailing slash is ignored.
    pub fn new(endpoint: &str, user_id: &str, password: &str) -> Result<Self, ConfigError> {
        let endpoint = parse_endpoint(endpoint)?;
        if user_id.trim().is_empty() {
            return Err(ConfigError::Missing("user id"));
        }
        if password.is_empty() {
            return Err(ConfigError::Missing("password"));
        }

        Ok(Self {
            endpoint,
            credentials: Credentials::new(user_id.trim(), password),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.endpoint.as_str().trim_end_matches('/')
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::Missing("endpoint"));
    }
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidEndpoint {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEndpoint {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let config = Config::new("http://manager:8080/", "hinemos", "secret").unwrap();
        assert_eq!(config.base_url(), "http://manager:8080");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_rejects_missing_values() {
        assert!(matches!(
            Config::new("", "hinemos", "secret"),
            Err(ConfigError::Missing("endpoint"))
        ));
        assert!(matches!(
            Config::new("http://manager:8080", "  ", "secret"),
            Err(ConfigError::Missing("user id"))
        ));
        assert!(matches!(
            Config::new("http://manager:8080", "hinemos", ""),
            Err(ConfigError::Missing("password"))
        ));
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        assert!(matches!(
            Config::new("manager:8080", "hinemos", "secret"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            Config::new("ftp://manager", "hinemos", "secret"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = Config::new("http://manager:8080", "hinemos", "secret").unwrap();
        assert!(matches!(
            config.with_timeout(Duration::ZERO),
            Err(ConfigError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("hinemos", "topsecret");
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("topsecret"));
        assert!(printed.contains("hinemos"));
    }
}
