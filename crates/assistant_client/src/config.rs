use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Environment variable holding the backend base address.
pub const API_URL_ENV: &str = "ASSISTANT_API_URL";
/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid backend address {value:?}: {reason}")]
    InvalidBaseUrl { value: String, reason: String },
    #[error("unsupported backend scheme {0:?}; use http or https")]
    UnsupportedScheme(String),
    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,
}

/// Client settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    poll_interval: Duration,
    pub connect_timeout: Duration,
    /// Uploads block until the backend has indexed everything, so this is long.
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            poll_interval: DEFAULT_POLL_INTERVAL,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        })
    }

    /// Picks the base address from `explicit`, then [`API_URL_ENV`], then
    /// [`DEFAULT_BASE_URL`].
    pub fn resolve(explicit: Option<&str>) -> Result<Self, ConfigError> {
        let from_env = std::env::var(API_URL_ENV).ok();
        Self::new(pick_base_url(explicit, from_env.as_deref()))
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        self.poll_interval = interval;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn pick_base_url<'a>(explicit: Option<&'a str>, from_env: Option<&'a str>) -> &'a str {
    explicit
        .or(from_env)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|err| ConfigError::InvalidBaseUrl {
        value: raw.to_string(),
        reason: err.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_value_wins_over_environment() {
        assert_eq!(
            pick_base_url(Some("http://cli:1"), Some("http://env:2")),
            "http://cli:1"
        );
        assert_eq!(pick_base_url(None, Some("http://env:2")), "http://env:2");
        assert_eq!(pick_base_url(None, None), DEFAULT_BASE_URL);
        assert_eq!(pick_base_url(None, Some("  ")), DEFAULT_BASE_URL);
    }

    #[test]
    fn trailing_slashes_are_dropped_from_endpoints() {
        let config = ClientConfig::new("https://rag.example.com/api/").unwrap();
        assert_eq!(config.base_url(), "https://rag.example.com/api");
        assert_eq!(config.endpoint("/ask/"), "https://rag.example.com/api/ask/");
        assert_eq!(config.endpoint("status"), "https://rag.example.com/api/status");
    }

    #[test]
    fn rejects_unusable_addresses() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert_eq!(
            ClientConfig::new("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme("ftp".to_string()))
        );
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let config = ClientConfig::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(config.poll_interval(), DEFAULT_POLL_INTERVAL);
        assert_eq!(
            config.with_poll_interval(Duration::ZERO),
            Err(ConfigError::ZeroPollInterval)
        );
    }
}
