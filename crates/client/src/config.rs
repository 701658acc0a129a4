//! Client configuration from the environment.

use std::time::Duration;

/// Environment variable holding the service base URL.
pub const API_URL_VAR: &str = "EINVOICE_API_URL";
/// Environment variable holding an optional request timeout in seconds.
pub const TIMEOUT_VAR: &str = "EINVOICE_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:5005";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    /// `None` waits for the service indefinitely.
    timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read `EINVOICE_API_URL` and `EINVOICE_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let base_url = std::env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let timeout = std::env::var(TIMEOUT_VAR).ok();
        Self::from_parts(&base_url, timeout.as_deref())
    }

    fn from_parts(base_url: &str, timeout_secs: Option<&str>) -> Self {
        let config = Self::new(base_url);
        match timeout_secs.map(|raw| (raw, raw.trim().parse::<u64>())) {
            None => config,
            Some((_, Ok(secs))) if secs > 0 => config.with_timeout(Duration::from_secs(secs)),
            Some((raw, _)) => {
                tracing::warn!(value = %raw, "{} is not a positive integer; no timeout", TIMEOUT_VAR);
                config
            }
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(ClientConfig::new("http://svc:5005/").base_url(), "http://svc:5005");
    }

    #[test]
    fn timeout_parsing() {
        assert_eq!(ClientConfig::from_parts("http://a", None).timeout(), None);
        assert_eq!(
            ClientConfig::from_parts("http://a", Some("30")).timeout(),
            Some(Duration::from_secs(30))
        );
        assert_eq!(ClientConfig::from_parts("http://a", Some("0")).timeout(), None);
        assert_eq!(ClientConfig::from_parts("http://a", Some("soon")).timeout(), None);
    }

    #[test]
    fn default_points_at_local_service() {
        assert_eq!(ClientConfig::default().base_url(), DEFAULT_API_URL);
    }
}
