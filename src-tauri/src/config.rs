use std::time::Duration;

use tracing::{info, warn};
use url::Url;

use crate::error::ExoError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Preference key (in `preferences.json`) that overrides the API base URL.
pub const BASE_URL_PREFERENCE: &str = "api_base_url";

const BASE_URL_ENV: &str = "EXOSCOPE_API_BASE_URL";
const TIMEOUT_ENV: &str = "EXOSCOPE_TIMEOUT_SECS";
const SESSION_STORE_ENV: &str = "EXOSCOPE_SESSION_STORE";

/// Where the session is kept between launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    /// OS keychain.
    Keyring,
    /// `session.json` in the user data directory, for machines without a
    /// usable keychain.
    File,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub page_size: u32,
    pub session_backend: SessionBackend,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
            session_backend: SessionBackend::Keyring,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `EXOSCOPE_API_BASE_URL`, `EXOSCOPE_TIMEOUT_SECS`
    /// and `EXOSCOPE_SESSION_STORE`.
    pub fn from_env() -> Result<Self, ExoError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ExoError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(BASE_URL_ENV).filter(|s| !s.trim().is_empty()) {
            config.base_url = parse_base_url(&raw)?;
            info!("API base URL from {}: {}", BASE_URL_ENV, config.base_url);
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!("Ignoring invalid {} value: {:?}", TIMEOUT_ENV, raw),
            }
        }

        if let Some(raw) = lookup(SESSION_STORE_ENV) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "keyring" => config.session_backend = SessionBackend::Keyring,
                "file" => config.session_backend = SessionBackend::File,
                _ => warn!("Ignoring invalid {} value: {:?}", SESSION_STORE_ENV, raw),
            }
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ExoError> {
        self.base_url = parse_base_url(raw)?;
        Ok(self)
    }
}

/// Parse and validate an API base URL. Only http(s) URLs with a host are accepted.
pub fn parse_base_url(raw: &str) -> Result<Url, ExoError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ExoError::Config(format!("Invalid API base URL '{}': {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ExoError::Config(format!(
            "API base URL must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(ExoError::Config(format!("API base URL has no host: {}", raw)));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.page_size, 100);
    }

    #[test]
    fn test_env_overrides_base_url_and_timeout() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("EXOSCOPE_API_BASE_URL", "https://api.example.org/v1"),
            ("EXOSCOPE_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.as_str(), "https://api.example.org/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout_keeps_default() {
        let config =
            ClientConfig::from_lookup(lookup(&[("EXOSCOPE_TIMEOUT_SECS", "soon")])).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_session_backend_selection() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.session_backend, SessionBackend::Keyring);

        let config =
            ClientConfig::from_lookup(lookup(&[("EXOSCOPE_SESSION_STORE", "File")])).unwrap();
        assert_eq!(config.session_backend, SessionBackend::File);

        let config =
            ClientConfig::from_lookup(lookup(&[("EXOSCOPE_SESSION_STORE", "cloud")])).unwrap();
        assert_eq!(config.session_backend, SessionBackend::Keyring);
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = ClientConfig::from_lookup(lookup(&[("EXOSCOPE_API_BASE_URL", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ExoError::Config(_)), "got {:?}", err);
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        assert!(parse_base_url("ftp://example.com").is_err());
        assert!(parse_base_url("https://example.com").is_ok());
    }
}
