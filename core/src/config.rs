//! Client configuration: the base URL of the service and an optional timeout.
//!
//! Loaded from a TOML document or from the environment:
//!
//! ```toml
//! base_url = "http://192.168.1.148:8080"
//! timeout_secs = 10
//! ```
//!
//! `CRUD_BASE_URL` and `CRUD_TIMEOUT_SECS` are the environment equivalents.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

const BASE_URL_ENV: &str = "CRUD_BASE_URL";
const TIMEOUT_ENV: &str = "CRUD_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    /// Upper bound for one round trip. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let config = Self {
            base_url: base_url.to_string(),
            timeout_secs: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read `CRUD_BASE_URL` and `CRUD_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = match lookup(TIMEOUT_ENV) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?,
            ),
            None => None,
        };
        let config = Self {
            base_url,
            timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.starts_with("http://") || self.base_url.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidBaseUrl(self.base_url.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn env_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("CRUD_BASE_URL", "http://192.168.1.148:8080"),
            ("CRUD_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://192.168.1.148:8080");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn env_rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[("CRUD_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
    }

    #[test]
    fn toml_with_timeout() {
        let config = ClientConfig::from_toml_str(
            r#"
            base_url = "https://crud.example.com"
            timeout_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://crud.example.com");
        assert_eq!(config.timeout_secs, Some(10));
    }

    #[test]
    fn toml_missing_base_url() {
        let err = ClientConfig::from_toml_str("timeout_secs = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = ClientConfig::new("ftp://example.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }
}
