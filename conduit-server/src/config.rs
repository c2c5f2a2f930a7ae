//! Process configuration read from the environment

use conduit_providers::constants::{COHERE_API_KEY_ENV, DEFAULT_REQUEST_TIMEOUT, OPENAI_API_KEY_ENV};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Listen address variable
pub const ADDR_ENV: &str = "CONDUIT_ADDR";
/// Upstream request timeout variable, in whole seconds
pub const REQUEST_TIMEOUT_ENV: &str = "CONDUIT_REQUEST_TIMEOUT_SECS";
/// OpenAI base URL override variable
pub const OPENAI_BASE_URL_ENV: &str = "OPENAI_BASE_URL";
/// Cohere base URL override variable
pub const COHERE_BASE_URL_ENV: &str = "COHERE_BASE_URL";

const DEFAULT_ADDR: &str = "0.0.0.0:4000";

/// A variable that was set but could not be used
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The listen address does not parse
    #[error("CONDUIT_ADDR is not a socket address: {0}")]
    InvalidAddr(String),
    /// The timeout is not a positive integer
    #[error("CONDUIT_REQUEST_TIMEOUT_SECS must be a positive number of seconds: {0}")]
    InvalidTimeout(String),
}

/// Credentials and endpoint for one vendor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorConfig {
    /// Process-scoped API key
    pub api_key: String,
    /// Base URL, when not the vendor default
    pub base_url: Option<String>,
}

/// Everything the binary needs at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on
    pub addr: SocketAddr,
    /// Timeout applied to every upstream request
    pub request_timeout: Duration,
    /// Present when `OPENAI_API_KEY` is set
    pub openai: Option<VendorConfig>,
    /// Present when `COHERE_API_KEY` is set
    pub cohere: Option<VendorConfig>,
}

impl ServerConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let addr = var(ADDR_ENV).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr.parse().map_err(|_| ConfigError::InvalidAddr(addr))?;

        let request_timeout = match var(REQUEST_TIMEOUT_ENV) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let vendor = |key_env: &str, url_env: &str| {
            var(key_env).map(|api_key| VendorConfig {
                api_key,
                base_url: var(url_env),
            })
        };

        Ok(Self {
            addr,
            request_timeout,
            openai: vendor(OPENAI_API_KEY_ENV, OPENAI_BASE_URL_ENV),
            cohere: vendor(COHERE_API_KEY_ENV, COHERE_BASE_URL_ENV),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr, "0.0.0.0:4000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.request_timeout, Duration::from_secs(300));
        assert_eq!(config.openai, None);
        assert_eq!(config.cohere, None);
    }

    #[test]
    fn test_vendor_mounted_only_with_key() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-1"),
            ("OPENAI_BASE_URL", "http://localhost:9000/v1"),
            ("COHERE_BASE_URL", "http://localhost:9001"),
            ("COHERE_API_KEY", "   "),
        ]))
        .unwrap();

        assert_eq!(
            config.openai,
            Some(VendorConfig {
                api_key: "sk-1".into(),
                base_url: Some("http://localhost:9000/v1".into()),
            })
        );
        assert_eq!(config.cohere, None);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[("CONDUIT_ADDR", "nowhere")])).unwrap_err(),
            ConfigError::InvalidAddr("nowhere".into())
        );
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[("CONDUIT_REQUEST_TIMEOUT_SECS", "0")])).unwrap_err(),
            ConfigError::InvalidTimeout("0".into())
        );
    }

    #[test]
    fn test_custom_timeout() {
        let config =
            ServerConfig::from_lookup(lookup(&[("CONDUIT_REQUEST_TIMEOUT_SECS", "30")])).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
