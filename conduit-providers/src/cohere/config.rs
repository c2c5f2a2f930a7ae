//! Cohere provider configuration

use crate::constants::{COHERE_API_KEY_ENV, COHERE_DEFAULT_BASE_URL};
use conduit_core::Error;
use url::Url;

/// Configuration for the Cohere provider
#[derive(Debug, Clone)]
pub struct CohereConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API, without the version segment
    pub base_url: String,
}

impl Default for CohereConfig {
    fn default() -> Self {
        Self::new(std::env::var(COHERE_API_KEY_ENV).unwrap_or_default())
    }
}

impl CohereConfig {
    /// Create a new configuration with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: COHERE_DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Check the key and base URL
    pub fn validate(&self) -> Result<(), Error> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Configuration("Cohere API key is empty".into()));
        }
        Url::parse(&self.base_url)
            .map_err(|e| Error::Configuration(format!("Invalid Cohere base URL: {e}")))?;
        Ok(())
    }

    /// Get the URL for the chat endpoint
    pub fn chat_url(&self) -> String {
        format!("{}/v1/chat", self.base_url.trim_end_matches('/'))
    }
}
