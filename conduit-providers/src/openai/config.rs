//! OpenAI provider configuration

use crate::constants::{OPENAI_API_KEY_ENV, OPENAI_DEFAULT_BASE_URL};
use conduit_core::Error;
use url::Url;

/// Configuration for the OpenAI provider
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Optional organization ID
    pub organization_id: Option<String>,
    /// Ask for a usage frame at the end of streams
    pub stream_usage: bool,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self::new(std::env::var(OPENAI_API_KEY_ENV).unwrap_or_default())
    }
}

impl OpenAIConfig {
    /// Create a new configuration with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: OPENAI_DEFAULT_BASE_URL.to_string(),
            organization_id: None,
            stream_usage: true,
        }
    }

    /// Set a custom base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the organization ID
    pub fn with_organization(mut self, org: impl Into<String>) -> Self {
        self.organization_id = Some(org.into());
        self
    }

    /// Enable or disable the trailing usage frame on streams
    pub fn with_stream_usage(mut self, enabled: bool) -> Self {
        self.stream_usage = enabled;
        self
    }

    /// Check the key and base URL
    pub fn validate(&self) -> Result<(), Error> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Configuration("OpenAI API key is empty".into()));
        }
        Url::parse(&self.base_url)
            .map_err(|e| Error::Configuration(format!("Invalid OpenAI base URL: {e}")))?;
        Ok(())
    }

    /// Get the URL for chat completions
    pub fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_url() {
        let config = OpenAIConfig::new("k").with_base_url("http://localhost:9000/v1/");
        assert_eq!(config.chat_url(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn test_validate() {
        assert!(OpenAIConfig::new("k").validate().is_ok());
        assert!(matches!(
            OpenAIConfig::new("  ").validate(),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            OpenAIConfig::new("k").with_base_url("not a url").validate(),
            Err(Error::Configuration(_))
        ));
    }
}
