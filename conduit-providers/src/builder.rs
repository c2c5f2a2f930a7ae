//! Builder pattern for provider construction
//!
//! This module provides builder types for constructing providers with custom
//! configuration. All configuration methods return `self`, and `build()` is
//! the terminal method that validates the configuration and constructs the
//! provider.
//!
//! # Examples
//!
//! ```no_run
//! use conduit_providers::builder::{CohereBuilder, OpenAIBuilder, ProviderBuilder};
//! use conduit_providers::http::ReqwestClient;
//! use std::sync::Arc;
//!
//! // One HTTP client shared by every adapter
//! let client = Arc::new(ReqwestClient::new().expect("Failed to create client"));
//!
//! let openai = OpenAIBuilder::new("sk-...")
//!     .organization("org-123")
//!     .with_client(client.clone())
//!     .build()
//!     .expect("Failed to build provider");
//!
//! let cohere = CohereBuilder::new("co-...")
//!     .with_client(client)
//!     .build()
//!     .expect("Failed to build provider");
//! ```

use crate::cohere::{Cohere, CohereConfig};
use crate::http::{HttpClient, ReqwestClient};
use crate::openai::{OpenAI, OpenAIConfig};
use conduit_core::Error;
use std::sync::Arc;

/// Common builder trait for all providers
///
/// This trait defines the common interface for all provider builders,
/// ensuring consistent construction patterns across different providers.
pub trait ProviderBuilder: Sized {
    /// The provider type being built
    type Provider;

    /// Set a custom HTTP client
    ///
    /// This allows injecting a shared or fake HTTP client implementation.
    fn with_client(self, client: Arc<dyn HttpClient>) -> Self;

    /// Build the provider
    ///
    /// Consumes the builder and returns the configured provider,
    /// or an error if the configuration is invalid.
    fn build(self) -> Result<Self::Provider, Error>;
}

fn client_or_default(client: Option<Arc<dyn HttpClient>>) -> Result<Arc<dyn HttpClient>, Error> {
    match client {
        Some(client) => Ok(client),
        None => Ok(Arc::new(ReqwestClient::new()?)),
    }
}

/// Builder for constructing OpenAI providers
pub struct OpenAIBuilder {
    api_key: String,
    base_url: Option<String>,
    organization: Option<String>,
    stream_usage: Option<bool>,
    client: Option<Arc<dyn HttpClient>>,
}

impl OpenAIBuilder {
    /// Create a new OpenAI builder with API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            organization: None,
            stream_usage: None,
            client: None,
        }
    }

    /// Set the base URL (for proxies and compatible deployments)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the organization ID
    pub fn organization(mut self, org: impl Into<String>) -> Self {
        self.organization = Some(org.into());
        self
    }

    /// Ask streams for a trailing usage frame (on by default)
    pub fn stream_usage(mut self, enabled: bool) -> Self {
        self.stream_usage = Some(enabled);
        self
    }
}

impl ProviderBuilder for OpenAIBuilder {
    type Provider = OpenAI;

    fn with_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.client = Some(client);
        self
    }

    fn build(self) -> Result<OpenAI, Error> {
        let mut config = OpenAIConfig::new(self.api_key);

        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(org) = self.organization {
            config = config.with_organization(org);
        }
        if let Some(enabled) = self.stream_usage {
            config = config.with_stream_usage(enabled);
        }
        config.validate()?;

        Ok(OpenAI::new(config, client_or_default(self.client)?))
    }
}

/// Builder for constructing Cohere providers
pub struct CohereBuilder {
    api_key: String,
    base_url: Option<String>,
    client: Option<Arc<dyn HttpClient>>,
}

impl CohereBuilder {
    /// Create a new Cohere builder with API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            client: None,
        }
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
}

impl ProviderBuilder for CohereBuilder {
    type Provider = Cohere;

    fn with_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.client = Some(client);
        self
    }

    fn build(self) -> Result<Cohere, Error> {
        let mut config = CohereConfig::new(self.api_key);
        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }
        config.validate()?;

        Ok(Cohere::new(config, client_or_default(self.client)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conduit_core::Provider;

    #[test]
    fn test_openai_builder() {
        let provider = OpenAIBuilder::new("sk-test")
            .base_url("http://localhost:1234/v1")
            .organization("org-1")
            .stream_usage(false)
            .build()
            .unwrap();

        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.config().base_url, "http://localhost:1234/v1");
        assert_eq!(provider.config().organization_id.as_deref(), Some("org-1"));
        assert!(!provider.config().stream_usage);
    }

    #[test]
    fn test_cohere_builder_with_shared_client() {
        let client: Arc<dyn HttpClient> = Arc::new(ReqwestClient::new().unwrap());
        let provider = CohereBuilder::new("co-test")
            .with_client(client.clone())
            .build()
            .unwrap();

        assert_eq!(provider.display_name(), "Cohere");
        assert_eq!(Arc::strong_count(&client), 2);
    }

    #[test]
    fn test_builders_reject_bad_config() {
        assert!(matches!(
            OpenAIBuilder::new("").build(),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            CohereBuilder::new("k").base_url("nope").build(),
            Err(Error::Configuration(_))
        ));
    }
}
