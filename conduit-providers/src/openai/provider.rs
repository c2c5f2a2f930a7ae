//! OpenAI provider implementation
//!
//! This module provides integration with OpenAI's chat completions API for
//! both unary and streamed calls. It implements the core `Provider` trait on
//! top of the converter/parser pipeline shared with the other adapters.

use crate::constants::OPENAI_PROVIDER;
use crate::error;
use crate::http::{create_headers, HttpClient, ReqwestClient};
use crate::openai::{
    config::OpenAIConfig,
    converter::{model_name, OpenAIConverter},
    parser::OpenAIParser,
    stream::OpenAIStream,
};
use crate::traits::{RequestConverter, ResponseParser};
use async_trait::async_trait;
use conduit_core::{Completion, Error, PromptRequest, Provider, ProviderStream};
use reqwest::header::{HeaderMap, HeaderValue};
use std::sync::Arc;
use tracing::debug;

/// OpenAI provider for chat completions
///
/// # Example
///
/// ```no_run
/// use conduit_providers::OpenAI;
/// use conduit_providers::openai::OpenAIConfig;
/// use conduit_providers::http::ReqwestClient;
/// use std::sync::Arc;
///
/// let config = OpenAIConfig::new("your-api-key").with_organization("org-id");
/// let client = Arc::new(ReqwestClient::new().expect("Failed to create client"));
/// let provider = OpenAI::new(config, client);
/// ```
#[derive(Clone)]
pub struct OpenAI {
    client: Arc<dyn HttpClient>,
    config: OpenAIConfig,
    converter: OpenAIConverter,
    parser: OpenAIParser,
}

impl OpenAI {
    /// Create a new OpenAI provider with the given configuration and client
    pub fn new(config: OpenAIConfig, client: Arc<dyn HttpClient>) -> Self {
        Self {
            converter: OpenAIConverter::new(config.stream_usage),
            client,
            config,
            parser: OpenAIParser,
        }
    }

    /// Create a new OpenAI provider with just an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, Error> {
        let client = Arc::new(ReqwestClient::new()?);
        Ok(Self::new(OpenAIConfig::new(api_key), client))
    }

    /// The active configuration
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    fn headers(&self) -> Result<HeaderMap, Error> {
        let mut extra = HeaderMap::new();
        if let Some(org) = &self.config.organization_id {
            extra.insert(
                "OpenAI-Organization",
                HeaderValue::from_str(org)
                    .map_err(|e| Error::Configuration(format!("Invalid organization: {e}")))?,
            );
        }
        create_headers(&self.config.api_key, Some(extra))
    }
}

#[async_trait]
impl Provider for OpenAI {
    fn name(&self) -> &'static str {
        OPENAI_PROVIDER
    }

    fn display_name(&self) -> &'static str {
        "OpenAI"
    }

    async fn request(&self, request: &PromptRequest) -> Result<Completion, Error> {
        let body = self.converter.convert_to_value(request, false)?;
        debug!(
            provider = OPENAI_PROVIDER,
            model = model_name(request.model),
            messages = request.messages.len(),
            "sending chat completion"
        );

        let response = self
            .client
            .post(&self.config.chat_url(), self.headers()?, body)
            .await
            .map_err(error::attribute(OPENAI_PROVIDER))?;

        self.parser.parse_response(response)
    }

    async fn stream(&self, request: &PromptRequest) -> Result<ProviderStream, Error> {
        let body = self.converter.convert_to_value(request, true)?;
        debug!(
            provider = OPENAI_PROVIDER,
            model = model_name(request.model),
            messages = request.messages.len(),
            "opening chat completion stream"
        );

        let event_source = self
            .client
            .post_event_stream(&self.config.chat_url(), self.headers()?, body)?;

        Ok(Box::pin(OpenAIStream::new(
            event_source,
            self.config.stream_usage,
        )))
    }
}
