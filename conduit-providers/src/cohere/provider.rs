//! Cohere provider implementation

use crate::cohere::{
    config::CohereConfig,
    converter::{model_name, CohereConverter},
    parser::CohereParser,
    stream::CohereStream,
};
use crate::constants::COHERE_PROVIDER;
use crate::error;
use crate::http::{create_headers, HttpClient, ReqwestClient};
use crate::traits::{RequestConverter, ResponseParser};
use async_trait::async_trait;
use conduit_core::{Completion, Error, PromptRequest, Provider, ProviderStream};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::sync::Arc;
use tracing::debug;

/// Cohere provider for the chat endpoint
///
/// Streams are read as newline-delimited JSON; the `stream-end` event closes
/// the generation and carries the billed token counts.
#[derive(Clone)]
pub struct Cohere {
    client: Arc<dyn HttpClient>,
    config: CohereConfig,
    converter: CohereConverter,
    parser: CohereParser,
}

impl Cohere {
    /// Create a new Cohere provider with the given configuration and client
    pub fn new(config: CohereConfig, client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            config,
            converter: CohereConverter,
            parser: CohereParser,
        }
    }

    /// Create a new Cohere provider with just an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, Error> {
        let client = Arc::new(ReqwestClient::new()?);
        Ok(Self::new(CohereConfig::new(api_key), client))
    }

    /// The active configuration
    pub fn config(&self) -> &CohereConfig {
        &self.config
    }

    fn headers(&self) -> Result<HeaderMap, Error> {
        let mut extra = HeaderMap::new();
        extra.insert(ACCEPT, HeaderValue::from_static("application/json"));
        create_headers(&self.config.api_key, Some(extra))
    }
}

#[async_trait]
impl Provider for Cohere {
    fn name(&self) -> &'static str {
        COHERE_PROVIDER
    }

    fn display_name(&self) -> &'static str {
        "Cohere"
    }

    async fn request(&self, request: &PromptRequest) -> Result<Completion, Error> {
        let body = self.converter.convert_to_value(request, false)?;
        debug!(
            provider = COHERE_PROVIDER,
            model = model_name(request.model),
            messages = request.messages.len(),
            "sending chat request"
        );

        let response = self
            .client
            .post(&self.config.chat_url(), self.headers()?, body)
            .await
            .map_err(error::attribute(COHERE_PROVIDER))?;

        self.parser.parse_response(response)
    }

    async fn stream(&self, request: &PromptRequest) -> Result<ProviderStream, Error> {
        let body = self.converter.convert_to_value(request, true)?;
        debug!(
            provider = COHERE_PROVIDER,
            model = model_name(request.model),
            messages = request.messages.len(),
            "opening chat stream"
        );

        let body = self
            .client
            .post_stream(&self.config.chat_url(), self.headers()?, body)
            .await
            .map_err(error::attribute(COHERE_PROVIDER))?;

        Ok(Box::pin(CohereStream::new(body)))
    }
}
