//! Core provider trait for upstream LLM interactions

use crate::error::Result;
use crate::types::request::PromptRequest;
use crate::types::response::Completion;
use crate::types::stream::StreamEvent;
use async_trait::async_trait;
use futures_core::Stream;
use std::pin::Pin;

/// A vendor stream normalized to [`StreamEvent`]s
///
/// Dropping the stream releases the upstream connection.
pub type ProviderStream = Pin<Box<dyn Stream<Item = Result<StreamEvent>> + Send>>;

/// The capability every upstream vendor adapter implements
///
/// Adapters are selected once, when a handler is constructed, and shared
/// behind an `Arc<dyn Provider>`. Implementations must not keep per-request
/// state: each call translates its own request and owns its own stream.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short vendor identifier, e.g. `"openai"`
    fn name(&self) -> &'static str;

    /// Human readable vendor name used in diagnostics, e.g. `"OpenAI"`
    fn display_name(&self) -> &'static str;

    /// Send a request and wait for the complete completion
    async fn request(&self, request: &PromptRequest) -> Result<Completion>;

    /// Open a streaming completion
    ///
    /// The returned stream yields content increments in provider order and
    /// at most one [`StreamEvent::Finish`].
    async fn stream(&self, request: &PromptRequest) -> Result<ProviderStream>;
}
