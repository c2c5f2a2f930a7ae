//! Conduit - a prompt gateway for OpenAI and Cohere
//!
//! Callers hand a vendor-agnostic [`PromptRequest`] to a handler and get back
//! either one normalized [`PromptResponse`] or an ordered sequence of
//! [`StreamChunk`]s that always ends with exactly one terminal chunk.
//!
//! # Quick Start
//!
//! ```no_run
//! # use conduit::prelude::*;
//! # use std::sync::Arc;
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = OpenAIBuilder::new("your-api-key").build()?;
//! let handler = UnaryPromptHandler::new(Arc::new(provider));
//!
//! let request = PromptRequest::builder()
//!     .model(Model::Gpt4_8k)
//!     .message(Message::user("Hello, world!"))
//!     .build();
//!
//! let response = handler.handle(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export core types
pub use conduit_core::*;

#[cfg(feature = "providers")]
#[cfg_attr(docsrs, doc(cfg(feature = "providers")))]
pub mod providers {
    //! OpenAI and Cohere adapters
    pub use conduit_providers::*;
}

#[cfg(feature = "gateway")]
#[cfg_attr(docsrs, doc(cfg(feature = "gateway")))]
pub mod gateway {
    //! Unary and streaming prompt handlers
    pub use conduit_gateway::*;
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use conduit_core::{
        Error, FinishReason, Message, Model, Parameters, PromptRequest, PromptResponse, Provider,
        Role, StreamChunk, StreamEvent,
    };

    #[cfg(feature = "providers")]
    pub use conduit_providers::{CohereBuilder, OpenAIBuilder, ProviderBuilder};

    #[cfg(feature = "gateway")]
    pub use conduit_gateway::{
        ChannelSink, ChunkSink, GatewayError, StreamingPromptHandler, UnaryPromptHandler,
    };
}
