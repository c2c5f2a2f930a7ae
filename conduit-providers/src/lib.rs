//! Provider adapters for the upstream LLM vendors
//!
//! Each adapter pairs a pure request converter with a response parser and a
//! stream type, and implements [`conduit_core::Provider`] over a shared
//! [`http::HttpClient`].

#![warn(missing_docs)]

pub mod builder;
pub mod constants;
pub mod error;
pub mod http;
pub mod stream_utils;
pub mod traits;

// Provider implementations
pub mod cohere;
pub mod openai;

// Re-export provider types
pub use cohere::Cohere;
pub use openai::OpenAI;

// Re-export common traits
pub use builder::{CohereBuilder, OpenAIBuilder, ProviderBuilder};
pub use traits::{RequestConverter, ResponseParser, StreamEventParser};
