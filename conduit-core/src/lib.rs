//! Core traits and types for the Conduit prompt gateway
//!
//! This crate holds the vendor-agnostic request/response model shared by the
//! provider adapters, the prompt handlers and the HTTP boundary.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod provider;
pub mod types;

// Re-export commonly used items
pub use error::{Error, Result};
pub use provider::{Provider, ProviderStream};
pub use types::{
    message::{FunctionCall, Message, Role},
    request::{Model, Parameters, ParametersBuilder, PromptRequest, PromptRequestBuilder},
    response::{Completion, FinishReason, PromptResponse, Usage},
    stream::{ContentDelta, FinishDelta, StreamChunk, StreamEvent, TerminalChunk},
};
