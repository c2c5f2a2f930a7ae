//! Streaming types for incremental responses

use crate::types::response::{FinishReason, Usage};
use serde::{Deserialize, Serialize};

/// A chunk of content in a provider stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDelta {
    /// The text content
    pub text: String,
}

/// The end of a provider stream
///
/// Some vendors carry a last content increment in the same frame as the end
/// marker; it is kept in `content` so it can be relayed before the terminal
/// chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinishDelta {
    /// Content carried by the final frame
    pub content: Option<String>,
    /// Normalized finish reason
    pub reason: FinishReason,
    /// Usage, when the provider reported any
    pub usage: Option<Usage>,
}

/// Events a provider stream yields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Content was generated
    Content(ContentDelta),
    /// The provider signalled the end of generation
    Finish(FinishDelta),
}

impl StreamEvent {
    /// Shorthand for a content event
    pub fn content(text: impl Into<String>) -> Self {
        StreamEvent::Content(ContentDelta { text: text.into() })
    }

    /// Shorthand for a finish event without content or usage
    pub fn finish(reason: FinishReason) -> Self {
        StreamEvent::Finish(FinishDelta {
            reason,
            ..FinishDelta::default()
        })
    }
}

/// The last chunk of every relayed stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalChunk {
    /// Normalized finish reason
    pub finish_reason: FinishReason,
    /// Tokens in the prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_tokens: Option<u32>,
    /// Tokens in the completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_tokens: Option<u32>,
    /// Wall time of the stream in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_duration: Option<u64>,
}

impl TerminalChunk {
    /// The bare terminal chunk written when a stream fails
    pub fn error() -> Self {
        Self {
            finish_reason: FinishReason::Error,
            request_tokens: None,
            response_tokens: None,
            stream_duration: None,
        }
    }
}

/// One unit written to the caller of a streaming call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamChunk {
    /// An increment of generated text
    Content {
        /// The text
        content: String,
    },
    /// The terminal chunk
    Terminal(TerminalChunk),
}

impl StreamChunk {
    /// Create a content chunk
    pub fn content(content: impl Into<String>) -> Self {
        StreamChunk::Content {
            content: content.into(),
        }
    }

    /// Create the terminal chunk for a successful stream
    pub fn finished(reason: FinishReason, usage: Option<Usage>, stream_duration: u64) -> Self {
        let usage = usage.unwrap_or_default();
        StreamChunk::Terminal(TerminalChunk {
            finish_reason: reason,
            request_tokens: usage.prompt_tokens,
            response_tokens: usage.completion_tokens,
            stream_duration: Some(stream_duration),
        })
    }

    /// Create the terminal chunk for a failed stream
    pub fn error() -> Self {
        StreamChunk::Terminal(TerminalChunk::error())
    }

    /// Whether this is the terminal chunk
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamChunk::Terminal(_))
    }
}
