//! Response types for prompt calls

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token usage reported by a provider
///
/// Every count is optional: a provider that does not report a figure leaves it
/// absent instead of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_tokens: Option<u32>,
    /// Tokens in the completion
    pub completion_tokens: Option<u32>,
    /// Total tokens used
    pub total_tokens: Option<u32>,
}

impl Usage {
    /// Usage with prompt and completion counts and no total
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens: Some(prompt_tokens),
            completion_tokens: Some(completion_tokens),
            total_tokens: None,
        }
    }

    /// Set the total
    pub fn with_total(mut self, total_tokens: u32) -> Self {
        self.total_tokens = Some(total_tokens);
        self
    }
}

/// Why the model stopped generating, in wire form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    /// Natural end of message
    Done,
    /// Hit the token limit
    Limit,
    /// The generation failed
    Error,
    /// Any other reason, or none reported
    #[default]
    Other,
}

impl FinishReason {
    /// The wire spelling
    pub fn as_str(self) -> &'static str {
        match self {
            FinishReason::Done => "DONE",
            FinishReason::Limit => "LIMIT",
            FinishReason::Error => "ERROR",
            FinishReason::Other => "OTHER",
        }
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete, non-streamed answer from a provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    /// The generated content of the first choice, empty when there were none
    pub content: String,
    /// Normalized finish reason
    pub finish_reason: FinishReason,
    /// Usage statistics
    pub usage: Usage,
}

impl Completion {
    /// Create a simple text completion
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set the finish reason
    pub fn with_finish_reason(mut self, reason: FinishReason) -> Self {
        self.finish_reason = reason;
        self
    }

    /// Set the usage
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)
    }
}

/// The normalized unary reply sent back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptResponse {
    /// The generated content
    pub content: String,
    /// Tokens in the prompt, zero when the provider did not say
    pub request_tokens: u32,
    /// Tokens in the completion, zero when the provider did not say
    pub response_tokens: u32,
    /// Total tokens, only when the provider reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u32>,
    /// Normalized finish reason
    pub finish_reason: FinishReason,
    /// Wall time of the provider call in milliseconds
    pub request_duration: u64,
}

impl PromptResponse {
    /// Build the reply from a provider completion and the measured duration
    pub fn from_completion(completion: Completion, request_duration: u64) -> Self {
        Self {
            content: completion.content,
            request_tokens: completion.usage.prompt_tokens.unwrap_or(0),
            response_tokens: completion.usage.completion_tokens.unwrap_or(0),
            total_tokens: completion.usage.total_tokens,
            finish_reason: completion.finish_reason,
            request_duration,
        }
    }
}
