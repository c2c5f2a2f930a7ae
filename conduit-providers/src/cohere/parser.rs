//! Response parsing for Cohere

use crate::error;
use crate::stream_utils::handle_parse_error;
use crate::traits::{ResponseParser, StreamEventParser};
use conduit_core::{Completion, Error, FinishDelta, FinishReason, StreamEvent, Usage};
use serde::Deserialize;
use serde_json::Value;

/// Normalize a Cohere `finish_reason`
pub fn parse_finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("COMPLETE") => FinishReason::Done,
        Some("MAX_TOKENS") => FinishReason::Limit,
        Some(other) if other.starts_with("ERROR") => FinishReason::Error,
        _ => FinishReason::Other,
    }
}

/// Parses Cohere unary chat responses
#[derive(Debug, Clone, Copy)]
pub struct CohereParser;

impl ResponseParser for CohereParser {
    fn parse_response(&self, value: Value) -> Result<Completion, Error> {
        let response: ChatResponse =
            serde_json::from_value(value).map_err(error::serialization_error)?;

        Ok(Completion {
            content: response.text,
            finish_reason: parse_finish_reason(response.finish_reason.as_deref()),
            usage: response.meta.map(Meta::into_usage).unwrap_or_default(),
        })
    }
}

/// Per-stream parser for Cohere's newline-delimited chat events
#[derive(Debug, Default)]
pub struct CohereStreamParser {
    finished: bool,
}

impl CohereStreamParser {
    /// Create a parser for one stream
    pub fn new() -> Self {
        Self::default()
    }
}

impl StreamEventParser for CohereStreamParser {
    fn parse_event(&mut self, data: &str) -> Result<Vec<StreamEvent>, Error> {
        if self.finished {
            return Ok(Vec::new());
        }

        let event: ChatStreamEvent =
            serde_json::from_str(data).map_err(|e| handle_parse_error(e, "Cohere"))?;

        match event.event_type.as_str() {
            "text-generation" => Ok(event
                .text
                .filter(|text| !text.is_empty())
                .map(StreamEvent::content)
                .into_iter()
                .collect()),
            "stream-end" => {
                self.finished = true;
                let usage = event
                    .response
                    .and_then(|response| response.meta)
                    .map(Meta::into_usage);
                Ok(vec![StreamEvent::Finish(FinishDelta {
                    content: None,
                    reason: parse_finish_reason(event.finish_reason.as_deref()),
                    usage,
                })])
            }
            _ => Ok(Vec::new()),
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    text: String,
    finish_reason: Option<String>,
    meta: Option<Meta>,
}

#[derive(Deserialize)]
struct Meta {
    billed_units: Option<TokenCounts>,
    tokens: Option<TokenCounts>,
}

impl Meta {
    fn into_usage(self) -> Usage {
        let counts = self.billed_units.or(self.tokens).unwrap_or_default();
        Usage {
            prompt_tokens: counts.input_tokens.map(whole_tokens),
            completion_tokens: counts.output_tokens.map(whole_tokens),
            total_tokens: None,
        }
    }
}

#[derive(Deserialize, Default)]
struct TokenCounts {
    input_tokens: Option<f64>,
    output_tokens: Option<f64>,
}

// Cohere reports counts as JSON numbers that may carry a fraction.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_tokens(count: f64) -> u32 {
    count.max(0.0).round() as u32
}

#[derive(Deserialize)]
struct ChatStreamEvent {
    event_type: String,
    text: Option<String>,
    finish_reason: Option<String>,
    response: Option<StreamEndResponse>,
}

#[derive(Deserialize)]
struct StreamEndResponse {
    meta: Option<Meta>,
}
