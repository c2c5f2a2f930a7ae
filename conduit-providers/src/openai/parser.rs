//! Response parsing for OpenAI

use crate::error;
use crate::stream_utils::handle_parse_error;
use crate::traits::{ResponseParser, StreamEventParser};
use conduit_core::{Completion, Error, FinishDelta, FinishReason, StreamEvent, Usage};
use serde::Deserialize;
use serde_json::Value;

/// Normalize an OpenAI `finish_reason`
pub fn parse_finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("stop") => FinishReason::Done,
        Some("length") => FinishReason::Limit,
        _ => FinishReason::Other,
    }
}

/// Parses OpenAI unary responses
#[derive(Debug, Clone, Copy)]
pub struct OpenAIParser;

impl ResponseParser for OpenAIParser {
    fn parse_response(&self, value: Value) -> Result<Completion, Error> {
        let response: ChatResponse =
            serde_json::from_value(value).map_err(error::serialization_error)?;

        let usage = response.usage.map(UsageInfo::into_usage).unwrap_or_default();

        // No choices is a valid, empty answer.
        let Some(choice) = response.choices.into_iter().next() else {
            return Ok(Completion::text("").with_usage(usage));
        };

        Ok(Completion {
            content: choice.message.content.unwrap_or_default(),
            finish_reason: parse_finish_reason(choice.finish_reason.as_deref()),
            usage,
        })
    }
}

/// Per-stream parser for OpenAI `chat.completion.chunk` frames
///
/// When the stream was opened with `include_usage`, the frame carrying the
/// finish reason is followed by a frame with empty `choices` and the usage.
/// The finish event is held back until that frame (or `[DONE]`) arrives so
/// the terminal chunk can report token counts.
#[derive(Debug, Default)]
pub struct OpenAIStreamParser {
    stream_usage: bool,
    pending: Option<FinishDelta>,
    finished: bool,
}

impl OpenAIStreamParser {
    /// Create a parser for one stream
    pub fn new(stream_usage: bool) -> Self {
        Self {
            stream_usage,
            ..Self::default()
        }
    }

    fn release(&mut self) -> Vec<StreamEvent> {
        match self.pending.take() {
            Some(finish) => {
                self.finished = true;
                vec![StreamEvent::Finish(finish)]
            }
            None => Vec::new(),
        }
    }
}

impl StreamEventParser for OpenAIStreamParser {
    fn parse_event(&mut self, data: &str) -> Result<Vec<StreamEvent>, Error> {
        let data = data.trim();
        if data == "[DONE]" {
            return Ok(self.release());
        }
        if self.finished {
            return Ok(Vec::new());
        }

        let chunk: ChunkFrame =
            serde_json::from_str(data).map_err(|e| handle_parse_error(e, "OpenAI"))?;
        let usage = chunk.usage.map(UsageInfo::into_usage);

        let Some(choice) = chunk.choices.into_iter().next() else {
            if let (Some(pending), Some(usage)) = (self.pending.as_mut(), usage) {
                pending.usage = Some(usage);
                return Ok(self.release());
            }
            return Ok(Vec::new());
        };

        let content = choice.delta.content.filter(|text| !text.is_empty());

        if let Some(reason) = choice.finish_reason {
            let finish = FinishDelta {
                content,
                reason: parse_finish_reason(Some(&reason)),
                usage,
            };
            if self.stream_usage && finish.usage.is_none() {
                self.pending = Some(finish);
                return Ok(Vec::new());
            }
            self.finished = true;
            return Ok(vec![StreamEvent::Finish(finish)]);
        }

        Ok(content.map(StreamEvent::content).into_iter().collect())
    }

    fn flush(&mut self) -> Vec<StreamEvent> {
        self.release()
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<UsageInfo>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageResponse,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

#[derive(Deserialize)]
struct UsageInfo {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
    total_tokens: Option<u32>,
}

impl UsageInfo {
    fn into_usage(self) -> Usage {
        Usage {
            prompt_tokens: self.prompt_tokens,
            completion_tokens: self.completion_tokens,
            total_tokens: self.total_tokens,
        }
    }
}

#[derive(Deserialize)]
struct ChunkFrame {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    usage: Option<UsageInfo>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Delta,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Default)]
struct Delta {
    content: Option<String>,
}
