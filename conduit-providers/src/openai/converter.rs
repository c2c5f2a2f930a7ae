//! Request conversion for OpenAI

use crate::constants::OPENAI_DEFAULT_MODEL;
use crate::traits::RequestConverter;
use conduit_core::{Error, FunctionCall, Message, Model, PromptRequest};
use serde::Serialize;

/// Body of a chat completion call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: &'static str,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_options: Option<StreamOptions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreamOptions {
    pub include_usage: bool,
}

/// One conversation turn; `content` is always sent, as `null` when blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
}

/// The OpenAI model name for a wire identifier
pub fn model_name(model: Model) -> &'static str {
    match model {
        Model::Gpt35Turbo4k => "gpt-3.5-turbo",
        Model::Gpt35Turbo16k => "gpt-3.5-turbo-16k",
        Model::Gpt4_8k => "gpt-4",
        Model::Gpt4_32k => "gpt-4-32k",
        _ => OPENAI_DEFAULT_MODEL,
    }
}

/// Converts generic requests to OpenAI format
#[derive(Debug, Clone, Copy)]
pub struct OpenAIConverter {
    stream_usage: bool,
}

impl OpenAIConverter {
    /// Create a converter; `stream_usage` asks streams for a trailing usage frame
    pub fn new(stream_usage: bool) -> Self {
        Self { stream_usage }
    }

    fn convert_message(message: &Message) -> ChatMessage {
        ChatMessage {
            role: message.role.as_str(),
            content: message.normalized_content().map(str::to_string),
            name: message.normalized_name().map(str::to_string),
            function_call: message.function_call.clone(),
        }
    }
}

impl RequestConverter for OpenAIConverter {
    type Request = ChatRequest;

    fn convert_request(&self, request: &PromptRequest, stream: bool) -> Result<ChatRequest, Error> {
        if request.messages.is_empty() {
            return Err(Error::Validation(
                "OpenAI request must contain at least one message".into(),
            ));
        }

        let params = request.parameters();
        Ok(ChatRequest {
            model: model_name(request.model),
            messages: request.messages.iter().map(Self::convert_message).collect(),
            temperature: params.temperature,
            top_p: params.top_p,
            max_tokens: params.max_tokens,
            presence_penalty: params.presence_penalty,
            frequency_penalty: params.frequency_penalty,
            user: request.application_id.clone(),
            stream,
            stream_options: (stream && self.stream_usage).then_some(StreamOptions {
                include_usage: true,
            }),
        })
    }
}
