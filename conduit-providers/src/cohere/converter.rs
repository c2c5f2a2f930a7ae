//! Request conversion for Cohere

use crate::constants::COHERE_DEFAULT_MODEL;
use crate::traits::RequestConverter;
use conduit_core::{Error, Message, Model, PromptRequest, Role};
use serde::Serialize;

/// Body of a chat call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chat_history: Vec<ChatTurn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    pub stream: bool,
}

/// A previous turn of the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub role: &'static str,
    pub message: String,
}

/// The Cohere model name for a wire identifier
pub fn model_name(model: Model) -> &'static str {
    match model {
        Model::Command => "command",
        Model::CommandLight => "command-light",
        Model::CommandNightly => "command-nightly",
        Model::CommandLightNightly => "command-light-nightly",
        _ => COHERE_DEFAULT_MODEL,
    }
}

fn role_name(role: Role) -> Result<&'static str, Error> {
    match role {
        Role::System => Ok("SYSTEM"),
        Role::User => Ok("USER"),
        Role::Assistant => Ok("CHATBOT"),
        Role::Function => Err(Error::Validation(
            "Cohere does not support function messages".into(),
        )),
    }
}

/// Converts generic requests to Cohere format
#[derive(Debug, Clone, Copy)]
pub struct CohereConverter;

impl CohereConverter {
    fn history(messages: &[Message]) -> Result<Vec<ChatTurn>, Error> {
        let mut turns = Vec::with_capacity(messages.len());
        for message in messages {
            let role = role_name(message.role)?;
            // Cohere rejects empty turns; a blank one carries nothing.
            if let Some(content) = message.normalized_content() {
                turns.push(ChatTurn {
                    role,
                    message: content.to_string(),
                });
            }
        }
        Ok(turns)
    }
}

impl RequestConverter for CohereConverter {
    type Request = ChatRequest;

    fn convert_request(&self, request: &PromptRequest, stream: bool) -> Result<ChatRequest, Error> {
        let Some((last, earlier)) = request.messages.split_last() else {
            return Err(Error::Validation(
                "Cohere request must contain at least one message".into(),
            ));
        };

        let chat_history = Self::history(earlier)?;
        role_name(last.role)?;
        let message = last
            .normalized_content()
            .ok_or_else(|| {
                Error::Validation("the last Cohere message must have content".into())
            })?
            .to_string();

        let params = request.parameters();
        Ok(ChatRequest {
            model: model_name(request.model),
            message,
            chat_history,
            temperature: params.temperature,
            p: params.top_p,
            max_tokens: params.max_tokens,
            presence_penalty: params.presence_penalty,
            frequency_penalty: params.frequency_penalty,
            conversation_id: request.application_id.clone(),
            stream,
        })
    }
}
