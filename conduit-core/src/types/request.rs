//! Request types for prompt calls

use crate::types::message::Message;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A model identifier from the fixed wire vocabulary
///
/// Each vendor owns a subset of these values. Any value the wire does not
/// know deserializes to [`Model::Unspecified`], which every vendor maps to
/// its documented default model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    /// OpenAI gpt-3.5-turbo (4k context)
    #[serde(rename = "GPT3_5_TURBO_4K")]
    Gpt35Turbo4k,
    /// OpenAI gpt-3.5-turbo-16k
    #[serde(rename = "GPT3_5_TURBO_16K")]
    Gpt35Turbo16k,
    /// OpenAI gpt-4 (8k context)
    #[serde(rename = "GPT4_8K")]
    Gpt4_8k,
    /// OpenAI gpt-4-32k
    #[serde(rename = "GPT4_32K")]
    Gpt4_32k,
    /// Cohere command
    #[serde(rename = "COMMAND")]
    Command,
    /// Cohere command-light
    #[serde(rename = "COMMAND_LIGHT")]
    CommandLight,
    /// Cohere command-nightly
    #[serde(rename = "COMMAND_NIGHTLY")]
    CommandNightly,
    /// Cohere command-light-nightly
    #[serde(rename = "COMMAND_LIGHT_NIGHTLY")]
    CommandLightNightly,
    /// No model requested, or one this gateway does not know
    #[default]
    #[serde(rename = "UNSPECIFIED", other)]
    Unspecified,
}

impl Model {
    /// Every known model, in wire order
    pub const ALL: [Model; 9] = [
        Model::Gpt35Turbo4k,
        Model::Gpt35Turbo16k,
        Model::Gpt4_8k,
        Model::Gpt4_32k,
        Model::Command,
        Model::CommandLight,
        Model::CommandNightly,
        Model::CommandLightNightly,
        Model::Unspecified,
    ];

    /// The wire spelling of this identifier
    pub fn as_str(self) -> &'static str {
        match self {
            Model::Gpt35Turbo4k => "GPT3_5_TURBO_4K",
            Model::Gpt35Turbo16k => "GPT3_5_TURBO_16K",
            Model::Gpt4_8k => "GPT4_8K",
            Model::Gpt4_32k => "GPT4_32K",
            Model::Command => "COMMAND",
            Model::CommandLight => "COMMAND_LIGHT",
            Model::CommandNightly => "COMMAND_NIGHTLY",
            Model::CommandLightNightly => "COMMAND_LIGHT_NIGHTLY",
            Model::Unspecified => "UNSPECIFIED",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling parameters; every knob is optional and absent ones are never sent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    /// Temperature for randomness
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Top-p nucleus sampling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Presence penalty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    /// Frequency penalty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
}

impl Parameters {
    /// Create a new parameters builder
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::default()
    }
}

/// Builder for Parameters
#[derive(Default)]
pub struct ParametersBuilder {
    params: Parameters,
}

impl ParametersBuilder {
    /// Set temperature
    pub fn temperature(mut self, temp: f32) -> Self {
        self.params.temperature = Some(temp);
        self
    }

    /// Set top-p
    pub fn top_p(mut self, p: f32) -> Self {
        self.params.top_p = Some(p);
        self
    }

    /// Set maximum tokens
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.params.max_tokens = Some(tokens);
        self
    }

    /// Set presence penalty
    pub fn presence_penalty(mut self, penalty: f32) -> Self {
        self.params.presence_penalty = Some(penalty);
        self
    }

    /// Set frequency penalty
    pub fn frequency_penalty(mut self, penalty: f32) -> Self {
        self.params.frequency_penalty = Some(penalty);
        self
    }

    /// Build the parameters
    pub fn build(self) -> Parameters {
        self.params
    }
}

/// A vendor-agnostic prompt request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRequest {
    /// The model to use
    #[serde(default)]
    pub model: Model,
    /// The conversation messages, in order
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Sampling parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
    /// Application or end-user identifier forwarded to the vendor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
}

impl PromptRequest {
    /// Create a new request builder
    pub fn builder() -> PromptRequestBuilder {
        PromptRequestBuilder::default()
    }

    /// Create a simple request with just messages
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    /// The parameters, or an all-absent set
    pub fn parameters(&self) -> Parameters {
        self.parameters.clone().unwrap_or_default()
    }
}

/// Builder for PromptRequest
#[derive(Default)]
pub struct PromptRequestBuilder {
    model: Model,
    messages: Vec<Message>,
    parameters: Option<Parameters>,
    application_id: Option<String>,
}

impl PromptRequestBuilder {
    /// Add a message
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Add multiple messages
    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Set the model
    pub fn model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Set parameters
    pub fn parameters(mut self, params: Parameters) -> Self {
        self.parameters = Some(params);
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temp: f32) -> Self {
        self.parameters.get_or_insert_with(Parameters::default).temperature = Some(temp);
        self
    }

    /// Set max tokens
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.parameters.get_or_insert_with(Parameters::default).max_tokens = Some(tokens);
        self
    }

    /// Set the application identifier
    pub fn application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }

    /// Build the request
    pub fn build(self) -> PromptRequest {
        PromptRequest {
            model: self.model,
            messages: self.messages,
            parameters: self.parameters,
            application_id: self.application_id,
        }
    }
}
