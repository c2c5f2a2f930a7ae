//! OpenAI provider implementation

mod config;
mod converter;
mod parser;
mod provider;
mod stream;

pub use config::OpenAIConfig;
pub use converter::{model_name, OpenAIConverter};
pub use parser::{parse_finish_reason, OpenAIParser, OpenAIStreamParser};
pub use provider::OpenAI;
pub use stream::OpenAIStream;
