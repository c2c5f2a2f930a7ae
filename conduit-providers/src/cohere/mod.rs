//! Cohere provider implementation

mod config;
mod converter;
mod parser;
mod provider;
mod stream;

pub use config::CohereConfig;
pub use converter::{model_name, CohereConverter};
pub use parser::{parse_finish_reason, CohereParser, CohereStreamParser};
pub use provider::Cohere;
pub use stream::CohereStream;
