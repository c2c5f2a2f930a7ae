//! Constants for provider implementations

use std::time::Duration;

/// Short name of the OpenAI adapter
pub const OPENAI_PROVIDER: &str = "openai";

/// Default OpenAI base URL
pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default OpenAI model
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Environment variable holding the OpenAI key
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Short name of the Cohere adapter
pub const COHERE_PROVIDER: &str = "cohere";

/// Default Cohere base URL
pub const COHERE_DEFAULT_BASE_URL: &str = "https://api.cohere.ai";

/// Default Cohere model
pub const COHERE_DEFAULT_MODEL: &str = "command-light";

/// Environment variable holding the Cohere key
pub const COHERE_API_KEY_ENV: &str = "COHERE_API_KEY";

/// Request timeout used when none is configured
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);
