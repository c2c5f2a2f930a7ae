//! Error types for the Conduit gateway

use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;

/// The main error type for provider and translation operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Network-related errors
    #[error("Network error: {message}")]
    Network {
        /// Error message
        message: String,
        /// Underlying error if available
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Provider-specific errors
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name (e.g., "openai", "cohere")
        provider: String,
        /// Error message
        message: String,
        /// HTTP status returned by the provider, if any
        status: Option<u16>,
        /// Underlying error if available
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message
        message: String,
        /// Underlying error if available
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// The request cannot be translated for the target provider
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The provider refused the request because of rate limits
    #[error("Rate limited by {provider}")]
    RateLimited {
        /// Provider name
        provider: String,
        /// Time to wait before retrying, when the provider says so
        retry_after: Option<Duration>,
    },

    /// Timeout errors
    #[error("Operation timed out")]
    Timeout,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Whether the error originated locally, before any provider call
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Result type alias for Conduit operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let error = Error::Network {
            message: "Connection refused".into(),
            source: None,
        };
        assert_eq!(error.to_string(), "Network error: Connection refused");

        let error = Error::Provider {
            provider: "openai".into(),
            message: "HTTP 500".into(),
            status: Some(500),
            source: None,
        };
        assert_eq!(error.to_string(), "Provider error (openai): HTTP 500");

        let error = Error::Validation("no messages".into());
        assert_eq!(error.to_string(), "Validation error: no messages");

        let error = Error::RateLimited {
            provider: "cohere".into(),
            retry_after: Some(Duration::from_secs(30)),
        };
        assert_eq!(error.to_string(), "Rate limited by cohere");

        assert_eq!(Error::Timeout.to_string(), "Operation timed out");
    }

    #[test]
    fn test_error_source() {
        let error = Error::Network {
            message: "Connection failed".into(),
            source: None,
        };
        assert!(error.source().is_none());

        let io_error = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        let error = Error::Network {
            message: "Connection failed".into(),
            source: Some(Box::new(io_error)),
        };
        assert!(error.source().is_some());

        assert!(Error::Validation("test".into()).source().is_none());
    }

    #[test]
    fn test_error_from_serde_json_error() {
        let json_error = serde_json::from_str::<String>("invalid json").unwrap_err();
        let error: Error = json_error.into();

        match error {
            Error::Serialization { message, source } => {
                assert!(!message.is_empty());
                assert!(source.is_some());
            }
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_is_validation() {
        assert!(Error::Validation("x".into()).is_validation());
        assert!(!Error::Timeout.is_validation());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
