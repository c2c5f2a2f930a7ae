//! Normalization of provider failures into the gateway's error contract

use conduit_core::{Error, StreamChunk};
use serde::Serialize;
use std::fmt;
use thiserror::Error as ThisError;
use tracing::error;

/// Error classes the gateway reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    /// The request cannot be served as given
    InvalidArgument,
    /// The provider rejected the credentials
    Unauthenticated,
    /// The provider is rate limiting
    ResourceExhausted,
    /// The provider did not answer in time
    DeadlineExceeded,
    /// The provider could not be reached
    Unavailable,
    /// Anything else
    Internal,
}

impl StatusCode {
    /// The wire spelling
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::InvalidArgument => "INVALID_ARGUMENT",
            StatusCode::Unauthenticated => "UNAUTHENTICATED",
            StatusCode::ResourceExhausted => "RESOURCE_EXHAUSTED",
            StatusCode::DeadlineExceeded => "DEADLINE_EXCEEDED",
            StatusCode::Unavailable => "UNAVAILABLE",
            StatusCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned to callers of a unary prompt
///
/// Provider details never leak into `message`; they are logged instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ThisError)]
#[error("{code}: {message}")]
pub struct GatewayError {
    /// Human readable message
    pub message: String,
    /// Error class
    pub code: StatusCode,
    /// Extra information safe to show the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl GatewayError {
    /// Create an error without details
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            details: None,
        }
    }

    /// Attach details
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// The status class for a core error
pub fn status_code(error: &Error) -> StatusCode {
    match error {
        Error::Validation(_) => StatusCode::InvalidArgument,
        Error::Authentication(_) => StatusCode::Unauthenticated,
        Error::RateLimited { .. } => StatusCode::ResourceExhausted,
        Error::Timeout => StatusCode::DeadlineExceeded,
        Error::Network { .. } => StatusCode::Unavailable,
        _ => StatusCode::Internal,
    }
}

/// Turn a failure into the caller-facing error for a provider
///
/// Validation errors originate locally and keep their message; everything
/// else gets the fixed `error communicating with {provider}` message.
pub fn normalize(display_name: &str, err: &Error) -> GatewayError {
    let code = status_code(err);
    if let Error::Validation(message) = err {
        return GatewayError::new(code, message.clone());
    }

    error!(provider = display_name, code = %code, error = %err, "provider call failed");

    let normalized = GatewayError::new(code, format!("error communicating with {display_name}"));
    match err {
        Error::RateLimited {
            retry_after: Some(wait),
            ..
        } => normalized.with_details(format!("retry after {}s", wait.as_secs())),
        _ => normalized,
    }
}

/// The terminal chunk written in place of a failed stream
pub fn error_chunk(display_name: &str, err: &Error) -> StreamChunk {
    if err.is_validation() {
        tracing::warn!(provider = display_name, error = %err, "stream request rejected");
    } else {
        error!(provider = display_name, error = %err, "provider stream failed");
    }
    StreamChunk::error()
}
