//! Common traits for provider implementations

use conduit_core::{Completion, Error, PromptRequest, StreamEvent};
use serde_json::Value;

/// Translate vendor-agnostic requests into a vendor body
///
/// Translation is pure: no I/O, and the same input always yields the same
/// output.
pub trait RequestConverter: Send + Sync {
    /// The typed vendor request
    type Request: serde::Serialize;

    /// Translate `request`, setting the vendor's stream flag to `stream`
    fn convert_request(&self, request: &PromptRequest, stream: bool)
        -> Result<Self::Request, Error>;

    /// Translate straight to JSON
    fn convert_to_value(&self, request: &PromptRequest, stream: bool) -> Result<Value, Error> {
        let body = self.convert_request(request, stream)?;
        serde_json::to_value(body).map_err(crate::error::serialization_error)
    }
}

/// Parse responses from provider-specific format
pub trait ResponseParser: Send + Sync {
    /// Parse provider-specific JSON into a completion
    fn parse_response(&self, value: Value) -> Result<Completion, Error>;
}

/// Parse streaming frames from provider-specific format
///
/// A parser lives for exactly one stream, so it may carry state between
/// frames (for example a finish reason waiting for its usage frame).
pub trait StreamEventParser: Send {
    /// Parse one frame of streaming data into zero or more events
    fn parse_event(&mut self, data: &str) -> Result<Vec<StreamEvent>, Error>;

    /// Events still held back when the underlying body ends
    fn flush(&mut self) -> Vec<StreamEvent> {
        Vec::new()
    }
}
