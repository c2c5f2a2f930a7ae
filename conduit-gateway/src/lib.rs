//! Prompt handlers for the Conduit gateway
//!
//! [`UnaryPromptHandler`] answers a prompt with one normalized
//! [`PromptResponse`](conduit_core::PromptResponse);
//! [`StreamingPromptHandler`] relays provider output into a [`ChunkSink`]
//! and always finishes with exactly one terminal chunk. Failures on either
//! path go through [`normalize`] so callers never see raw provider errors.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod normalize;
pub mod sink;
pub mod streaming;
pub mod unary;

#[cfg(test)]
mod testing;

pub use normalize::{GatewayError, StatusCode};
pub use sink::{ChannelSink, ChunkSink, SinkError};
pub use streaming::{StreamOutcome, StreamingPromptHandler};
pub use unary::UnaryPromptHandler;

use std::time::Instant;

/// Milliseconds since `started`, saturating
pub(crate) fn elapsed_millis(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
