//! Streaming prompt relay
//!
//! A relay moves through `Idle -> Streaming -> Terminating -> Closed`, with
//! any failure short-circuiting to a single `ERROR` terminal chunk. Content
//! is forwarded in provider order as soon as it arrives; nothing is batched.
//! Every exit path writes at most one terminal chunk and closes the sink
//! exactly once.

use crate::elapsed_millis;
use crate::normalize::error_chunk;
use crate::sink::{ChunkSink, SinkError};
use conduit_core::{
    Error, FinishDelta, FinishReason, PromptRequest, Provider, StreamChunk, StreamEvent,
};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// How a relay ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOutcome {
    /// The terminal chunk carried this finish reason
    Completed(FinishReason),
    /// The provider failed and an `ERROR` terminal chunk was written
    Failed,
    /// The consumer went away before the terminal chunk
    Disconnected,
}

/// Serves prompts whose output is relayed chunk by chunk
#[derive(Clone)]
pub struct StreamingPromptHandler {
    provider: Arc<dyn Provider>,
}

impl StreamingPromptHandler {
    /// Create a handler for one provider
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Relay one prompt into `sink`, then close it
    pub async fn handle<S>(&self, request: &PromptRequest, sink: &mut S) -> StreamOutcome
    where
        S: ChunkSink + ?Sized,
    {
        debug!(
            provider = self.provider.name(),
            model = %request.model,
            messages = request.messages.len(),
            "stream prompt received"
        );

        let started = Instant::now();
        let outcome = self.relay(request, sink, started).await;
        sink.close().await;

        debug!(
            provider = self.provider.name(),
            duration_ms = elapsed_millis(started),
            outcome = ?outcome,
            "stream prompt closed"
        );
        outcome
    }

    async fn relay<S>(&self, request: &PromptRequest, sink: &mut S, started: Instant) -> StreamOutcome
    where
        S: ChunkSink + ?Sized,
    {
        let mut stream = match self.provider.stream(request).await {
            Ok(stream) => stream,
            Err(err) => return self.fail(sink, &err).await,
        };

        loop {
            // Stop as soon as the consumer leaves, even while the upstream is quiet.
            let next = tokio::select! {
                item = stream.next() => Some(item),
                () = sink.closed() => None,
            };
            let item = match next {
                Some(Some(item)) => item,
                Some(None) => break,
                None => {
                    drop(stream);
                    return self.disconnected(&SinkError::Closed);
                }
            };

            match item {
                Ok(StreamEvent::Content(delta)) => {
                    if delta.text.is_empty() {
                        continue;
                    }
                    if let Err(err) = sink.write(StreamChunk::content(delta.text)).await {
                        return self.disconnected(&err);
                    }
                }
                Ok(StreamEvent::Finish(finish)) => {
                    // Nothing after the end marker matters; release the upstream now.
                    drop(stream);
                    return self.terminate(sink, finish, started).await;
                }
                Err(err) => {
                    drop(stream);
                    return self.fail(sink, &err).await;
                }
            }
        }

        let finish = FinishDelta {
            reason: FinishReason::Done,
            ..FinishDelta::default()
        };
        self.terminate(sink, finish, started).await
    }

    async fn terminate<S>(&self, sink: &mut S, finish: FinishDelta, started: Instant) -> StreamOutcome
    where
        S: ChunkSink + ?Sized,
    {
        if let Some(text) = finish.content.filter(|text| !text.is_empty()) {
            if let Err(err) = sink.write(StreamChunk::content(text)).await {
                return self.disconnected(&err);
            }
        }

        let terminal = StreamChunk::finished(finish.reason, finish.usage, elapsed_millis(started));
        match sink.write(terminal).await {
            Ok(()) => StreamOutcome::Completed(finish.reason),
            Err(err) => self.disconnected(&err),
        }
    }

    async fn fail<S>(&self, sink: &mut S, err: &Error) -> StreamOutcome
    where
        S: ChunkSink + ?Sized,
    {
        let chunk = error_chunk(self.provider.display_name(), err);
        if let Err(write_err) = sink.write(chunk).await {
            self.disconnected(&write_err);
        }
        StreamOutcome::Failed
    }

    fn disconnected(&self, err: &SinkError) -> StreamOutcome {
        warn!(provider = self.provider.name(), error = %err, "stream consumer went away");
        StreamOutcome::Disconnected
    }
}
