//! Destinations for relayed stream chunks

use async_trait::async_trait;
use conduit_core::StreamChunk;
use thiserror::Error;
use tokio::sync::mpsc;

/// Why a chunk could not be written
#[derive(Debug, Error)]
pub enum SinkError {
    /// The consumer went away
    #[error("stream consumer disconnected")]
    Closed,
    /// The transport failed
    #[error("sink write failed: {0}")]
    Transport(String),
}

/// Where a streaming handler writes its chunks
///
/// The handler calls [`close`](ChunkSink::close) exactly once, after the
/// terminal chunk or after giving up on a failed write.
#[async_trait]
pub trait ChunkSink: Send {
    /// Write one chunk, waiting for room if the consumer is slow
    async fn write(&mut self, chunk: StreamChunk) -> Result<(), SinkError>;

    /// Signal that no further chunks will follow
    async fn close(&mut self);

    /// Resolves once the consumer has gone away
    ///
    /// Sinks that cannot observe their consumer never resolve; the relay then
    /// notices a departure on the next failed write.
    async fn closed(&mut self) {
        std::future::pending::<()>().await;
    }
}

/// A sink backed by a bounded tokio channel
///
/// Closing drops the sender, so the receiving side sees the end of the
/// stream once it has drained the buffered chunks.
#[derive(Debug)]
pub struct ChannelSink {
    tx: Option<mpsc::Sender<StreamChunk>>,
}

impl ChannelSink {
    /// Create a sink and the receiver that consumes it
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<StreamChunk>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self { tx: Some(tx) }, rx)
    }

    /// Whether [`close`](ChunkSink::close) has been called
    pub fn is_closed(&self) -> bool {
        self.tx.is_none()
    }
}

#[async_trait]
impl ChunkSink for ChannelSink {
    async fn write(&mut self, chunk: StreamChunk) -> Result<(), SinkError> {
        let tx = self.tx.as_ref().ok_or(SinkError::Closed)?;
        tx.send(chunk).await.map_err(|_| SinkError::Closed)
    }

    async fn close(&mut self) {
        self.tx.take();
    }

    async fn closed(&mut self) {
        if let Some(tx) = &self.tx {
            tx.closed().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_sink_delivers_then_ends() {
        let (mut sink, mut rx) = ChannelSink::new(4);
        sink.write(StreamChunk::content("a")).await.unwrap();
        sink.write(StreamChunk::error()).await.unwrap();
        sink.close().await;

        assert!(sink.is_closed());
        assert_eq!(rx.recv().await, Some(StreamChunk::content("a")));
        assert_eq!(rx.recv().await, Some(StreamChunk::error()));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_write_after_receiver_dropped() {
        let (mut sink, rx) = ChannelSink::new(1);
        drop(rx);
        assert!(matches!(
            sink.write(StreamChunk::content("a")).await,
            Err(SinkError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_write_after_close() {
        let (mut sink, _rx) = ChannelSink::new(1);
        sink.close().await;
        assert!(matches!(
            sink.write(StreamChunk::content("a")).await,
            Err(SinkError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_closed_resolves_when_receiver_dropped() {
        let (mut sink, rx) = ChannelSink::new(1);
        drop(rx);
        tokio::time::timeout(std::time::Duration::from_secs(1), sink.closed())
            .await
            .unwrap();
    }
}
