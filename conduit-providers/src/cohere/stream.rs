//! Cohere streaming implementation

use crate::cohere::parser::CohereStreamParser;
use crate::error;
use crate::http::ResponseStream;
use crate::stream_utils::LineBuffer;
use crate::traits::StreamEventParser;
use conduit_core::{Error, StreamEvent};
use futures_core::Stream;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Cohere streaming response over a newline-delimited JSON body
pub struct CohereStream {
    inner: ResponseStream,
    lines: LineBuffer,
    parser: CohereStreamParser,
    queued: VecDeque<StreamEvent>,
    failed: Option<Error>,
    done: bool,
}

impl CohereStream {
    /// Create a new Cohere stream from a raw body
    pub fn new(body: ResponseStream) -> Self {
        Self {
            inner: body,
            lines: LineBuffer::new(),
            parser: CohereStreamParser::new(),
            queued: VecDeque::new(),
            failed: None,
            done: false,
        }
    }

    fn parse_lines(&mut self, lines: Vec<String>) -> Result<(), Error> {
        for line in lines {
            let events = self.parser.parse_event(&line)?;
            self.queued.extend(events);
        }
        Ok(())
    }
}

impl Stream for CohereStream {
    type Item = Result<StreamEvent, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        loop {
            if let Some(event) = this.queued.pop_front() {
                return Poll::Ready(Some(Ok(event)));
            }
            // Events parsed ahead of a bad frame are delivered first.
            if let Some(e) = this.failed.take() {
                return Poll::Ready(Some(Err(e)));
            }
            if this.done {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    let lines = this.lines.add_data(&chunk);
                    if let Err(e) = this.parse_lines(lines) {
                        this.done = true;
                        this.failed = Some(e);
                    }
                }
                Poll::Ready(Some(Err(e))) => {
                    this.done = true;
                    return Poll::Ready(Some(Err(error::network_error(e))));
                }
                Poll::Ready(None) => {
                    this.done = true;
                    let rest = this.lines.flush().into_iter().collect();
                    match this.parse_lines(rest) {
                        Ok(()) => this.queued.extend(this.parser.flush()),
                        Err(e) => this.failed = Some(e),
                    }
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use conduit_core::{FinishDelta, FinishReason, Usage};
    use futures::StreamExt;
    use pretty_assertions::assert_eq;

    fn body(chunks: &[&'static str]) -> ResponseStream {
        let items: Vec<Result<Bytes, reqwest::Error>> = chunks
            .iter()
            .map(|chunk| Ok(Bytes::from_static(chunk.as_bytes())))
            .collect();
        Box::pin(futures::stream::iter(items))
    }

    #[tokio::test]
    async fn test_frames_split_across_chunks() {
        let stream = CohereStream::new(body(&[
            "{\"event_type\":\"stream-start\"}\n{\"event_type\":\"text-gen",
            "eration\",\"text\":\"a\"}\n{\"event_type\":\"text-generation\",\"text\":\"b\"}\n",
            "{\"event_type\":\"stream-end\",\"finish_reason\":\"MAX_TOKENS\",",
            "\"response\":{\"meta\":{\"billed_units\":{\"input_tokens\":4,\"output_tokens\":2}}}}",
        ]));

        let events: Vec<_> = stream.map(Result::unwrap).collect().await;
        assert_eq!(
            events,
            vec![
                StreamEvent::content("a"),
                StreamEvent::content("b"),
                StreamEvent::Finish(FinishDelta {
                    content: None,
                    reason: FinishReason::Limit,
                    usage: Some(Usage::new(4, 2)),
                }),
            ]
        );
    }

    #[tokio::test]
    async fn test_body_ending_without_sentinel() {
        let stream = CohereStream::new(body(&[
            "{\"event_type\":\"text-generation\",\"text\":\"only\"}\n",
        ]));

        let events: Vec<_> = stream.map(Result::unwrap).collect().await;
        assert_eq!(events, vec![StreamEvent::content("only")]);
    }

    #[tokio::test]
    async fn test_malformed_frame_ends_stream() {
        let mut stream = CohereStream::new(body(&[
            "{\"event_type\":\"text-generation\",\"text\":\"a\"}\n{oops}\n",
            "{\"event_type\":\"text-generation\",\"text\":\"b\"}\n",
        ]));

        assert_eq!(stream.next().await.unwrap().unwrap(), StreamEvent::content("a"));
        assert!(matches!(
            stream.next().await,
            Some(Err(Error::Serialization { .. }))
        ));
        assert!(stream.next().await.is_none());
    }
}
