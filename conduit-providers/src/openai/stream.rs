//! Streaming implementation for OpenAI

use crate::constants::OPENAI_PROVIDER;
use crate::error;
use crate::openai::parser::OpenAIStreamParser;
use crate::traits::StreamEventParser;
use conduit_core::{Error, StreamEvent};
use futures::Stream;
use reqwest_eventsource::{Event, EventSource};
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

/// OpenAI streaming response
///
/// Dropping the stream closes the event source and with it the upstream
/// connection.
pub struct OpenAIStream {
    inner: EventSource,
    parser: OpenAIStreamParser,
    queued: VecDeque<StreamEvent>,
    done: bool,
}

impl OpenAIStream {
    /// Create a new OpenAI stream
    pub fn new(event_source: EventSource, stream_usage: bool) -> Self {
        Self {
            inner: event_source,
            parser: OpenAIStreamParser::new(stream_usage),
            queued: VecDeque::new(),
            done: false,
        }
    }

    fn finish(&mut self) {
        self.done = true;
        self.inner.close();
        self.queued.extend(self.parser.flush());
    }
}

impl Stream for OpenAIStream {
    type Item = Result<StreamEvent, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        loop {
            if let Some(event) = this.queued.pop_front() {
                return Poll::Ready(Some(Ok(event)));
            }
            if this.done {
                return Poll::Ready(None);
            }

            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(Event::Open))) => continue,
                Poll::Ready(Some(Ok(Event::Message(msg)))) => {
                    let is_done = msg.data.trim() == "[DONE]";
                    match this.parser.parse_event(&msg.data) {
                        Ok(events) => this.queued.extend(events),
                        Err(e) => {
                            this.done = true;
                            this.inner.close();
                            return Poll::Ready(Some(Err(e)));
                        }
                    }
                    if is_done {
                        this.finish();
                    }
                }
                Poll::Ready(Some(Err(reqwest_eventsource::Error::StreamEnded)))
                | Poll::Ready(None) => this.finish(),
                Poll::Ready(Some(Err(e))) => {
                    this.done = true;
                    this.inner.close();
                    return Poll::Ready(Some(Err(error::event_source_error(OPENAI_PROVIDER, e))));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
