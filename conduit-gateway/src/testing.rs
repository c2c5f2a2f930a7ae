//! In-memory provider used by the handler tests

use async_trait::async_trait;
use conduit_core::{Completion, Error, PromptRequest, Provider, ProviderStream, StreamEvent};
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Scripted provider: a fixed completion, a fixed event script, or a failure
pub(crate) struct FakeProvider {
    completion: Completion,
    script: Vec<Result<StreamEvent, String>>,
    failure: Option<fn() -> Error>,
    stall: bool,
    calls: AtomicUsize,
    pulled: Arc<AtomicUsize>,
    dropped: Arc<AtomicBool>,
}

impl FakeProvider {
    fn new() -> Self {
        Self {
            completion: Completion::default(),
            script: Vec::new(),
            failure: None,
            stall: false,
            calls: AtomicUsize::new(0),
            pulled: Arc::new(AtomicUsize::new(0)),
            dropped: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(crate) fn completing(completion: Completion) -> Self {
        Self {
            completion,
            ..Self::new()
        }
    }

    /// Both calls fail before any event is produced
    pub(crate) fn failing(failure: fn() -> Error) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new()
        }
    }

    /// `Err(message)` entries become network errors mid-stream
    pub(crate) fn streaming(script: Vec<Result<StreamEvent, String>>) -> Self {
        Self {
            script,
            ..Self::new()
        }
    }

    /// Plays `script`, then never yields again
    pub(crate) fn stalling(script: Vec<Result<StreamEvent, String>>) -> Self {
        Self {
            script,
            stall: true,
            ..Self::new()
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// How many scripted items the consumer pulled
    pub(crate) fn pulled(&self) -> usize {
        self.pulled.load(Ordering::SeqCst)
    }

    /// Whether the last opened stream has been dropped
    pub(crate) fn stream_dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for FakeProvider {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn display_name(&self) -> &'static str {
        "Fake"
    }

    async fn request(&self, _request: &PromptRequest) -> Result<Completion, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some(failure) => Err(failure()),
            None => Ok(self.completion.clone()),
        }
    }

    async fn stream(&self, _request: &PromptRequest) -> Result<ProviderStream, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.failure {
            return Err(failure());
        }

        let pulled = self.pulled.clone();
        let guard = DropFlag(self.dropped.clone());
        let items = self.script.clone();
        let played = futures::stream::iter(items).map(move |item| {
            let _held = &guard;
            pulled.fetch_add(1, Ordering::SeqCst);
            item.map_err(|message| Error::Network {
                message,
                source: None,
            })
        });
        if self.stall {
            Ok(Box::pin(played.chain(futures::stream::pending())))
        } else {
            Ok(Box::pin(played))
        }
    }
}
