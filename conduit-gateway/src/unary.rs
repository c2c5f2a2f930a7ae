//! Single-shot prompt handling

use crate::normalize::{normalize, GatewayError};
use crate::elapsed_millis;
use conduit_core::{PromptRequest, PromptResponse, Provider};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Serves prompts that wait for the whole completion
///
/// The handler holds only the provider it was built with; concurrent calls
/// share nothing else.
#[derive(Clone)]
pub struct UnaryPromptHandler {
    provider: Arc<dyn Provider>,
}

impl UnaryPromptHandler {
    /// Create a handler for one provider
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Run one prompt to completion
    ///
    /// Exactly one provider call is made and never retried. A completion with
    /// no choices resolves with empty content; missing token counts are zero.
    pub async fn handle(&self, request: &PromptRequest) -> Result<PromptResponse, GatewayError> {
        debug!(
            provider = self.provider.name(),
            model = %request.model,
            messages = request.messages.len(),
            "unary prompt received"
        );

        let started = Instant::now();
        let completion = self
            .provider
            .request(request)
            .await
            .map_err(|err| normalize(self.provider.display_name(), &err))?;
        let duration_ms = elapsed_millis(started);

        debug!(
            provider = self.provider.name(),
            duration_ms,
            finish_reason = %completion.finish_reason,
            "unary prompt completed"
        );

        Ok(PromptResponse::from_completion(completion, duration_ms))
    }
}
