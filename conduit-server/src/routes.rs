//! Route table and request handlers

use crate::error::ApiError;
use crate::state::{AppState, Vendor};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use conduit_core::{PromptRequest, PromptResponse, Provider};
use conduit_gateway::normalize::normalize;
use conduit_gateway::{ChannelSink, StreamingPromptHandler, UnaryPromptHandler};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, instrument};

/// Header carrying a per-request vendor key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Chunks buffered between the relay task and the SSE response
const STREAM_BUFFER: usize = 32;

/// Build the router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/:vendor/prompt", post(prompt))
        .route("/v1/:vendor/stream", post(stream))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let providers: Vec<&str> = state.vendors().into_iter().map(Vendor::as_str).collect();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "providers": providers,
    }))
}

#[instrument(skip(state, headers, payload))]
async fn prompt(
    State(state): State<AppState>,
    Path(vendor): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<PromptResponse>, ApiError> {
    let provider = resolve(&state, &vendor, &headers)?;
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;

    let response = UnaryPromptHandler::new(provider).handle(&request).await?;
    Ok(Json(response))
}

#[instrument(skip(state, headers, payload))]
async fn stream(
    State(state): State<AppState>,
    Path(vendor): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let provider = resolve(&state, &vendor, &headers)?;
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;

    let (mut sink, rx) = ChannelSink::new(STREAM_BUFFER);
    let handler = StreamingPromptHandler::new(provider);
    tokio::spawn(async move {
        let outcome = handler.handle(&request, &mut sink).await;
        debug!(?outcome, "relay task finished");
    });

    // The response ends once the relay closes its sink; dropping the response
    // drops the receiver, which the relay sees as a disconnect.
    let events = futures::stream::unfold(rx, |mut rx| async move {
        let chunk = rx.recv().await?;
        Some((Event::default().json_data(&chunk), rx))
    });

    Ok(Sse::new(events)
        .keep_alive(KeepAlive::default())
        .into_response())
}

/// Pick the provider for a request, honoring an `X-API-Key` override
fn resolve(
    state: &AppState,
    segment: &str,
    headers: &HeaderMap,
) -> Result<Arc<dyn Provider>, ApiError> {
    let vendor =
        Vendor::from_segment(segment).ok_or_else(|| ApiError::UnknownVendor(segment.into()))?;
    let api_key = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty());

    match state.provider(vendor, api_key) {
        None => Err(ApiError::UnknownVendor(segment.into())),
        Some(Ok(provider)) => Ok(provider),
        Some(Err(err)) => Err(normalize(vendor.display_name(), &err).into()),
    }
}
