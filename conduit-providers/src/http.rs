//! HTTP client abstraction and utilities

use crate::constants::DEFAULT_REQUEST_TIMEOUT;
use crate::error::{self, UNATTRIBUTED};
use bytes::Bytes;
use conduit_core::Error;
use futures::Stream;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest_eventsource::{retry, EventSource};
use serde_json::Value;
use std::pin::Pin;
use std::time::Duration;

/// Type alias for response streams
pub type ResponseStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// HTTP client abstraction
///
/// Non-success statuses come back as typed errors attributed to
/// [`UNATTRIBUTED`]; adapters claim them with [`error::attribute`].
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a POST request
    async fn post(&self, url: &str, headers: HeaderMap, body: Value) -> Result<Value, Error>;

    /// Send a streaming POST request and return the raw body stream
    async fn post_stream(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Value,
    ) -> Result<ResponseStream, Error>;

    /// Open a server-sent event stream with a POST request
    ///
    /// The connection is established lazily on first poll and never retried.
    fn post_event_stream(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Value,
    ) -> Result<EventSource, Error>;
}

/// Default HTTP client implementation using reqwest
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Create a new HTTP client with the default request timeout
    pub fn new() -> Result<Self, Error> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a new HTTP client with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(error::network_error)?;

        Ok(Self { client })
    }

    async fn send(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Value,
    ) -> Result<reqwest::Response, Error> {
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(error::network_error)?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = error::retry_after(response.headers());
            let text = response.text().await.unwrap_or_default();
            return Err(error::status_error(UNATTRIBUTED, status, retry_after, &text));
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    async fn post(&self, url: &str, headers: HeaderMap, body: Value) -> Result<Value, Error> {
        let response = self.send(url, headers, body).await?;
        let bytes = response.bytes().await.map_err(error::network_error)?;
        serde_json::from_slice(&bytes).map_err(error::serialization_error)
    }

    async fn post_stream(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Value,
    ) -> Result<ResponseStream, Error> {
        let response = self.send(url, headers, body).await?;
        Ok(Box::pin(response.bytes_stream()))
    }

    fn post_event_stream(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Value,
    ) -> Result<EventSource, Error> {
        let builder = self.client.post(url).headers(headers).json(&body);
        let mut source = EventSource::new(builder)
            .map_err(|e| Error::Configuration(format!("cannot open event stream: {e}")))?;
        source.set_retry_policy(Box::new(retry::Never));
        Ok(source)
    }
}

/// Helper to create common headers
pub fn create_headers(api_key: &str, additional: Option<HeaderMap>) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();

    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| Error::Configuration(format!("Invalid API key: {e}")))?,
    );

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(additional) = additional {
        headers.extend(additional);
    }

    Ok(headers)
}
