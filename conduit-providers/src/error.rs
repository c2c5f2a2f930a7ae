//! Conversions from transport and vendor failures into core errors

use conduit_core::Error as CoreError;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use std::time::Duration;

/// Placeholder provider name used by the HTTP layer before an adapter claims the error
pub const UNATTRIBUTED: &str = "upstream";

/// Convert network errors to core errors
pub fn network_error(error: reqwest::Error) -> CoreError {
    if error.is_timeout() {
        return CoreError::Timeout;
    }
    CoreError::Network {
        message: error.to_string(),
        source: Some(Box::new(error)),
    }
}

/// Convert serialization errors to core errors
pub fn serialization_error(error: serde_json::Error) -> CoreError {
    CoreError::Serialization {
        message: error.to_string(),
        source: Some(Box::new(error)),
    }
}

/// Map a non-success HTTP status into a typed error
///
/// 401 and 403 become [`CoreError::Authentication`], 429 becomes
/// [`CoreError::RateLimited`] and every other status a [`CoreError::Provider`]
/// carrying the status code.
pub fn status_error(
    provider: impl Into<String>,
    status: StatusCode,
    retry_after: Option<Duration>,
    body: &str,
) -> CoreError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            CoreError::Authentication(format!("HTTP {status}: {body}"))
        }
        StatusCode::TOO_MANY_REQUESTS => CoreError::RateLimited {
            provider: provider.into(),
            retry_after,
        },
        _ => CoreError::Provider {
            provider: provider.into(),
            message: format!("HTTP {status}: {body}"),
            status: Some(status.as_u16()),
            source: None,
        },
    }
}

/// Read a `Retry-After` header given in seconds
pub fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Claim errors raised by the HTTP layer for a named provider
///
/// ```
/// use conduit_core::Error;
/// use conduit_providers::error::{attribute, UNATTRIBUTED};
///
/// let err = Error::RateLimited { provider: UNATTRIBUTED.into(), retry_after: None };
/// match attribute("openai")(err) {
///     Error::RateLimited { provider, .. } => assert_eq!(provider, "openai"),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn attribute(provider: &'static str) -> impl Fn(CoreError) -> CoreError {
    move |error| match error {
        CoreError::Provider {
            provider: p,
            message,
            status,
            source,
        } if p == UNATTRIBUTED => CoreError::Provider {
            provider: provider.to_string(),
            message,
            status,
            source,
        },
        CoreError::RateLimited {
            provider: p,
            retry_after,
        } if p == UNATTRIBUTED => CoreError::RateLimited {
            provider: provider.to_string(),
            retry_after,
        },
        other => other,
    }
}

/// Convert an event-source failure into a core error
pub fn event_source_error(provider: &str, error: reqwest_eventsource::Error) -> CoreError {
    use reqwest_eventsource::Error as EsError;

    match error {
        EsError::InvalidStatusCode(status, response) => {
            let retry = retry_after(response.headers());
            status_error(provider, status, retry, "")
        }
        EsError::Transport(err) => network_error(err),
        EsError::InvalidContentType(content_type, ..) => CoreError::Provider {
            provider: provider.to_string(),
            message: format!("unexpected content type {content_type:?} for event stream"),
            status: None,
            source: None,
        },
        other => CoreError::Network {
            message: format!("event stream error: {other}"),
            source: None,
        },
    }
}
