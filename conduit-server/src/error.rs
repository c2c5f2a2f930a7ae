//! HTTP rendering of gateway errors

use axum::http::StatusCode as HttpStatus;
use axum::response::{IntoResponse, Response};
use axum::Json;
use conduit_gateway::{GatewayError, StatusCode};

/// Errors a route can answer with
#[derive(Debug)]
pub enum ApiError {
    /// The path names a vendor that is not mounted
    UnknownVendor(String),
    /// The request body is not a prompt request
    InvalidBody(String),
    /// A normalized provider failure
    Gateway(GatewayError),
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self::Gateway(err)
    }
}

/// The HTTP status for a gateway error class
pub fn http_status(code: StatusCode) -> HttpStatus {
    match code {
        StatusCode::InvalidArgument => HttpStatus::BAD_REQUEST,
        StatusCode::Unauthenticated => HttpStatus::UNAUTHORIZED,
        StatusCode::ResourceExhausted => HttpStatus::TOO_MANY_REQUESTS,
        StatusCode::DeadlineExceeded => HttpStatus::GATEWAY_TIMEOUT,
        StatusCode::Unavailable => HttpStatus::SERVICE_UNAVAILABLE,
        StatusCode::Internal => HttpStatus::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::UnknownVendor(vendor) => (
                HttpStatus::NOT_FOUND,
                GatewayError::new(
                    StatusCode::InvalidArgument,
                    format!("provider `{vendor}` is not configured"),
                ),
            ),
            Self::InvalidBody(reason) => (
                HttpStatus::BAD_REQUEST,
                GatewayError::new(StatusCode::InvalidArgument, "malformed prompt request")
                    .with_details(reason),
            ),
            Self::Gateway(err) => (http_status(err.code), err),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (StatusCode::InvalidArgument, 400),
            (StatusCode::Unauthenticated, 401),
            (StatusCode::ResourceExhausted, 429),
            (StatusCode::DeadlineExceeded, 504),
            (StatusCode::Unavailable, 503),
            (StatusCode::Internal, 500),
        ];
        for (code, status) in cases {
            assert_eq!(http_status(code).as_u16(), status, "{code}");
        }
    }

    #[test]
    fn test_unknown_vendor_is_not_found() {
        let response = ApiError::UnknownVendor("anthropic".into()).into_response();
        assert_eq!(response.status(), HttpStatus::NOT_FOUND);
    }
}
