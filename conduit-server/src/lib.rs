//! HTTP front end for the Conduit prompt gateway
//!
//! Mounts one unary and one streaming route per configured vendor:
//!
//! - `POST /v1/{vendor}/prompt` answers with a JSON `PromptResponse`
//! - `POST /v1/{vendor}/stream` answers with server-sent events, one `data:`
//!   frame per `StreamChunk`
//! - `GET /health` reports liveness and the mounted vendors
//!
//! Credentials come from [`ServerConfig`]; a request may bring its own key in
//! the `X-API-Key` header.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod routes;
pub mod shutdown;
pub mod state;

pub use config::{ConfigError, ServerConfig, VendorConfig};
pub use error::ApiError;
pub use routes::{router, API_KEY_HEADER};
pub use shutdown::shutdown_signal;
pub use state::{AppState, Vendor};
