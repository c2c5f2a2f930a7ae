//! Core types used throughout the Conduit gateway

pub mod message;
pub mod request;
pub mod response;
pub mod stream;
