//! Core types and response classification for http2human.
//!
//! This crate provides the transport-independent half of http2human:
//! - [`Method`], [`Request`] and [`RequestOptions`] - what is sent
//! - [`Response`] - what comes back
//! - [`HttpClient`] - the transport trait
//! - [`NormalizedError`], [`ErrorKind`] and [`TransportError`] - error handling
//! - [`decode_body`] - error body decoding across server conventions
//! - [`classify`] - status classification into an [`Outcome`]
//! - [`Payload`] - the success value
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)

mod body;
mod classify;
mod client;
mod decode;
mod error;
mod method;
mod payload;
pub mod prelude;
mod request;
mod response;

pub use body::{ContentType, from_json_value, to_form, to_json};
pub use classify::{classify, classify_result};
pub use client::HttpClient;
pub use decode::{DecodedBody, RAW_TEXT_KEY, decode_body, parse_json};
pub use error::{ErrorKind, NormalizedError, Result, TransportError};
pub use method::Method;
pub use payload::{Outcome, Payload};
pub use request::{Request, RequestOptions};
pub use response::Response;

// Re-export http crate types for status codes
pub use http::StatusCode;
