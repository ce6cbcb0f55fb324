//! Wrap one outbound HTTP request and turn its outcome into a normalized result.
//!
//! Whatever goes wrong, at whatever layer, callers get either a [`Payload`] or a
//! [`NormalizedError`] tagged with one [`ErrorKind`]:
//!
//! | Kind | When |
//! |------|------|
//! | `UserError` | the server answered 4xx |
//! | `ServerError` | the server answered 5xx |
//! | `NetworkError` | the connection failed |
//! | `TimeoutError` | the ttl elapsed before any response |
//! | `LowLevelError` | anything else |
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//!
//! use http2human::prelude::*;
//!
//! let dispatcher = Dispatcher::new(HyperClient::builder().with_logging().build());
//!
//! let outcome = dispatcher
//!     .dispatch(
//!         "https://api.example.com/users",
//!         RequestOptions::new().method(Method::Post).json(&new_user)?,
//!         Some(Duration::from_millis(500)),
//!     )
//!     .await;
//!
//! match outcome {
//!     Ok(payload) => {
//!         let user: User = payload.deserialize()?;
//!     }
//!     Err(err) => eprintln!("{}: {:?}", err.kind(), err.suggestion()),
//! }
//! ```

mod client;
mod config;
mod connector;
mod dispatch;
pub mod middleware;
pub mod prelude;
pub mod race;

pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder, DispatchConfig, DispatchConfigBuilder};
pub use dispatch::{Dispatcher, dispatch};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use http2human_core::{
    ContentType, DecodedBody, ErrorKind, HttpClient, Method, NormalizedError, Outcome, Payload,
    RAW_TEXT_KEY, Request, RequestOptions, Response, Result, StatusCode, TransportError,
    classify, classify_result, decode_body, from_json_value, parse_json, to_form, to_json,
};

pub use url;
