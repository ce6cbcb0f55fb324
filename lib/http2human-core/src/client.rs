//! HTTP transport trait.
//!
//! [`HttpClient`] is the only thing the dispatcher needs from the outside world: send a
//! request, hand back a response or a [`TransportError`](crate::TransportError).
//! Implement it directly for custom transports or scripted test doubles.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// This trait defines the interface for executing HTTP requests.
/// Implementations should be async-first and support connection pooling.
///
/// # Example
///
/// ```ignore
/// use http2human_core::{HttpClient, Request, Response, Result};
///
/// struct Canned;
///
/// impl HttpClient for Canned {
///     async fn execute(&self, _request: Request) -> Result<Response> {
///         Ok(Response::new(200, Default::default(), "ok".into()))
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained:
    /// - Connection errors (surfaced as network errors)
    /// - TLS errors
    /// - Transport-level timeouts
    /// - Invalid request
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

impl<C: HttpClient> HttpClient for Arc<C> {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        (**self).execute(request)
    }
}
