//! Transport logging middleware.
//!
//! Logs every transport call using the `tracing` crate: one event when the request
//! leaves, one when the response (or the transport failure) comes back.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Request, Response, Result, TransportError};

/// Layer that logs transport calls.
///
/// # Example
///
/// ```ignore
/// use http2human::HyperClient;
/// use http2human::middleware::LoggingLayer;
///
/// let client = HyperClient::builder()
///     .layer(LoggingLayer::new())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Verbosity of the logging middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Headers and body sizes at debug level.
    Debug,
    /// Method, URL and status at info level.
    #[default]
    Info,
}

impl LoggingLayer {
    /// Logging at info level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logging at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// Configured verbosity.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service that logs transport calls.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

impl<S> Service<Request<Bytes>> for Logging<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let method = request.method();
        let url = request.url().to_string();
        let level = self.level;
        let span = span!(Level::INFO, "http2human_request", %method, %url);

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();
                if level == LogLevel::Debug {
                    debug!(
                        headers = ?request.headers(),
                        body_bytes = request.body().map_or(0, Bytes::len),
                        "sending request"
                    );
                } else {
                    info!("sending request");
                }

                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                log_result(&result, level, elapsed_ms);
                result
            }
            .instrument(span),
        )
    }
}

fn log_result(result: &Result<Response<Bytes>>, level: LogLevel, elapsed_ms: u64) {
    match result {
        Ok(response) => {
            let status = response.status();
            if level == LogLevel::Debug {
                debug!(
                    status,
                    headers = ?response.headers(),
                    body_bytes = response.body().len(),
                    elapsed_ms,
                    "response received"
                );
            }

            if response.ok() {
                info!(status, elapsed_ms, "request completed");
            } else if response.is_client_error() {
                warn!(status, elapsed_ms, "request rejected by server");
            } else if response.is_server_error() {
                warn!(status, elapsed_ms, "server failed to handle request");
            } else {
                warn!(status, elapsed_ms, "unexpected status code");
            }
        }
        Err(err) => {
            warn!(error = %err, kind = %err.kind(), elapsed_ms, "transport failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_layer_default() {
        assert_eq!(LoggingLayer::new().level(), LogLevel::Info);
    }

    #[test]
    fn logging_layer_debug() {
        assert_eq!(LoggingLayer::debug().level(), LogLevel::Debug);
    }
}
