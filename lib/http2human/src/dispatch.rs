//! Dispatching one request to a single normalized outcome.

use std::sync::Arc;
use std::time::Duration;

use tracing::{Instrument, debug, info_span};

use crate::race::{Race, race};
use crate::{
    DispatchConfig, ErrorKind, HttpClient, HyperClient, NormalizedError, Outcome, Request,
    RequestOptions, TransportError, classify_result,
};

/// Issues requests through an injected transport and normalizes every outcome.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
///
/// use http2human::{Dispatcher, ErrorKind, RequestOptions};
///
/// let dispatcher = Dispatcher::default();
/// match dispatcher
///     .dispatch("https://api.example.com/users/1", RequestOptions::new(), Some(Duration::from_secs(2)))
///     .await
/// {
///     Ok(payload) => println!("{payload:?}"),
///     Err(err) if err.kind() == ErrorKind::UserError => println!("fix it: {:?}", err.suggestion()),
///     Err(err) => println!("{err}"),
/// }
/// ```
#[derive(Debug)]
pub struct Dispatcher<C> {
    client: Arc<C>,
    config: DispatchConfig,
}

impl<C> Clone for Dispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            config: self.config,
        }
    }
}

impl<C> Dispatcher<C>
where
    C: HttpClient + 'static,
{
    /// Create a dispatcher over the given transport.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self::with_config(client, DispatchConfig::default())
    }

    /// Create a dispatcher with a custom configuration.
    #[must_use]
    pub fn with_config(client: C, config: DispatchConfig) -> Self {
        Self {
            client: Arc::new(client),
            config,
        }
    }

    /// The injected transport.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The dispatch configuration.
    #[must_use]
    pub const fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Send one request and normalize its outcome.
    ///
    /// `ttl` overrides the configured default; `Some(Duration::ZERO)` disables the timer.
    /// Exactly one outcome is produced: once the deadline fires, a late response is
    /// discarded without being classified.
    pub async fn dispatch(
        &self,
        url: &str,
        options: RequestOptions,
        ttl: Option<Duration>,
    ) -> Outcome {
        let url = url::Url::parse(url)
            .map_err(|err| NormalizedError::from(TransportError::from(err)))?;
        let request = Request::new(url, options);
        let ttl = self.config.effective_ttl(ttl);

        let span = info_span!(
            "dispatch",
            method = %request.method(),
            url = %request.url(),
            ttl_ms = ttl.map(|ttl| u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX)),
        );

        let client = Arc::clone(&self.client);
        let call = async move { client.execute(request).await };

        async move {
            let outcome = match race(call, ttl).await {
                Race::Completed(result) => classify_result(result),
                Race::TimedOut(ttl) => Err(NormalizedError::timeout(ttl)),
                Race::Abandoned => Err(NormalizedError::new(
                    ErrorKind::LowLevelError,
                    "request ended without a result",
                )),
            };

            match &outcome {
                Ok(payload) => debug!(json = payload.is_json(), "request succeeded"),
                Err(err) => debug!(
                    kind = %err.kind(),
                    status = err.status_code(),
                    message = err.message(),
                    "request failed"
                ),
            }
            outcome
        }
        .instrument(span)
        .await
    }

    /// Send a GET request without deadline override.
    pub async fn get(&self, url: &str) -> Outcome {
        self.dispatch(url, RequestOptions::new(), None).await
    }
}

impl Default for Dispatcher<HyperClient> {
    fn default() -> Self {
        Self::new(HyperClient::new())
    }
}

/// Send one request through `client` and normalize its outcome.
///
/// Shorthand for [`Dispatcher::dispatch`] without a default ttl.
pub async fn dispatch<C>(
    client: C,
    url: &str,
    options: RequestOptions,
    ttl: Option<Duration>,
) -> Outcome
where
    C: HttpClient + 'static,
{
    Dispatcher::new(client).dispatch(url, options, ttl).await
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert2::{check, let_assert};
    use bytes::Bytes;
    use serde_json::json;

    use super::*;
    use crate::{Payload, Response};

    #[derive(Clone)]
    struct Canned {
        status: u16,
        body: &'static str,
    }

    impl HttpClient for Canned {
        async fn execute(&self, _request: Request<Bytes>) -> crate::Result<Response<Bytes>> {
            Ok(Response::new(
                self.status,
                HashMap::new(),
                Bytes::from_static(self.body.as_bytes()),
            ))
        }
    }

    struct Refused;

    impl HttpClient for Refused {
        async fn execute(&self, _request: Request<Bytes>) -> crate::Result<Response<Bytes>> {
            Err(TransportError::connection("Network request failed"))
        }
    }

    #[tokio::test]
    async fn success_json() {
        let dispatcher = Dispatcher::new(Canned {
            status: 200,
            body: r#"{"cool":"nice"}"#,
        });
        let_assert!(Ok(payload) = dispatcher.get("http://localhost/json200").await);
        check!(payload == Payload::Json(json!({"cool": "nice"})));
    }

    #[tokio::test]
    async fn user_error() {
        let outcome = dispatch(
            Canned {
                status: 422,
                body: r#"{"error":{"message":"nope"}}"#,
            },
            "http://localhost/invalid",
            RequestOptions::new(),
            None,
        )
        .await;

        let_assert!(Err(err) = outcome);
        check!(err.kind() == ErrorKind::UserError);
        check!(err.status_code() == Some(422));
        check!(err.suggestion() == Some("nope"));
    }

    #[tokio::test]
    async fn connection_failure_is_network_error() {
        let_assert!(Err(err) = Dispatcher::new(Refused).get("http://localhost/").await);
        check!(err.kind() == ErrorKind::NetworkError);
        check!(err.status_code().is_none());
    }

    #[tokio::test]
    async fn invalid_url_is_low_level() {
        let dispatcher = Dispatcher::new(Canned {
            status: 200,
            body: "",
        });
        let_assert!(Err(err) = dispatcher.get("not a url").await);
        check!(err.kind() == ErrorKind::LowLevelError);
        check!(err.message().starts_with("invalid URL"));
    }

    #[tokio::test]
    async fn default_ttl_is_used() {
        let config = DispatchConfig::builder()
            .default_ttl(Duration::from_secs(1))
            .build();
        let dispatcher = Dispatcher::with_config(
            Canned {
                status: 204,
                body: "",
            },
            config,
        );

        check!(dispatcher.config().default_ttl == Some(Duration::from_secs(1)));
        let_assert!(Ok(Payload::Text(text)) = dispatcher.get("http://localhost/empty").await);
        check!(text.is_empty());
    }
}
