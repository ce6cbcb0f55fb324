//! Response classification.
//!
//! | Status | Outcome |
//! |--------|---------|
//! | `[200, 400)` | `Ok(Payload)`: JSON when the body parses, raw text otherwise |
//! | `[400, 500)` | `Err` with [`ErrorKind::UserError`] |
//! | `[500, 600)` | `Err` with [`ErrorKind::ServerError`] |
//! | anything else | `Err` with [`ErrorKind::LowLevelError`], body untouched |
//!
//! A body that cannot be read as text is a [`ErrorKind::LowLevelError`] whatever the
//! status.

use bytes::Bytes;
use tracing::debug;

use crate::{ErrorKind, NormalizedError, Outcome, Payload, Response, TransportError, decode_body};

/// Classify a received response into an [`Outcome`].
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use bytes::Bytes;
/// use http2human_core::{ErrorKind, Response, classify};
///
/// let response = Response::new(400, HashMap::new(), Bytes::from("wrong"));
/// let err = classify(&response).unwrap_err();
///
/// assert_eq!(err.kind(), ErrorKind::UserError);
/// assert_eq!(err.message(), "wrong");
/// ```
pub fn classify(response: &Response<Bytes>) -> Outcome {
    let status = response.status();

    let kind = match status {
        200..400 => return read_text(response).map(Payload::from_text),
        400..500 => ErrorKind::UserError,
        500..600 => ErrorKind::ServerError,
        _ => {
            debug!(status, "unexpected status code");
            return Err(NormalizedError::unknown_status(status));
        }
    };

    let text = read_text(response)?;
    let decoded = decode_body(&text);
    debug!(status, %kind, hint = ?decoded.hint, "classified error response");

    Err(NormalizedError::build(kind, status, decoded.hint, decoded.body))
}

/// Classify the result of a transport call.
///
/// Transport failures keep the kind the transport attributes to them: the connection
/// signal becomes a [`ErrorKind::NetworkError`], unclassified ones a
/// [`ErrorKind::LowLevelError`]. A body lost after the status arrived is a
/// [`ErrorKind::LowLevelError`] that keeps the status code.
pub fn classify_result(result: Result<Response<Bytes>, TransportError>) -> Outcome {
    match result {
        Ok(response) => classify(&response),
        Err(err) => {
            debug!(error = %err, kind = %err.kind(), "transport failed");
            Err(NormalizedError::from_transport(&err))
        }
    }
}

fn read_text(response: &Response<Bytes>) -> Result<String, NormalizedError> {
    response.text().map_err(|err| {
        NormalizedError::decode_failure(
            response.status(),
            format!("unable to read response body: {err}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;

    fn response(status: u16, body: &'static [u8]) -> Response<Bytes> {
        Response::new(status, HashMap::new(), Bytes::from_static(body))
    }

    #[test]
    fn ok_range_parses_json() {
        for status in [200, 201, 299, 301, 399] {
            let_assert!(Ok(payload) = classify(&response(status, br#"{"cool":"nice"}"#)));
            check!(payload == Payload::Json(json!({"cool": "nice"})));
        }
    }

    #[test]
    fn ok_range_keeps_text() {
        let_assert!(Ok(payload) = classify(&response(200, b"nice")));
        check!(payload == Payload::Text("nice".to_string()));
    }

    #[test]
    fn no_content_is_not_an_error() {
        let_assert!(Ok(payload) = classify(&response(204, b"")));
        check!(payload == Payload::Text(String::new()));
    }

    #[test]
    fn client_errors() {
        for status in [400, 404, 422, 499] {
            let_assert!(Err(err) = classify(&response(status, br#"{"error":"nope"}"#)));
            check!(err.kind() == ErrorKind::UserError);
            check!(err.status_code() == Some(status));
            check!(err.message() == "nope");
            check!(err.suggestion() == Some("nope"));
            check!(err.response_body() == Some(&json!({"error": "nope"})));
        }
    }

    #[test]
    fn server_errors() {
        for status in [500, 502, 599] {
            let_assert!(Err(err) = classify(&response(status, br#"{"message":"down"}"#)));
            check!(err.kind() == ErrorKind::ServerError);
            check!(err.status_code() == Some(status));
            check!(err.message() == "down");
        }
    }

    #[test]
    fn plain_text_user_error_is_wrapped() {
        let_assert!(Err(err) = classify(&response(400, b"wrong")));
        check!(err.response_body() == Some(&json!({"rawText": "wrong"})));
        check!(err.suggestion() == Some("wrong"));
    }

    #[test]
    fn plain_text_server_error_is_wrapped() {
        let_assert!(Err(err) = classify(&response(503, b"maintenance")));
        check!(err.kind() == ErrorKind::ServerError);
        check!(err.response_body() == Some(&json!({"rawText": "maintenance"})));
    }

    #[test]
    fn unknown_status_codes() {
        for status in [100, 101, 199, 600, 999] {
            let_assert!(Err(err) = classify(&response(status, br#"{"error":"ignored"}"#)));
            check!(err.kind() == ErrorKind::LowLevelError);
            check!(err.message() == format!("Unknown Status Code: {status}"));
            check!(err.response_body().is_none());
        }
    }

    #[test]
    fn unreadable_body_is_low_level() {
        let_assert!(Err(err) = classify(&response(404, &[0xff, 0xfe])));
        check!(err.kind() == ErrorKind::LowLevelError);
        check!(err.status_code() == Some(404));
        check!(err.message().starts_with("unable to read response body"));

        let_assert!(Err(err) = classify(&response(200, &[0xc3, 0x28])));
        check!(err.kind() == ErrorKind::LowLevelError);
    }

    #[test]
    fn transport_failures() {
        let_assert!(Err(err) = classify_result(Err(TransportError::connection("refused"))));
        check!(err.kind() == ErrorKind::NetworkError);
        check!(err.status_code().is_none());

        let_assert!(Err(err) = classify_result(Err(TransportError::tls("handshake"))));
        check!(err.kind() == ErrorKind::LowLevelError);
        check!(err.message() == "TLS error: handshake");

        let_assert!(Err(err) = classify_result(Err(TransportError::body(502, "truncated"))));
        check!(err.kind() == ErrorKind::LowLevelError);
        check!(err.status_code() == Some(502));
    }
}
