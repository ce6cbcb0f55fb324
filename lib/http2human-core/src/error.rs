//! Error types for http2human.
//!
//! Two layers of errors live here:
//! - [`TransportError`] - what an [`HttpClient`](crate::HttpClient) reports when it
//!   could not produce a response at all.
//! - [`NormalizedError`] - the single closed-shape failure handed to callers, tagged
//!   with an [`ErrorKind`].

use std::time::Duration;

use derive_more::{Display, Error, From};
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// Error Kind
// ============================================================================

/// Origin of a failure.
///
/// The set is closed: every [`NormalizedError`] carries exactly one kind and callers
/// never need to look at raw status codes to recover it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum ErrorKind {
    /// The server answered with a 4xx status; the caller can fix the request.
    #[display("UserError")]
    UserError,
    /// The server answered with a 5xx status.
    #[display("ServerError")]
    ServerError,
    /// The request never reached the remote host, or never came back.
    #[display("NetworkError")]
    NetworkError,
    /// The deadline elapsed before any response arrived.
    #[display("TimeoutError")]
    TimeoutError,
    /// Anything else: unknown status codes, body decoding failures,
    /// unclassified transport failures.
    #[display("LowLevelError")]
    LowLevelError,
}

impl ErrorKind {
    /// Canonical name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UserError => "UserError",
            Self::ServerError => "ServerError",
            Self::NetworkError => "NetworkError",
            Self::TimeoutError => "TimeoutError",
            Self::LowLevelError => "LowLevelError",
        }
    }

    /// Returns `true` for [`ErrorKind::UserError`].
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::UserError)
    }

    /// Returns `true` for [`ErrorKind::ServerError`].
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::ServerError)
    }

    /// Returns `true` for [`ErrorKind::NetworkError`].
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError)
    }

    /// Returns `true` for [`ErrorKind::TimeoutError`].
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::TimeoutError)
    }

    /// Returns `true` for [`ErrorKind::LowLevelError`].
    #[must_use]
    pub const fn is_low_level(&self) -> bool {
        matches!(self, Self::LowLevelError)
    }

    /// Returns `true` when a failure of this kind implies a response was received.
    #[must_use]
    pub const fn is_response_error(&self) -> bool {
        matches!(self, Self::UserError | Self::ServerError)
    }
}

// ============================================================================
// Normalized Error
// ============================================================================

/// The normalized failure of one dispatched request.
///
/// Only [`kind`](Self::kind) and [`message`](Self::message) are guaranteed;
/// every other field is best-effort.
#[derive(Debug, Clone, PartialEq, Display, Error, Serialize)]
#[display("{kind}: {message}")]
#[serde(rename_all = "camelCase")]
pub struct NormalizedError {
    kind: ErrorKind,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<u16>,
}

impl NormalizedError {
    /// Create an error carrying only a kind and a message.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: None,
            response_body: None,
            status_code: None,
        }
    }

    /// Build the error for a received 4xx/5xx response from its decoded body.
    ///
    /// The server-supplied hint, when there is one, becomes both the message and the
    /// suggestion. Without a hint the message falls back to the canonical reason phrase.
    #[must_use]
    pub fn build(kind: ErrorKind, status: u16, hint: Option<String>, body: Value) -> Self {
        let message = hint
            .clone()
            .unwrap_or_else(|| fallback_message(status));
        Self {
            kind,
            message,
            suggestion: hint,
            response_body: Some(body),
            status_code: Some(status),
        }
    }

    /// The deadline elapsed before the transport answered.
    #[must_use]
    pub fn timeout(ttl: Duration) -> Self {
        Self::new(
            ErrorKind::TimeoutError,
            format!("Timed out in {} ms", ttl.as_millis()),
        )
    }

    /// A response arrived with a status outside `[200, 600)`.
    #[must_use]
    pub fn unknown_status(status: u16) -> Self {
        Self {
            status_code: Some(status),
            ..Self::new(
                ErrorKind::LowLevelError,
                format!("Unknown Status Code: {status}"),
            )
        }
    }

    /// Reading a received body failed.
    #[must_use]
    pub fn decode_failure(status: u16, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status),
            ..Self::new(ErrorKind::LowLevelError, message)
        }
    }

    /// The transport failed, before any response or while reading its body.
    #[must_use]
    pub fn from_transport(err: &TransportError) -> Self {
        Self {
            status_code: err.status(),
            ..Self::new(err.kind(), err.to_string())
        }
    }

    /// Replace the kind, keeping every other field.
    #[must_use]
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Origin of the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Server-supplied resolution hint.
    #[must_use]
    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    /// Parsed response body, or a `{"rawText": ...}` wrapper when it was not JSON.
    #[must_use]
    pub const fn response_body(&self) -> Option<&Value> {
        self.response_body.as_ref()
    }

    /// HTTP status of the received response.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        self.status_code
    }
}

fn fallback_message(status: u16) -> String {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map_or_else(|| format!("HTTP error {status}"), str::to_string)
}

impl From<TransportError> for NormalizedError {
    fn from(err: TransportError) -> Self {
        Self::from_transport(&err)
    }
}

// ============================================================================
// Transport Error
// ============================================================================

/// Failure reported by a transport before any response was received.
#[derive(Debug, Display, Error, From)]
pub enum TransportError {
    /// Network/connection errors.
    ///
    /// This is the canonical "connection failed" signal.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// The exchange broke without a connectivity failure, e.g. a malformed response.
    #[display("protocol error: {_0}")]
    #[from(skip)]
    Protocol(#[error(not(source))] String),

    /// The status line arrived but the body could not be read.
    #[display("unable to read response body: {message}")]
    #[from(skip)]
    Body {
        /// Status of the response whose body was lost.
        status: u16,
        /// Reason reported by the transport.
        message: String,
    },

    /// The transport gave up on its own ceiling.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    Form(serde_html_form::ser::Error),
}

/// Result type alias using [`TransportError`].
pub type Result<T> = std::result::Result<T, TransportError>;

impl TransportError {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// Create a body read error for a response received with `status`.
    #[must_use]
    pub fn body(status: u16, message: impl Into<String>) -> Self {
        Self::Body {
            status,
            message: message.into(),
        }
    }

    /// Status of the received response, if the failure happened after one arrived.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Body { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Kind this failure is surfaced with.
    ///
    /// Only the connection signal becomes a [`ErrorKind::NetworkError`]; everything the
    /// transport cannot attribute stays a [`ErrorKind::LowLevelError`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection(_) => ErrorKind::NetworkError,
            Self::Timeout => ErrorKind::TimeoutError,
            _ => ErrorKind::LowLevelError,
        }
    }
}
