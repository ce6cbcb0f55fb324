//! Success payload of a dispatched request.

use serde_json::Value;

use crate::NormalizedError;

/// The single result of one dispatched request.
pub type Outcome = std::result::Result<Payload, NormalizedError>;

/// Body of a successful response.
///
/// Parsed JSON when the body is JSON, the raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The body parsed as JSON.
    Json(Value),
    /// The body as received, not valid JSON.
    Text(String),
}

impl Payload {
    /// Build a payload from a body text, falling back to the text when it is not JSON.
    #[must_use]
    pub fn from_text(text: String) -> Self {
        crate::parse_json(&text).map_or(Self::Text(text), Self::Json)
    }

    /// Returns `true` when the body was JSON.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// JSON value, if the body was JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Raw text, if the body was not JSON.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }

    /// Consume into a JSON value; a text body becomes a JSON string.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
        }
    }

    /// Deserialize the payload into a typed value.
    ///
    /// # Errors
    ///
    /// Returns a [`LowLevelError`](crate::ErrorKind::LowLevelError) naming the failing
    /// field when the payload does not match `T`.
    pub fn deserialize<T: serde::de::DeserializeOwned>(self) -> Result<T, NormalizedError> {
        crate::from_json_value(self.into_json())
    }
}
