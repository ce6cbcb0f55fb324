//! Response body decoding.
//!
//! Servers report errors in several inconsistent shapes:
//!
//! - `{"message": "..."}`
//! - `{"error": "..."}`
//! - `{"error": {"message": "..."}}`
//! - plain text
//!
//! [`decode_body`] folds all of them into a [`DecodedBody`]: a best-effort hint and the
//! structured body. It never fails; text that is not JSON is kept under
//! [`RAW_TEXT_KEY`].

use serde_json::{Map, Value};
use tracing::debug;

/// Key of the wrapper object holding a body that is not valid JSON.
///
/// Client and server errors share the same wrapper.
pub const RAW_TEXT_KEY: &str = "rawText";

/// Result of decoding an error response body.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBody {
    /// Server-supplied hint, used as both message and suggestion.
    pub hint: Option<String>,
    /// Parsed body, or a `{"rawText": ...}` wrapper.
    pub body: Value,
}

/// Decode a response body into a hint and a structured value.
///
/// # Example
///
/// ```
/// use http2human_core::decode_body;
/// use serde_json::json;
///
/// let decoded = decode_body(r#"{"error": {"message": "nope"}}"#);
/// assert_eq!(decoded.hint.as_deref(), Some("nope"));
/// assert_eq!(decoded.body, json!({"error": {"message": "nope"}}));
/// ```
#[must_use]
pub fn decode_body(text: &str) -> DecodedBody {
    match serde_json::from_str::<Value>(text) {
        Ok(body) => DecodedBody {
            hint: extract_hint(&body),
            body,
        },
        Err(err) => {
            debug!(error = %err, "response body is not JSON, keeping raw text");
            DecodedBody {
                hint: (!text.trim().is_empty()).then(|| text.to_string()),
                body: raw_text(text),
            }
        }
    }
}

/// Parse a successful body: JSON when possible, the raw text otherwise.
///
/// Returns `None` when the text is not JSON; that is not an error.
#[must_use]
pub fn parse_json(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

fn raw_text(text: &str) -> Value {
    let mut wrapper = Map::new();
    wrapper.insert(RAW_TEXT_KEY.to_string(), Value::String(text.to_string()));
    Value::Object(wrapper)
}

// `error` wins over `message`; a nested `error.message` falls back to the top-level one.
fn extract_hint(body: &Value) -> Option<String> {
    let message = body.get("message").and_then(as_hint);

    match body.get("error").filter(|error| is_truthy(error)) {
        None => message,
        Some(Value::String(error)) => Some(error.clone()),
        Some(error) => error
            .get("message")
            .filter(|nested| is_truthy(nested))
            .and_then(as_hint)
            .or(message),
    }
}

fn as_hint(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => true,
    }
}
