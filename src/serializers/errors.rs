//! Serializer error types.

use thiserror::Error;

/// Errors raised while converting between JSON payloads and resource values.
#[derive(Debug, Error)]
pub enum SerializerError {
    /// The payload could not be parsed or produced as JSON.
    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A JSON object was required but another kind of value was found.
    #[error("Expected a JSON object but found {found}.")]
    NotAnObject {
        /// The kind of JSON value that was found.
        found: &'static str,
    },
}

/// Returns a short name for the kind of a JSON value.
pub(crate) const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
