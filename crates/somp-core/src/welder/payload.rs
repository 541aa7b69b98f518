//! Welder input shapes.

use serde_json::{Map, Value};

use super::WeldError;

/// A raw model response, parsed once at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Unstructured model output
    RawText(String),

    /// Already (partially) structured output
    Structured(Map<String, Value>),
}

impl Payload {
    /// Classify a JSON value. Only strings and objects are accepted.
    pub fn from_value(value: Value) -> Result<Self, WeldError> {
        match value {
            Value::String(text) => Ok(Payload::RawText(text)),
            Value::Object(map) => Ok(Payload::Structured(map)),
            other => Err(WeldError::InvalidPayloadType {
                found: json_kind(&other),
            }),
        }
    }

    /// Parse welder input: JSON when it parses, raw text otherwise.
    ///
    /// Input that is valid JSON but neither a string nor an object is
    /// rejected rather than treated as text.
    pub fn parse(input: &str) -> Result<Self, WeldError> {
        match serde_json::from_str::<Value>(input) {
            Ok(value) => Self::from_value(value),
            Err(_) => Ok(Payload::RawText(input.to_string())),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Payload::RawText(text.into())
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
