//! Typed accessors over untyped JSON trees.

use serde_json::Value;

use crate::error::{Error, ErrorKind, Result};

/// Accessors that fail with a [`ErrorKind::Decode`] naming the mismatch
/// instead of silently yielding nothing.
pub trait JsonExt {
    /// The first element of a JSON array.
    fn first_element(&self) -> Result<&Value>;

    /// A string member of a JSON object.
    fn str_field(&self, key: &str) -> Result<&str>;

    /// An array member of a JSON object, if present and an array.
    fn array_field(&self, key: &str) -> Option<&[Value]>;

    /// Strings verbatim, every other value as its JSON text.
    fn to_text(&self) -> String;
}

impl JsonExt for Value {
    fn first_element(&self) -> Result<&Value> {
        match self {
            Value::Array(items) => items
                .first()
                .ok_or_else(|| decode_error("expected a non-empty array")),
            other => Err(decode_error(format!(
                "expected an array, found {}",
                kind_name(other)
            ))),
        }
    }

    fn str_field(&self, key: &str) -> Result<&str> {
        match self.get(key) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(decode_error(format!(
                "field `{key}` is {}, expected a string",
                kind_name(other)
            ))),
            None => Err(decode_error(format!("missing field `{key}`"))),
        }
    }

    fn array_field(&self, key: &str) -> Option<&[Value]> {
        self.get(key).and_then(Value::as_array).map(Vec::as_slice)
    }

    fn to_text(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

fn decode_error(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::Decode(message.into()))
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
