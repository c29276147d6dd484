//! Request bodies for the mutating endpoints.
//!
//! Bodies are parsed leniently: anything that is not a JSON object, or a
//! field with the wrong type, falls back to the field's default instead of
//! failing the request.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /todos/{username}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddTodoRequest {
    /// Todo text; empty when missing.
    pub todo: String,
}

/// Body of `DELETE /todos/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteTodoRequest {
    /// Position to remove; `-1` (never valid) when missing.
    pub todo_idx: i64,
}

impl Default for DeleteTodoRequest {
    fn default() -> Self {
        Self { todo_idx: -1 }
    }
}

impl AddTodoRequest {
    /// Parse from a raw request body, never failing.
    pub fn from_body(body: &[u8]) -> Self {
        parse_lenient(body)
    }
}

impl DeleteTodoRequest {
    /// Parse from a raw request body, never failing.
    pub fn from_body(body: &[u8]) -> Self {
        parse_lenient(body)
    }
}

fn parse_lenient<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    // Structs also deserialize from JSON arrays, so require an object first.
    match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
        _ => T::default(),
    }
}
