use serde::{Deserialize, Serialize};

use crate::engine::value::Value;

/// A single observed clinical datum, e.g. `age = 70` or `has_diabetes = true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    /// The clinical variable name.
    pub key: String,
    /// The observed value. Must be a boolean, number, or string to pass
    /// validation.
    pub value: Value,
}

impl Fact {
    /// Create a new fact.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a fact from an untyped JSON value.
    pub fn from_json(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value: Value::from_json(value),
        }
    }
}

/// Convert a JSON object (e.g. a request body) into a list of facts.
///
/// Entries keep the iteration order of the map. No validation happens here.
pub fn facts_from_json(object: serde_json::Map<String, serde_json::Value>) -> Vec<Fact> {
    object
        .into_iter()
        .map(|(key, value)| Fact::from_json(key, value))
        .collect()
}
