//! Payload map and its JSON encoding

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::RelayResult;

/// Variables collected for the POST body, keyed by variable name.
///
/// Keys are kept sorted so the same environment always encodes to the same
/// bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload {
    entries: BTreeMap<String, Value>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a decoded JSON value
    pub fn insert_json(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), value);
    }

    /// Store a value verbatim as a JSON string
    pub fn insert_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), Value::String(value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode as a JSON object. Failure is fatal for the run.
    pub fn to_body(&self) -> RelayResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
