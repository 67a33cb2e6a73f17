//! Configuration document loading and dotted-path field access.
//!
//! The analytics configuration has no fixed schema type. Fields are resolved
//! on demand through dotted paths (`ga4.measurement_id`), and a missing field
//! is reported as `None`, which is distinct from a present JSON `null`.

use crate::ContractError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A parsed, read-only analytics configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root: Value,
}

impl ConfigDocument {
    /// Wrap an already parsed JSON value.
    pub fn new(root: Value) -> Self {
        ConfigDocument { root }
    }

    /// Parse a document from JSON text.
    ///
    /// `origin` is only used to label the error; it is normally the path the
    /// text was read from.
    pub fn from_json_str(text: &str, origin: &Path) -> Result<Self, ContractError> {
        serde_json::from_str(text)
            .map(ConfigDocument::new)
            .map_err(|e| ContractError::InvalidJson {
                path: origin.to_path_buf(),
                detail: e.to_string(),
            })
    }

    /// Read and parse a document from disk.
    pub fn load(path: &Path) -> Result<Self, ContractError> {
        let text = fs::read_to_string(path).map_err(|source| ContractError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = text.len(), "loaded analytics config");
        Self::from_json_str(&text, path)
    }

    /// The underlying JSON value.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Resolve a dotted path.
    ///
    /// Returns `None` as soon as a segment is missing or an intermediate
    /// value is not an object.
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.root, |current, segment| current.as_object()?.get(segment))
    }

    /// Resolve a dotted path to a string. `None` when absent or not a string.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Resolve a dotted path to a boolean. `None` when absent or not a boolean.
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    /// Resolve a dotted path to a list.
    pub fn get_array(&self, path: &str) -> Option<&Vec<Value>> {
        self.get(path).and_then(Value::as_array)
    }

    /// Resolve a dotted path to a nested mapping.
    pub fn get_object(&self, path: &str) -> Option<&Map<String, Value>> {
        self.get(path).and_then(Value::as_object)
    }

    /// Whether the value at a dotted path is truthy. Absent is falsy.
    pub fn is_truthy(&self, path: &str) -> bool {
        self.get(path).map(is_truthy).unwrap_or(false)
    }
}

/// Truthiness of a loosely typed flag.
///
/// `null`, `false`, zero, and empty strings, lists and mappings are falsy;
/// everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

impl From<Value> for ConfigDocument {
    fn from(root: Value) -> Self {
        ConfigDocument::new(root)
    }
}
