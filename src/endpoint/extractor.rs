//! Lazy extraction of scalar values from JSON documents

use crate::config::PathSpecConfig;
use serde_json::Value;

/// Ordered object keys describing how to descend a JSON document
///
/// An empty path addresses the document itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSpec(Vec<String>);

impl PathSpec {
    pub fn new(keys: Vec<String>) -> Self {
        Self(keys)
    }

    /// Splits a dotted path such as `"items.id"` into its keys
    pub fn dotted(path: &str) -> Self {
        Self(path.split('.').map(str::to_string).collect())
    }

    pub fn keys(&self) -> &[String] {
        &self.0
    }
}

impl From<&PathSpecConfig> for PathSpec {
    fn from(config: &PathSpecConfig) -> Self {
        match config {
            PathSpecConfig::Dotted(path) => Self::dotted(path),
            PathSpecConfig::Keys(keys) => Self::new(keys.clone()),
        }
    }
}

/// Reads every scalar reachable through a [`PathSpec`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueExtractor {
    path: PathSpec,
}

impl ValueExtractor {
    pub fn new(path: PathSpec) -> Self {
        Self { path }
    }

    /// Lazily yields the values reachable from `document`
    ///
    /// Arrays are traversed transparently and never consume a key. Strings
    /// are yielded verbatim; numbers, booleans and null as their JSON text.
    /// Objects and arrays at the end of the path yield nothing, nor does a
    /// missing key. Order is depth-first with array elements in order.
    pub fn extract<'a>(&'a self, document: &'a Value) -> Extract<'a> {
        Extract {
            stack: vec![(document, self.path.keys())],
        }
    }
}

/// Iterator returned by [`ValueExtractor::extract`]
pub struct Extract<'a> {
    stack: Vec<(&'a Value, &'a [String])>,
}

impl Iterator for Extract<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while let Some((value, path)) = self.stack.pop() {
            match value {
                Value::Array(elements) => {
                    // Reversed so the first element is popped first
                    self.stack
                        .extend(elements.iter().rev().map(|element| (element, path)));
                }
                Value::Object(map) => {
                    if let Some((key, rest)) = path.split_first() {
                        if let Some(child) = map.get(key) {
                            self.stack.push((child, rest));
                        }
                    }
                }
                Value::String(text) if path.is_empty() => return Some(text.clone()),
                Value::Number(_) | Value::Bool(_) | Value::Null if path.is_empty() => {
                    return Some(value.to_string())
                }
                _ => {}
            }
        }
        None
    }
}
