//! Path-tracking accessors over an untyped YAML document
//!
//! Both rule dialects are read through [`Node`], which remembers the dotted
//! path it was reached by so that a bad value can be reported precisely
//! (`error_distribution.thresholds.high.value`) instead of as a bare type
//! mismatch.

use serde_yml::Value;

use crate::core::error::ConfigError;

/// A possibly-missing value inside a raw rules document
#[derive(Debug, Clone)]
pub struct Node<'a> {
    value: Option<&'a Value>,
    path: String,
}

impl<'a> Node<'a> {
    pub fn root(value: &'a Value) -> Self {
        Self {
            value: Some(value),
            path: String::new(),
        }
    }

    /// Descend into `key`. Missing keys and non-mapping parents yield an empty node.
    pub fn child(&self, key: &str) -> Node<'a> {
        let path = if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        };

        Node {
            value: self.value.and_then(|v| v.get(key)),
            path,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The underlying value, with explicit `null` treated as absent
    pub fn value(&self) -> Option<&'a Value> {
        self.value.filter(|v| !v.is_null())
    }

    pub fn is_mapping(&self) -> bool {
        self.value().is_some_and(Value::is_mapping)
    }

    /// Entries of a mapping in document order; anything else has no entries.
    pub fn entries(&self) -> Vec<(String, Node<'a>)> {
        let Some(mapping) = self.value().and_then(Value::as_mapping) else {
            return Vec::new();
        };

        mapping
            .iter()
            .filter_map(|(key, value)| {
                let key = scalar_text(key)?;
                let path = if self.path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", self.path, key)
                };
                Some((
                    key,
                    Node {
                        value: Some(value),
                        path,
                    },
                ))
            })
            .collect()
    }

    /// Scalar value rendered as text
    pub fn text(&self) -> Option<String> {
        self.value().and_then(scalar_text)
    }

    /// Text of the first candidate key holding a truthy value, or `""`
    pub fn first_text(&self, candidates: &[&str]) -> String {
        candidates
            .iter()
            .map(|key| self.child(key))
            .find(|node| node.value().is_some_and(truthy))
            .and_then(|node| node.text())
            .unwrap_or_default()
    }

    /// Text of this node when its value is truthy
    pub fn truthy_text(&self) -> Option<String> {
        self.value().filter(|v| truthy(v)).and_then(scalar_text)
    }

    /// Coerce to a float; numeric strings are accepted.
    pub fn to_f64(&self) -> Result<f64, ConfigError> {
        let parsed = match self.value() {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        parsed.ok_or_else(|| ConfigError::InvalidNumber {
            path: self.path.clone(),
            value: describe(self.value),
        })
    }

    /// Coerce to an integer; floats are truncated toward zero and integer
    /// strings are accepted.
    pub fn to_i64(&self) -> Result<i64, ConfigError> {
        let parsed = match self.value() {
            Some(Value::Number(n)) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            }),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        parsed.ok_or_else(|| ConfigError::InvalidInteger {
            path: self.path.clone(),
            value: describe(self.value),
        })
    }

    /// Like [`Node::to_i64`], but an absent value yields `default`.
    pub fn to_i64_or(&self, default: i64) -> Result<i64, ConfigError> {
        match self.value() {
            Some(_) => self.to_i64(),
            None => Ok(default),
        }
    }
}

/// Truthiness as YAML authors expect it: empty, zero, false and null are falsy.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        _ => true,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Short human description of an offending value for error messages
fn describe(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "missing".to_string(),
        Some(Value::String(s)) => format!("{:?}", s),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Sequence(_)) => "a list".to_string(),
        Some(Value::Mapping(_)) => "a mapping".to_string(),
        Some(_) => "a tagged value".to_string(),
    }
}
