//! Attribute values and declared attribute types.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Resolved attributes of a block, keyed by attribute name.
///
/// Equality ignores key order; iteration order is deterministic.
pub type Attributes = IndexMap<String, AttributeValue>;

/// A single attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Boolean(bool),
    Number(f64),
    String(String),
    List(Vec<AttributeValue>),
    Map(IndexMap<String, AttributeValue>),
}

impl AttributeValue {
    /// Borrow the value as a string slice, if it is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render the value as a bare delimiter token.
    ///
    /// Strings are written as-is, lists and maps as compact JSON. Values
    /// containing whitespace cannot be read back by the grammar.
    pub fn to_attribute_text(&self) -> String {
        match self {
            AttributeValue::String(s) => s.clone(),
            AttributeValue::Boolean(b) => b.to_string(),
            AttributeValue::Number(n) => n.to_string(),
            AttributeValue::List(_) | AttributeValue::Map(_) => {
                serde_json::to_string(self).unwrap_or_default()
            }
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_attribute_text())
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

/// Numbers are `f64`, so integers beyond 2^53 in magnitude are rounded to
/// the nearest representable value, as in any JSON number.
impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Number(value as f64)
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(value: Vec<AttributeValue>) -> Self {
        AttributeValue::List(value)
    }
}

/// Declared type of an attribute, mirroring the JSON schema primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl AttributeType {
    /// Check whether `value` is of this type
    pub fn matches(&self, value: &AttributeValue) -> bool {
        match (self, value) {
            (AttributeType::String, AttributeValue::String(_)) => true,
            (AttributeType::Number, AttributeValue::Number(_)) => true,
            (AttributeType::Integer, AttributeValue::Number(n)) => n.fract() == 0.0,
            (AttributeType::Boolean, AttributeValue::Boolean(_)) => true,
            (AttributeType::Array, AttributeValue::List(_)) => true,
            (AttributeType::Object, AttributeValue::Map(_)) => true,
            _ => false,
        }
    }

    /// Read a delimiter token as a value of this type
    pub fn coerce(&self, raw: &str) -> Option<AttributeValue> {
        match self {
            AttributeType::String => Some(AttributeValue::from(raw)),
            AttributeType::Number => raw
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(AttributeValue::Number),
            AttributeType::Integer => raw.parse::<i64>().ok().map(AttributeValue::from),
            AttributeType::Boolean => match raw {
                "true" => Some(AttributeValue::Boolean(true)),
                "false" => Some(AttributeValue::Boolean(false)),
                _ => None,
            },
            AttributeType::Array | AttributeType::Object => {
                serde_json::from_str::<AttributeValue>(raw)
                    .ok()
                    .filter(|value| self.matches(value))
            }
        }
    }
}
