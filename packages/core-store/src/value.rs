//! Scalar leaf values and the typed conversions accessors use.
//!
//! A [`Value`] is what a leaf node holds. Typed access goes through
//! [`FromValue`], which defines exactly which stored kinds a Rust type
//! accepts. The only implicit conversion is numeric widening: an integer can
//! be read as a float, and a float with an exact integral value can be read
//! as an integer. Nothing is ever truncated or parsed from a string.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar leaf value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
}

/// The kind of a [`Value`], used to request a typed read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Bool,
    Integer,
    Float,
    String,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "bool",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
        };
        f.write_str(name)
    }
}

impl Value {
    /// The kind this value is stored as.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
        }
    }

    /// Convert this value to the requested kind, if the conversion is allowed.
    ///
    /// Returns `None` when the stored kind cannot be read as `kind`.
    pub fn coerce(&self, kind: ValueKind) -> Option<Value> {
        match (self, kind) {
            (Value::Integer(i), ValueKind::Float) => Some(Value::Float(*i as f64)),
            (Value::Float(f), ValueKind::Integer) => exact_integer(*f).map(Value::Integer),
            (v, k) if v.kind() == k => Some(v.clone()),
            _ => None,
        }
    }

    /// Borrow the string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// The integer a float represents exactly, if any.
fn exact_integer(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is out of range.
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    if f.is_finite() && f.fract() == 0.0 && f >= -UPPER && f < UPPER {
        Some(f as i64)
    } else {
        None
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

/// A Rust type that can be read from a leaf.
pub trait FromValue: Sized {
    /// The kind requested from the store when reading this type.
    const KIND: ValueKind;

    /// Extract from a value already coerced to [`Self::KIND`].
    fn from_value(value: Value) -> Option<Self>;
}

impl FromValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const KIND: ValueKind = ValueKind::Integer;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(i),
            _ => None,
        }
    }
}

impl FromValue for i32 {
    const KIND: ValueKind = ValueKind::Integer;

    fn from_value(value: Value) -> Option<Self> {
        i64::from_value(value).and_then(|i| i32::try_from(i).ok())
    }
}

impl FromValue for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }
}

impl FromValue for String {
    const KIND: ValueKind = ValueKind::String;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}
