//! Host-embeddable Sapphire value representation.
//!
//! The introspection façade returns its results as these values rather than
//! raw text, and the native-value bridge converts them to and from the host
//! runtime's object model. Only the shapes the bridge round-trips faithfully
//! are modelled: text, integers, floats, booleans, nil and ordered/keyed
//! collections.

use std::fmt;

/// Tagged representation of a host-embeddable Sapphire value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Str(String),
    /// Boolean value
    Boolean(bool),
    /// Nil value
    Nil,
    /// Ordered collection
    Array(Vec<Value>),
    /// Keyed collection, preserving insertion order
    Hash(Vec<(String, Value)>),
}

impl Value {
    /// Stable class name of this value's kind, as reported in type errors
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Str(_) => "String",
            Value::Boolean(_) => "Boolean",
            Value::Nil => "Nil",
            Value::Array(_) => "Array",
            Value::Hash(_) => "Hash",
        }
    }

    /// Borrow the text content if this is a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Build a text value
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Nil => write!(f, "nil"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Hash(pairs) => {
                write!(f, "{{ ")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, " }}")
            }
        }
    }
}
