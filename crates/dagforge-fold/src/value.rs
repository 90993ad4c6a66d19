use std::any::Any;
use std::fmt;
use std::sync::Arc;

use dagforge_core::Scalar;

/// The value a handler coroutine ultimately produces. Closed over the
/// common scalar shapes plus an open `Any` escape hatch so a plugin can
/// carry its own opaque result type (e.g. an extractor handle) through
/// the trampoline without this crate knowing about it.
#[derive(Clone)]
pub enum Value {
    Number(f64),
    Text(String),
    Boolean(bool),
    Null,
    Any(Arc<dyn Any + Send + Sync>),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Text(s) => write!(f, "Text({s:?})"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Null => write!(f, "Null"),
            Value::Any(_) => write!(f, "Any(..)"),
        }
    }
}

impl From<&Scalar> for Value {
    fn from(scalar: &Scalar) -> Self {
        match scalar {
            Scalar::Number(n) => Value::Number(*n),
            Scalar::String(s) => Value::Text(s.clone()),
            Scalar::Boolean(b) => Value::Boolean(*b),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}
