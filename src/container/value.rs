use std::cmp::Ordering;

use crate::container::ContainerError;

/// The kind of a [`Value`].
///
/// Containers declare one kind for their keys and one for their values at
/// creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// 32-bit signed integer
    Int,
    /// 64-bit float
    Real,
    /// Owned text
    Text,
}

impl ValueKind {
    /// Whether this kind may serve as a container key.
    ///
    /// Only `Int` and `Text` have a key ordering and a hash; `Real` is
    /// rejected at container creation.
    pub fn is_key_kind(&self) -> bool {
        matches!(self, ValueKind::Int | ValueKind::Text)
    }
}

/// A dynamically typed container payload.
///
/// Used uniformly for keys and values throughout the container layer.
/// Cloning a `Text` value deep-copies its bytes; each container slot owns
/// its payloads independently.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Real(f64),
    Text(String),
}

impl Value {
    /// Builds a `Text` value from anything string-like.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Real(_) => ValueKind::Real,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// The zero placeholder of a kind, returned by tolerant lookups that
    /// miss.
    pub fn zero(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Int => Value::Int(0),
            ValueKind::Real => Value::Real(0.0),
            ValueKind::Text => Value::Text(String::new()),
        }
    }

    /// Orders two key values of the same kind.
    ///
    /// `Int` keys compare numerically, `Text` keys byte-lexicographically.
    /// Any other pairing is a programming error and fails with
    /// [`ContainerError::TypeMismatch`].
    pub fn cmp_key(&self, other: &Value) -> Result<Ordering, ContainerError> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Ok(a.as_bytes().cmp(b.as_bytes())),
            _ => Err(ContainerError::TypeMismatch {
                expected: other.kind(),
                found: self.kind(),
            }),
        }
    }
}
