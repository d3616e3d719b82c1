// f90params/src/fortran_types/value.rs

//! Literal values assigned in source and their compatibility with declared types.

use super::kind::TypeKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A default value slot.
///
/// Assigned literals are always one of the first three cases; `Unset` marks
/// an array slot that no assignment reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Character(String),
    Unset,
}

impl Value {
    /// Get the type name as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Character(_) => "character",
            Value::Unset => "unset",
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Value::Unset)
    }

    /// How this value fits into a variable of the given kind.
    pub fn compatibility(&self, kind: TypeKind) -> Compatibility {
        match (kind, self) {
            (_, Value::Unset) => Compatibility::Exact,
            (TypeKind::Integer, Value::Integer(_)) => Compatibility::Exact,
            (TypeKind::Integer, Value::Real(_)) => Compatibility::Converted,
            (TypeKind::Real, Value::Integer(_) | Value::Real(_)) => Compatibility::Exact,
            (TypeKind::Character, Value::Character(_)) => Compatibility::Exact,
            _ => Compatibility::Incompatible,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", super::formatting::format_real(*r)),
            Value::Character(s) => write!(f, "{}", super::formatting::quote(s)),
            Value::Unset => write!(f, "<unset>"),
        }
    }
}

/// Result of checking a value against a declared kind. Ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Compatibility {
    Exact,
    /// Accepted with a lossy conversion (real literal for an integer)
    Converted,
    Incompatible,
}
