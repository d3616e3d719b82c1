// f90params/src/fortran_types/kind.rs

//! Declared variable types: primitive kind, character length, dimension marker.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive kinds recognised in type definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Integer,
    Real,
    Character,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Integer => write!(f, "integer"),
            TypeKind::Real => write!(f, "real"),
            TypeKind::Character => write!(f, "character"),
        }
    }
}

/// Dimension attribute of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// `dimension(n)`
    Fixed(usize),
    /// `dimension(:)`, size only known at run time
    Runtime,
}

/// A declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    kind: TypeKind,
    length: Option<usize>,
    dimension: Option<Dimension>,
}

impl Type {
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            length: None,
            dimension: None,
        }
    }

    /// Set the character length (`character(len=n)`).
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = Some(dimension);
        self
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn length(&self) -> Option<usize> {
        self.length
    }

    pub fn dimension(&self) -> Option<Dimension> {
        self.dimension
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.length {
            Some(length) => write!(f, "{}(len={})", self.kind, length),
            None => write!(f, "{}", self.kind),
        }
    }
}
