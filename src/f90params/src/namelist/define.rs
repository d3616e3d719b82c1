// f90params/src/namelist/define.rs

//! Variable declarations collected from type-definition statements.

use crate::fortran_types::Type;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One documentation line (`!> @tag text`) attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Lower-cased tag without the `@`, `None` for untagged text
    pub tag: Option<String>,
    pub text: String,
}

impl Annotation {
    pub fn new(tag: Option<String>, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.tag, self.text.is_empty()) {
            (Some(tag), true) => write!(f, "{}", tag),
            (Some(tag), false) => write!(f, "{}: {}", tag, self.text),
            (None, _) => write!(f, "{}", self.text),
        }
    }
}

/// The resolved type and element count of one declared variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Define {
    #[serde(rename = "type")]
    ty: Type,
    size: usize,
    line: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    annotations: Vec<Annotation>,
}

impl Define {
    /// Create a scalar declaration of the given type.
    pub fn new(ty: Type, line: usize) -> Self {
        Self {
            ty,
            size: 1,
            line,
            annotations: Vec::new(),
        }
    }

    /// Set the element count. Counts below one are clamped to one.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size.max(1);
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Number of elements; greater than one for fixed-size arrays.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Line of the type-definition statement.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}
