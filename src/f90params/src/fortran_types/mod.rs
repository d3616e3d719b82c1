// f90params/src/fortran_types/mod.rs

//! Fortran data types and literal values as seen by the extractor.

pub mod formatting;
pub mod kind;
pub mod value;

// Re-export the main types and functions
pub use formatting::{format_real, format_value, quote};
pub use kind::{Dimension, Type, TypeKind};
pub use value::{Compatibility, Value};
