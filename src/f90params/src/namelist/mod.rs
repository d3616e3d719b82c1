// f90params/src/namelist/mod.rs

//! Namelist data structures produced by the binder.
//!
//! A [`Namelist`] owns its [`Parameter`]s in declaration order. Each bound
//! parameter carries a copy of its [`Define`] and the materialized default
//! values reconciled from its [`AssignRange`]s.

pub mod core;
pub mod define;
pub mod parameter;

// Re-export the main types
pub use self::core::Namelist;
pub use define::{Annotation, Define};
pub use parameter::{reconcile, AssignRange, Parameter};
