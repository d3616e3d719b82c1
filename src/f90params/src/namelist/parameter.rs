// f90params/src/namelist/parameter.rs

//! Namelist parameters, assignment ranges and value reconciliation.

use super::define::Define;
use crate::fortran_types::{format_value, Compatibility, Value};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Slots of a variable written by one assignment statement.
///
/// `start` is 0-based and inclusive, `end` is exclusive; `None` means the
/// assignment covers every slot from `start` on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignRange {
    pub value: Value,
    pub start: usize,
    pub end: Option<usize>,
}

impl AssignRange {
    /// `x = v` and `x(:) = v`
    pub fn full(value: Value) -> Self {
        Self {
            value,
            start: 0,
            end: None,
        }
    }

    /// `x(first:last) = v` with 1-based, inclusive source indices.
    pub fn from_source(value: Value, first: i64, last: i64) -> Self {
        let start = usize::try_from(first.saturating_sub(1)).unwrap_or(0);
        let end = usize::try_from(last).unwrap_or(0);
        Self {
            value,
            start,
            end: Some(end),
        }
    }

    /// Slot indices this range touches in a variable of `size` elements.
    pub fn slots(&self, size: usize) -> Range<usize> {
        let end = self.end.map_or(size, |end| end.min(size));
        self.start.min(end)..end
    }
}

/// Build the value list of a variable with `size` slots.
///
/// Ranges are applied in order and only fill slots that are still unset, so
/// the first assignment to reach a slot wins.
pub fn reconcile(size: usize, ranges: &[AssignRange]) -> Vec<Value> {
    let mut values = vec![Value::Unset; size];
    for range in ranges {
        for slot in range.slots(size) {
            if !values[slot].is_set() {
                values[slot] = range.value.clone();
            }
        }
    }
    values
}

/// A variable listed in a namelist declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    name: String,
    define: Option<Define>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assigns: Option<Vec<AssignRange>>,
    values: Vec<Value>,
}

impl Parameter {
    /// Create an unresolved parameter as found in a namelist statement.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            define: None,
            assigns: None,
            values: Vec::new(),
        }
    }

    /// Name as spelled in the namelist statement.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower-cased name used for lookups.
    pub fn lname(&self) -> String {
        self.name.to_lowercase()
    }

    /// Attach the declaration and assignments, then materialize the values.
    pub(crate) fn bind(&mut self, define: Define, assigns: Option<Vec<AssignRange>>) {
        let ranges = assigns.as_deref().unwrap_or(&[]);
        self.values = reconcile(define.size(), ranges);
        self.define = Some(define);
        self.assigns = assigns;
    }

    pub fn define(&self) -> Option<&Define> {
        self.define.as_ref()
    }

    pub fn assigns(&self) -> Option<&[AssignRange]> {
        self.assigns.as_deref()
    }

    /// Materialized value list, one entry per element of the declaration.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Whether any assignment to this parameter exists.
    pub fn has_values(&self) -> bool {
        self.assigns.is_some()
    }

    /// Whether every element received a value.
    pub fn has_all_values(&self) -> bool {
        self.values.iter().all(Value::is_set)
    }

    /// Worst compatibility of any set value with the declared kind.
    ///
    /// Every element is checked, not just the first one.
    pub fn value_check(&self) -> Compatibility {
        let kind = match &self.define {
            Some(define) => define.ty().kind(),
            None => return Compatibility::Exact,
        };
        self.values
            .iter()
            .map(|value| value.compatibility(kind))
            .max()
            .unwrap_or(Compatibility::Exact)
    }

    /// Whether all set values can be stored in the declared kind.
    pub fn has_correct_value_type(&self) -> bool {
        self.value_check() != Compatibility::Incompatible
    }

    /// Values in the canonical textual form of the declared kind.
    pub fn formatted_values(&self) -> Vec<String> {
        match &self.define {
            Some(define) => self
                .values
                .iter()
                .map(|value| format_value(value, define.ty().kind()))
                .collect(),
            None => Vec::new(),
        }
    }
}
