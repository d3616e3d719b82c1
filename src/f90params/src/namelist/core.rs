// f90params/src/namelist/core.rs

//! Core Namelist struct and basic operations.

use super::parameter::Parameter;
use serde::{Deserialize, Serialize};

/// A namelist declaration with its parameters in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Namelist {
    name: String,
    parameters: Vec<Parameter>,
    /// Subroutine the namelist was declared in
    #[serde(default)]
    subroutine: String,
    #[serde(default)]
    line: usize,
}

impl Namelist {
    /// Create a namelist skeleton from a `namelist /name/ a, b` statement.
    pub fn new<S: Into<String>>(name: S, parameters: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            parameters,
            subroutine: String::new(),
            line: 0,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub(crate) fn parameters_mut(&mut self) -> &mut [Parameter] {
        &mut self.parameters
    }

    /// Get a parameter by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        let name = name.to_lowercase();
        self.parameters.iter().find(|p| p.lname() == name)
    }

    pub fn subroutine(&self) -> &str {
        &self.subroutine
    }

    pub(crate) fn set_subroutine(&mut self, subroutine: &str) {
        self.subroutine = subroutine.to_string();
    }

    /// Line of the namelist statement.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Parameters without any default assignment.
    pub fn missing_defaults(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(|p| !p.has_values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        let nml = Namelist::new(
            "Discretization",
            vec![Parameter::new("Order"), Parameter::new("CFL")],
        )
        .at_line(7);

        assert_eq!(nml.len(), 2);
        assert_eq!(nml.line(), 7);
        assert_eq!(nml.get("cfl").map(|p| p.name()), Some("CFL"));
        assert!(nml.get("missing").is_none());
        assert_eq!(nml.missing_defaults().count(), 2);
    }
}
