// f90params/src/lib.rs

//! Extraction of namelist defaults from Fortran 90 sources.
//!
//! This library provides functionality to:
//! - Scan Fortran source into a token stream with documentation annotations
//! - Parse type definitions, namelist declarations and default assignments
//! - Bind namelist parameters to their types and reconcile their defaults
//! - Write a parameter template listing every namelist with its defaults
//! - Export the resolved namelists as JSON

pub mod binder;
pub mod error;
pub mod fortran_types;
pub mod namelist;
pub mod parser;
pub mod scanner;
pub mod template;

use std::fs::File;
use std::io::Read;
use std::path::Path;

pub use error::{Diagnostic, Error, Result, Severity};
pub use fortran_types::{Compatibility, Dimension, Type, TypeKind, Value};
pub use namelist::{Annotation, AssignRange, Define, Namelist, Parameter};
pub use parser::Parser;
pub use scanner::{Scanner, Token, TokenType};
pub use template::{write_template, write_template_file, TemplateOptions, TemplateReport};

/// Everything learned from one source text.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Resolved namelists in declaration order
    pub namelists: Vec<Namelist>,
    /// The scanner met an illegal character or an oversized integer
    pub lexical_error: bool,
    /// The parser dropped a subroutine or namelist statement
    pub syntax_error: bool,
    /// Scanner diagnostics followed by parser diagnostics
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    /// Whether either error flag is raised.
    pub fn has_error(&self) -> bool {
        self.lexical_error || self.syntax_error
    }

    /// Find a namelist by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Namelist> {
        self.namelists
            .iter()
            .find(|nml| nml.name().eq_ignore_ascii_case(name))
    }
}

/// Extract the namelists declared in a source string.
///
/// # Examples
///
/// ```
/// fn main() -> Result<(), f90params::Error> {
///     let source = "
/// module m
/// contains
/// subroutine init()
///   integer :: order
///   namelist /discretization/ order
///   order = 2
/// end subroutine init
/// end module m
/// ";
///     let extraction = f90params::extract(source)?;
///     let nml = extraction.get("discretization").unwrap();
///     assert_eq!(nml.get("order").unwrap().formatted_values(), vec!["2"]);
///     Ok(())
/// }
/// ```
pub fn extract(source: &str) -> Result<Extraction> {
    let mut parser = Parser::new(source);
    let namelists = parser.parse()?;

    let scanner = parser.scanner();
    let mut diagnostics = scanner.diagnostics().to_vec();
    diagnostics.extend_from_slice(parser.diagnostics());

    Ok(Extraction {
        namelists,
        lexical_error: scanner.has_error(),
        syntax_error: parser.has_error(),
        diagnostics,
    })
}

/// Extract the namelists declared in a source file.
///
/// ```no_run
/// fn main() -> Result<(), f90params::Error> {
///     let extraction = f90params::read_file("src/readpar.f90")?;
///     println!("{} namelists", extraction.namelists.len());
///     Ok(())
/// }
/// ```
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Extraction> {
    let mut file = File::open(path.as_ref())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    log::debug!("Read {} bytes from {}", contents.len(), path.as_ref().display());
    extract(&contents)
}

#[cfg(feature = "json")]
/// Convert resolved namelists to a pretty JSON string.
pub fn to_json(namelists: &[Namelist]) -> Result<String> {
    serde_json::to_string_pretty(namelists).map_err(Error::from)
}

#[cfg(feature = "json")]
/// Parse namelists from a JSON string.
pub fn from_json(json: &str) -> Result<Vec<Namelist>> {
    serde_json::from_str(json).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "\
module m
contains
subroutine init(unit)
  integer :: n
  real :: x(3)
  namelist /nml/ n, x
  n = 1
  x = 2.5
end subroutine init
end module m
";

    #[test]
    fn test_extract_simple() {
        let extraction = extract(SOURCE).unwrap();
        assert!(!extraction.has_error());
        assert!(extraction.diagnostics.is_empty());

        let nml = extraction.get("NML").unwrap();
        assert_eq!(nml.get("x").unwrap().values(), &[const { Value::Real(2.5) }; 3]);
    }

    #[test]
    fn test_extract_reports_lexical_error() {
        let source = SOURCE.replace("n = 1", "n = 1 $");
        let extraction = extract(&source).unwrap();
        assert!(extraction.lexical_error);
        assert!(!extraction.syntax_error);
        assert!(extraction
            .diagnostics
            .iter()
            .any(|d| d.message == "Illegal character '$'"));
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("init.f90");
        std::fs::write(&path, SOURCE).unwrap();

        let extraction = read_file(&path).unwrap();
        assert_eq!(extraction.namelists.len(), 1);

        let missing = read_file(dir.path().join("missing.f90")).unwrap_err();
        assert_eq!(missing.category(), "io");
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_round_trip() {
        let namelists = extract(SOURCE).unwrap().namelists;
        let json = to_json(&namelists).unwrap();
        assert!(json.contains("\"nml\""));
        assert_eq!(from_json(&json).unwrap(), namelists);
    }
}
