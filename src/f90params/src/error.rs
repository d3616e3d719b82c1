// f90params/src/error.rs

//! Error and diagnostic types for the f90params library.
//!
//! Fatal problems (ordering violations, unresolved namelist parameters, I/O)
//! are returned as [`Error`]. Everything else the scanner and parser notice
//! is advisory and recorded as a [`Diagnostic`], next to the two run-level
//! error flags.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for f90params operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an extraction or a template write.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error when reading sources or writing templates
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A type definition appeared after a namelist declaration
    #[error("Found define after namelist in '{subroutine}' (line {line})")]
    DefineAfterNamelist { subroutine: String, line: usize },

    /// A type definition appeared after default assignments
    #[error("Found define after assigns in '{subroutine}' (line {line})")]
    DefineAfterAssignment { subroutine: String, line: usize },

    /// A namelist declaration appeared after default assignments
    #[error("Found namelist '{namelist}' after assigns in '{subroutine}' (line {line})")]
    NamelistAfterAssignment {
        subroutine: String,
        namelist: String,
        line: usize,
    },

    /// A namelist references a variable without a type definition
    #[error("Parameter '{parameter}' in namelist '{namelist}' not defined in '{subroutine}'")]
    UnresolvedParameter {
        parameter: String,
        namelist: String,
        subroutine: String,
    },

    /// `character(<modifier>=n)` with a modifier other than `len`
    #[error("Unknown type modifier '{modifier}' at line {line}")]
    UnknownTypeModifier { modifier: String, line: usize },

    /// File already exists (when force=false)
    #[error("File already exists: {}", .0.display())]
    FileAlreadyExists(PathBuf),

    /// JSON serialization/deserialization error
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the error category as a string.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Io(_) | Error::FileAlreadyExists(_) => "io",
            Error::DefineAfterNamelist { .. }
            | Error::DefineAfterAssignment { .. }
            | Error::NamelistAfterAssignment { .. } => "ordering",
            Error::UnresolvedParameter { .. } => "binding",
            Error::UnknownTypeModifier { .. } => "syntax",
            #[cfg(feature = "json")]
            Error::Json(_) => "serialization",
        }
    }
}

/// Severity of an advisory diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Worth knowing, output is still correct
    Warning,
    /// Input was dropped; the run-level error flag is raised
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// An advisory message produced while scanning or parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Line number (1-based)
    pub line: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn warning<S: Into<String>>(line: usize, message: S) -> Self {
        Self {
            severity: Severity::Warning,
            line,
            message: message.into(),
        }
    }

    pub fn error<S: Into<String>>(line: usize, message: S) -> Self {
        Self {
            severity: Severity::Error,
            line,
            message: message.into(),
        }
    }

    /// Forward this diagnostic to the `log` facade.
    pub(crate) fn emit(&self) {
        match self.severity {
            Severity::Warning => log::warn!("line {}: {}", self.line, self.message),
            Severity::Error => log::error!("line {}: {}", self.line, self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}: {}", self.severity, self.line, self.message)
    }
}
