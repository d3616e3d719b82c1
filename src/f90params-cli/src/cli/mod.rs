// f90params-cli/src/cli/mod.rs

mod generate;
mod tokens;

pub use generate::{generate, GenerateOptions};
pub use tokens::print_tokens;

use std::process::ExitCode;

/// Outcome of a run that did not fail outright.
///
/// Both error flags can be raised at once; the lexical one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Clean,
    LexicalError,
    SyntaxError,
}

impl Status {
    pub fn from_flags(lexical_error: bool, syntax_error: bool) -> Self {
        if lexical_error {
            Status::LexicalError
        } else if syntax_error {
            Status::SyntaxError
        } else {
            Status::Clean
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Status::Clean => 0,
            Status::LexicalError => 1,
            Status::SyntaxError => 2,
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status.code())
    }
}

/// Exit code for runs aborted by an I/O or binding error.
pub const FATAL_EXIT_CODE: u8 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_error_takes_precedence() {
        assert_eq!(Status::from_flags(true, true), Status::LexicalError);
        assert_eq!(Status::from_flags(false, true).code(), 2);
        assert_eq!(Status::from_flags(false, false).code(), 0);
    }
}
