// f90params/src/scanner/mod.rs

//! Lexical scanner for the Fortran declaration subset.
//!
//! The scanner works in two layers:
//! 1. [`Lexer`]: character-level tokenization, including the documentation
//!    comment sub-mode
//! 2. [`Scanner`]: merges `end module` / `end subroutine` into composite
//!    tokens with a one-slot lookahead buffer

pub mod lexer;
pub mod scanner;
pub mod token;

// Re-export main types and functions
pub use lexer::{LexMode, Lexer, ANNOTATION_TAGS};
pub use scanner::{Scanner, ScannerState};
pub use token::{Token, TokenType, TokenValue};

/// Convenience function to scan a string into merged tokens.
pub fn scan(input: &str) -> Vec<Token> {
    Scanner::new(input).scan_all()
}
