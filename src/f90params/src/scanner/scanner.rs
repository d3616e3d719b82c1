// f90params/src/scanner/scanner.rs

//! Token scanner with composite-keyword merging.

use super::lexer::{LexMode, Lexer};
use super::token::Token;
use crate::error::Diagnostic;

/// Mutable state of a [`Scanner`] between two pulls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScannerState {
    /// Token pulled ahead by a failed merge, delivered on the next pull
    pub pending: Option<Token>,
    pub mode: LexMode,
}

/// Lexical scanner producing the merged token stream the parser consumes.
///
/// After an `end` keyword the scanner eagerly pulls one more token. If it is
/// `module` or `subroutine` the pair becomes a single composite token,
/// otherwise the extra token is parked and handed out unchanged on the next
/// call. The parser never sees more than one token of lookahead.
pub struct Scanner {
    lexer: Lexer,
    state: ScannerState,
}

impl Scanner {
    /// Create a new scanner for the given input.
    pub fn new(input: &str) -> Self {
        Self {
            lexer: Lexer::new(input),
            state: ScannerState::default(),
        }
    }

    /// Scan the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Option<Token> {
        let token = match self.state.pending.take() {
            Some(token) => token,
            None => self.lexer.scan_token(&mut self.state.mode)?,
        };

        if !token.token_type.is_mergeable() {
            return Some(token);
        }

        let next = match self.lexer.scan_token(&mut self.state.mode) {
            Some(next) => next,
            None => return Some(token),
        };

        match token.token_type.merge_with(next.token_type) {
            Some(merged) => Some(Token::text(
                merged,
                format!("{} {}", token.lexeme(), next.lexeme()),
                token.line,
                token.column,
            )),
            None => {
                self.state.pending = Some(next);
                Some(token)
            }
        }
    }

    /// Scan all remaining tokens.
    pub fn scan_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }

    /// Whether a lexical error occurred in this run.
    pub fn has_error(&self) -> bool {
        self.lexer.has_error()
    }

    /// Advisory messages recorded while scanning.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.lexer.diagnostics()
    }

    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    /// Current line number of the underlying lexer.
    pub fn line(&self) -> usize {
        self.lexer.line()
    }
}

impl Iterator for Scanner {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
