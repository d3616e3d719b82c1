// f90params/src/scanner/lexer.rs

//! Low-level lexical analysis for the Fortran declaration subset.
//!
//! The lexer works character by character and knows nothing about token
//! merging. Its only mode switch is the documentation-comment sub-language,
//! and the mode itself is owned by the caller (see [`super::Scanner`]).

use super::token::{Token, TokenType, TokenValue};
use crate::error::Diagnostic;

/// Tags understood inside documentation comments.
pub const ANNOTATION_TAGS: &[&str] = &["brief", "default", "unit", "range", "note", "deprecated"];

/// Lexical state of the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexMode {
    #[default]
    Normal,
    /// Inside a `!>` / `!!` documentation comment, until the next newline
    Annotation,
}

/// Low-level lexer for Fortran source text.
pub struct Lexer {
    input: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
    /// No token has been emitted on the current logical line yet
    at_line_start: bool,
    has_error: bool,
    diagnostics: Vec<Diagnostic>,
}

impl Lexer {
    /// Create a new lexer for the given input.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
            at_line_start: true,
            has_error: false,
            diagnostics: Vec::new(),
        }
    }

    /// Whether a lexical error was seen so far.
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Current line number (1-based).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Scan the next raw token, or `None` at end of input.
    pub fn scan_token(&mut self, mode: &mut LexMode) -> Option<Token> {
        loop {
            let c = self.peek()?;

            // A newline always ends annotation mode, whatever else is going on
            if c == '\n' {
                *mode = LexMode::Normal;
                let (line, column) = (self.line, self.column);
                self.advance();
                if !self.at_line_start {
                    self.at_line_start = true;
                    return Some(Token::text(TokenType::EndLine, "\n", line, column));
                }
                continue;
            }

            let token = match *mode {
                LexMode::Annotation => self.scan_annotation(c),
                LexMode::Normal => self.scan_normal(c, mode),
            };

            if let Some(token) = token {
                self.at_line_start = false;
                return Some(token);
            }
        }
    }

    fn scan_normal(&mut self, c: char, mode: &mut LexMode) -> Option<Token> {
        let line = self.line;
        let column = self.column;

        match c {
            ' ' | '\t' | '\r' => {
                self.advance();
                None
            }
            '#' => {
                self.skip_to_line_end();
                None
            }
            '!' => {
                if matches!(self.peek_ahead(1), Some('>') | Some('!')) {
                    self.advance();
                    self.advance();
                    *mode = LexMode::Annotation;
                } else {
                    self.skip_to_line_end();
                }
                None
            }
            '&' => {
                if !self.scan_continuation() {
                    self.report_illegal(c);
                }
                None
            }
            '\'' | '"' => self.scan_string(c, line, column),
            '.' if self.peek_ahead(1).map_or(false, |c| c.is_ascii_digit()) => {
                Some(self.scan_number(line, column))
            }
            _ if c.is_ascii_digit() => Some(self.scan_number(line, column)),
            _ if c.is_ascii_alphabetic() => Some(self.scan_identifier(line, column)),
            _ => self.scan_operator(c, line, column),
        }
    }

    fn scan_operator(&mut self, c: char, line: usize, column: usize) -> Option<Token> {
        let token_type = match c {
            ',' => TokenType::Comma,
            '=' => TokenType::Assign,
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            '/' => TokenType::Slash,
            ':' if self.peek_ahead(1) == Some(':') => {
                self.advance();
                self.advance();
                return Some(Token::text(TokenType::DoubleColon, "::", line, column));
            }
            ':' => TokenType::Colon,
            '*' => TokenType::Star,
            '.' => TokenType::Dot,
            '%' => TokenType::Percent,
            ';' => TokenType::Semicolon,
            '+' => TokenType::Plus,
            '-' => TokenType::Minus,
            '<' if self.peek_ahead(1) == Some('=') => {
                self.advance();
                self.advance();
                return Some(Token::text(TokenType::LessEqual, "<=", line, column));
            }
            _ => {
                self.report_illegal(c);
                return None;
            }
        };

        self.advance();
        Some(Token::text(token_type, c.to_string(), line, column))
    }

    /// `&`, optional blanks, optional comment, newline. Consumes all of it
    /// (the newline included) and returns `true` on a match.
    fn scan_continuation(&mut self) -> bool {
        let mut pos = self.current + 1;
        while matches!(self.input.get(pos), Some(' ') | Some('\t') | Some('\r')) {
            pos += 1;
        }
        if self.input.get(pos) == Some(&'!') {
            while !matches!(self.input.get(pos), Some('\n') | None) {
                pos += 1;
            }
        }
        match self.input.get(pos) {
            Some('\n') => {
                while self.current <= pos {
                    self.advance();
                }
                true
            }
            None => {
                while self.current < pos {
                    self.advance();
                }
                true
            }
            _ => false,
        }
    }

    fn scan_identifier(&mut self, line: usize, column: usize) -> Token {
        let start = self.current;
        while self
            .peek()
            .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let lexeme: String = self.input[start..self.current].iter().collect();
        let token_type =
            TokenType::keyword(&lexeme.to_lowercase()).unwrap_or(TokenType::Identifier);
        Token::text(token_type, lexeme, line, column)
    }

    fn scan_number(&mut self, line: usize, column: usize) -> Token {
        let start = self.current;
        let mut is_real = false;

        self.skip_digits();

        if self.peek() == Some('.') {
            match self.peek_ahead(1) {
                Some(c) if c.is_ascii_digit() => {
                    is_real = true;
                    self.advance();
                    self.skip_digits();
                }
                Some(c) if c.is_ascii_alphabetic() && !self.exponent_follows(1) => {}
                Some('.') => {}
                _ => {
                    is_real = true;
                    self.advance();
                }
            }
        }

        if self.exponent_follows(0) {
            is_real = true;
            self.advance(); // exponent marker
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.advance();
            }
            self.skip_digits();
        }

        let text: String = self.input[start..self.current].iter().collect();

        // Kind suffix (1.0_dp, 8_int64) carries no value
        if self.peek() == Some('_')
            && self
                .peek_ahead(1)
                .map_or(false, |c| c.is_ascii_alphanumeric())
        {
            self.advance();
            while self
                .peek()
                .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
            {
                self.advance();
            }
        }

        if is_real {
            let normalized = text.replace(['d', 'D'], "e");
            match normalized.parse::<f64>() {
                Ok(value) => Token::new(TokenType::RealLiteral, TokenValue::Real(value), line, column),
                Err(_) => {
                    self.report(Diagnostic::error(line, format!("Invalid real literal '{}'", text)));
                    Token::new(TokenType::RealLiteral, TokenValue::Real(0.0), line, column)
                }
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => {
                    Token::new(TokenType::IntLiteral, TokenValue::Integer(value), line, column)
                }
                Err(_) => {
                    self.report(Diagnostic::error(
                        line,
                        format!("Integer value too large {}", text),
                    ));
                    Token::new(TokenType::IntLiteral, TokenValue::Integer(0), line, column)
                }
            }
        }
    }

    /// Whether an exponent (`e5`, `D-3`) starts `offset` characters ahead.
    fn exponent_follows(&self, offset: usize) -> bool {
        if !matches!(self.peek_ahead(offset), Some('e' | 'E' | 'd' | 'D')) {
            return false;
        }
        match self.peek_ahead(offset + 1) {
            Some('+') | Some('-') => self
                .peek_ahead(offset + 2)
                .map_or(false, |c| c.is_ascii_digit()),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    fn scan_string(&mut self, quote: char, line: usize, column: usize) -> Option<Token> {
        let mut pos = self.current + 1;
        while let Some(&c) = self.input.get(pos) {
            if c == quote || c == '\n' {
                break;
            }
            pos += 1;
        }

        if self.input.get(pos) != Some(&quote) {
            self.report_illegal(quote);
            return None;
        }

        let content: String = self.input[self.current + 1..pos].iter().collect();
        while self.current <= pos {
            self.advance();
        }
        Some(Token::new(
            TokenType::StringLiteral,
            TokenValue::Character(content),
            line,
            column,
        ))
    }

    fn scan_annotation(&mut self, c: char) -> Option<Token> {
        let line = self.line;
        let column = self.column;

        if matches!(c, ' ' | '\t' | '\r') {
            self.advance();
            return None;
        }

        if c == '@'
            && self
                .peek_ahead(1)
                .map_or(false, |c| c.is_ascii_alphabetic())
        {
            self.advance();
            let start = self.current;
            while self
                .peek()
                .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
            {
                self.advance();
            }
            let tag: String = self.input[start..self.current].iter().collect();
            let tag = tag.to_lowercase();
            if !ANNOTATION_TAGS.contains(&tag.as_str()) {
                self.warn(Diagnostic::warning(
                    line,
                    format!("Unknown annotation tag '@{}'", tag),
                ));
            }
            return Some(Token::text(TokenType::AnnotationKeyword, tag, line, column));
        }

        let start = self.current;
        self.skip_to_line_end();
        let text: String = self.input[start..self.current].iter().collect();
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Token::text(TokenType::AnnotationText, text, line, column))
    }

    fn report_illegal(&mut self, c: char) {
        let line = self.line;
        self.advance();
        self.report(Diagnostic::error(line, format!("Illegal character '{}'", c)));
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.has_error = true;
        self.warn(diagnostic);
    }

    fn warn(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.diagnostics.push(diagnostic);
    }

    fn skip_digits(&mut self) {
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Advance up to, but not over, the next newline.
    fn skip_to_line_end(&mut self) {
        while !matches!(self.peek(), Some('\n') | None) {
            self.advance();
        }
    }

    fn advance(&mut self) -> char {
        if let Some(&c) = self.input.get(self.current) {
            self.current += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            c
        } else {
            '\0'
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.current).copied()
    }

    fn peek_ahead(&self, distance: usize) -> Option<char> {
        self.input.get(self.current + distance).copied()
    }
}
