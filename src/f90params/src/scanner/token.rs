// f90params/src/scanner/token.rs

//! Token types and structures for the Fortran declaration subset.

use std::fmt;

/// A token produced by the scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The type of token
    pub token_type: TokenType,
    /// Literal payload or raw text
    pub value: TokenValue,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl Token {
    pub fn new(token_type: TokenType, value: TokenValue, line: usize, column: usize) -> Self {
        Self {
            token_type,
            value,
            line,
            column,
        }
    }

    /// Shorthand for tokens whose payload is their raw text.
    pub fn text<S: Into<String>>(token_type: TokenType, text: S, line: usize, column: usize) -> Self {
        Self::new(token_type, TokenValue::Text(text.into()), line, column)
    }

    /// The textual form of the payload, as it appeared in the source.
    ///
    /// Character literals are returned without their quotes.
    pub fn lexeme(&self) -> String {
        match &self.value {
            TokenValue::Integer(i) => i.to_string(),
            TokenValue::Real(r) => format!("{:?}", r),
            TokenValue::Character(s) | TokenValue::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token_type {
            TokenType::EndLine => write!(f, "{:?}", self.token_type),
            _ => write!(f, "{:?}({})", self.token_type, self.lexeme()),
        }
    }
}

/// Payload carried by a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Integer(i64),
    Real(f64),
    /// Quoted literal with the quotes stripped
    Character(String),
    /// Raw text for keywords, identifiers, operators and annotations
    Text(String),
}

/// Types of tokens the scanner can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    // Reserved words
    Module,
    Subroutine,
    Bind,
    End,
    Namelist,
    Integer,
    Real,
    Character,
    Dimension,
    Allocatable,

    /// `end module`, only produced by the merge step
    EndModule,
    /// `end subroutine`, only produced by the merge step
    EndSubroutine,

    /// Identifier (variable, namelist, module names)
    Identifier,
    /// Integer literal
    IntLiteral,
    /// Real number literal
    RealLiteral,
    /// Quoted string literal
    StringLiteral,
    /// One or more newlines
    EndLine,

    /// Comma separator (,)
    Comma,
    /// Assignment operator (=)
    Assign,
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Slash (/)
    Slash,
    /// Declaration separator (::)
    DoubleColon,
    /// Range separator (:)
    Colon,
    Star,
    Dot,
    Percent,
    Semicolon,
    Plus,
    Minus,
    LessEqual,

    /// `@tag` inside a documentation comment
    AnnotationKeyword,
    /// Free text inside a documentation comment
    AnnotationText,
}

impl TokenType {
    /// Look up a reserved word. `word` must already be lower-cased.
    pub fn keyword(word: &str) -> Option<TokenType> {
        match word {
            "module" => Some(TokenType::Module),
            "subroutine" => Some(TokenType::Subroutine),
            "bind" => Some(TokenType::Bind),
            "end" => Some(TokenType::End),
            "namelist" => Some(TokenType::Namelist),
            "integer" => Some(TokenType::Integer),
            "real" => Some(TokenType::Real),
            "character" => Some(TokenType::Character),
            "dimension" => Some(TokenType::Dimension),
            "allocatable" => Some(TokenType::Allocatable),
            _ => None,
        }
    }

    /// Successors that fuse with this token into a composite keyword.
    pub fn merge_with(self, next: TokenType) -> Option<TokenType> {
        match (self, next) {
            (TokenType::End, TokenType::Module) => Some(TokenType::EndModule),
            (TokenType::End, TokenType::Subroutine) => Some(TokenType::EndSubroutine),
            _ => None,
        }
    }

    /// Whether the scanner must look one token ahead after this one.
    pub fn is_mergeable(self) -> bool {
        matches!(self, TokenType::End)
    }

    pub fn is_annotation(self) -> bool {
        matches!(self, TokenType::AnnotationKeyword | TokenType::AnnotationText)
    }
}
