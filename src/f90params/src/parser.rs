// f90params/src/parser.rs

//! Grammar parser for the module/subroutine/declaration subset.
//!
//! The parser pulls merged tokens from a [`Scanner`] one at a time and keeps
//! a single token of lookahead. Inside subroutine bodies every logical line
//! is one statement; lines that do not match a known statement are skipped
//! up to the next end of line. Only skipped `subroutine` and `namelist`
//! statements raise the parser error flag, since dropping those loses data.
//!
//! Statements that survive are folded by a [`Binder`] when the subroutine
//! ends. Ordering and resolution failures are fatal and end the parse.

use crate::binder::{Binder, Defines, Statement};
use crate::error::{Diagnostic, Error, Result};
use crate::fortran_types::{Dimension, Type, TypeKind, Value};
use crate::namelist::{Annotation, AssignRange, Define, Namelist, Parameter};
use crate::scanner::{Scanner, Token, TokenType, TokenValue};

/// Why a statement could not be turned into a [`Statement`].
#[derive(Debug)]
enum Failure {
    /// No grammar rule matches; recover at the next line
    Syntax,
    /// Abort the whole parse
    Fatal(Error),
}

impl From<Error> for Failure {
    fn from(err: Error) -> Self {
        Failure::Fatal(err)
    }
}

type Parsed<T> = std::result::Result<T, Failure>;

/// Array bounds written after a name on the left of an assignment.
enum Subscript {
    None,
    /// `(:)`
    Whole,
    /// `(i)`
    Element(i64),
    /// `(first:last)`
    Range(i64, i64),
}

/// Parser producing resolved namelists from Fortran source.
pub struct Parser {
    scanner: Scanner,
    current: Option<Token>,
    has_error: bool,
    diagnostics: Vec<Diagnostic>,
    namelists: Vec<Namelist>,
}

impl Parser {
    /// Create a new parser for the given input.
    pub fn new(input: &str) -> Self {
        Self::from_scanner(Scanner::new(input))
    }

    /// Create a parser reading from an existing scanner.
    pub fn from_scanner(mut scanner: Scanner) -> Self {
        let current = scanner.next_token();
        Self {
            scanner,
            current,
            has_error: false,
            diagnostics: Vec::new(),
            namelists: Vec::new(),
        }
    }

    /// Parse the whole input and return the namelists in declaration order.
    ///
    /// Syntax problems are recovered from and only reported through
    /// [`Parser::has_error`] and the diagnostics. Ordering violations and
    /// unresolved parameters are returned as errors.
    pub fn parse(&mut self) -> Result<Vec<Namelist>> {
        while let Some(token_type) = self.peek_type() {
            match token_type {
                TokenType::EndLine => {
                    self.advance();
                }
                TokenType::Module => self.parse_module()?,
                _ => self.skip_statement(),
            }
        }

        Ok(std::mem::take(&mut self.namelists))
    }

    /// Whether a syntax error dropped a subroutine or namelist.
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    /// Advisory messages recorded while parsing and binding.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The scanner, for its error flag and diagnostics.
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    fn parse_module(&mut self) -> Result<()> {
        let start_line = self.line();
        let name = match self.parse_module_header() {
            Ok(name) => name,
            Err(Failure::Fatal(err)) => return Err(err),
            Err(Failure::Syntax) => {
                self.skip_line();
                return Ok(());
            }
        };
        log::debug!("Entering module '{}' (line {})", name, start_line);

        loop {
            match self.peek_type() {
                None => {
                    self.report(start_line, format!("Unexpected end of input in module '{}'", name));
                    return Ok(());
                }
                Some(TokenType::EndLine) => {
                    self.advance();
                }
                Some(TokenType::EndModule) => {
                    self.advance();
                    self.parse_end_name();
                    return Ok(());
                }
                Some(TokenType::Subroutine) => self.parse_subroutine()?,
                Some(_) => self.skip_statement(),
            }
        }
    }

    fn parse_module_header(&mut self) -> Parsed<String> {
        self.expect(TokenType::Module)?;
        let name = self.expect(TokenType::Identifier)?.lexeme();
        self.end_statement()?;
        Ok(name)
    }

    fn parse_subroutine(&mut self) -> Result<()> {
        let start_line = self.line();
        let name = match self.parse_subroutine_header() {
            Ok(name) => name,
            Err(Failure::Fatal(err)) => return Err(err),
            Err(Failure::Syntax) => {
                self.report(start_line, format!("Skipping subroutine at line {}", start_line));
                self.skip_line();
                return Ok(());
            }
        };
        log::debug!("Parsing subroutine '{}' (line {})", name, start_line);

        let mut binder = Binder::new(name.as_str());
        let mut annotations = Vec::new();

        loop {
            let token_type = match self.peek_type() {
                Some(token_type) => token_type,
                None => {
                    self.report(
                        start_line,
                        format!("Unexpected end of input in subroutine '{}'", name),
                    );
                    return Ok(());
                }
            };

            match token_type {
                TokenType::EndLine => {
                    self.advance();
                }
                TokenType::EndSubroutine => {
                    self.advance();
                    self.parse_end_name();
                    break;
                }
                TokenType::AnnotationKeyword | TokenType::AnnotationText => {
                    annotations.extend(self.parse_annotation_line());
                }
                _ => {
                    let line = self.line();
                    let pending = std::mem::take(&mut annotations);
                    match self.parse_statement(pending) {
                        Ok(statement) => binder.fold(statement)?,
                        Err(Failure::Fatal(err)) => return Err(err),
                        Err(Failure::Syntax) => self.recover(token_type, line),
                    }
                }
            }
        }

        let (namelists, diagnostics) = binder.finish()?;
        self.diagnostics.extend(diagnostics);
        self.namelists.extend(namelists);
        Ok(())
    }

    fn parse_subroutine_header(&mut self) -> Parsed<String> {
        self.expect(TokenType::Subroutine)?;
        let name = self.expect(TokenType::Identifier)?.lexeme();

        self.expect(TokenType::LeftParen)?;
        if self.check(TokenType::Identifier) {
            self.advance();
            while self.check(TokenType::Comma) {
                self.advance();
                self.expect(TokenType::Identifier)?;
            }
        }
        self.expect(TokenType::RightParen)?;

        if self.check(TokenType::Bind) {
            self.advance();
            self.expect(TokenType::LeftParen)?;
            self.skip_balanced()?;
        }

        self.end_statement()?;
        Ok(name)
    }

    /// Optional name after `end module` / `end subroutine`, then end of line.
    fn parse_end_name(&mut self) {
        if self.check(TokenType::Identifier) {
            self.advance();
        }
        if self.end_statement().is_err() {
            self.skip_line();
        }
    }

    fn parse_statement(&mut self, annotations: Vec<Annotation>) -> Parsed<Statement> {
        match self.peek_type() {
            Some(TokenType::Integer | TokenType::Real | TokenType::Character) => {
                self.parse_type_definition(annotations)
            }
            Some(TokenType::Namelist) => self.parse_namelist(),
            Some(TokenType::Identifier) => self.parse_assignment(),
            _ => Err(Failure::Syntax),
        }
    }

    fn parse_type_definition(&mut self, annotations: Vec<Annotation>) -> Parsed<Statement> {
        let line = self.line();
        let mut ty = self.parse_type()?;
        let mut default_size = 1;

        while self.check(TokenType::Comma) {
            self.advance();
            match self.peek_type() {
                Some(TokenType::Allocatable) => {
                    self.advance();
                }
                Some(TokenType::Dimension) => {
                    self.advance();
                    self.expect(TokenType::LeftParen)?;
                    if self.check(TokenType::Colon) {
                        self.advance();
                        ty = ty.with_dimension(Dimension::Runtime);
                    } else {
                        let size = positive(self.expect_int()?)?;
                        ty = ty.with_dimension(Dimension::Fixed(size));
                        default_size = size;
                    }
                    self.expect(TokenType::RightParen)?;
                }
                _ => return Err(Failure::Syntax),
            }
        }

        self.expect(TokenType::DoubleColon)?;

        let mut defines = Defines::new();
        loop {
            let name = self.expect(TokenType::Identifier)?.lexeme();
            let define = self.parse_define_shape(&ty, default_size, line)?;
            defines.insert(name.to_lowercase(), define.with_annotations(annotations.clone()));

            if !self.check(TokenType::Comma) {
                break;
            }
            self.advance();
        }
        self.end_statement()?;

        Ok(Statement::TypeDefinition { defines, line })
    }

    /// `integer`, `real`, `character`, `character(n)`, `character(len=n)`
    fn parse_type(&mut self) -> Parsed<Type> {
        let token = self.advance().ok_or(Failure::Syntax)?;
        let kind = match token.token_type {
            TokenType::Integer => TypeKind::Integer,
            TokenType::Real => TypeKind::Real,
            TokenType::Character => TypeKind::Character,
            _ => return Err(Failure::Syntax),
        };
        let ty = Type::new(kind);

        if kind != TypeKind::Character || !self.check(TokenType::LeftParen) {
            return Ok(ty);
        }

        self.advance();
        let modifier = if self.check(TokenType::Identifier) {
            let modifier = self.advance().map(|t| t.lexeme()).unwrap_or_default();
            self.expect(TokenType::Assign)?;
            Some(modifier)
        } else {
            None
        };
        let length = self.expect_int()?;
        self.expect(TokenType::RightParen)?;

        if let Some(modifier) = modifier {
            if !modifier.eq_ignore_ascii_case("len") {
                return Err(Failure::Fatal(Error::UnknownTypeModifier {
                    modifier,
                    line: token.line,
                }));
            }
        }

        let length = usize::try_from(length).map_err(|_| Failure::Syntax)?;
        Ok(ty.with_length(length))
    }

    /// Size suffix of one declared variable: none, `(n)`, `(a:b)` or `(:)`.
    fn parse_define_shape(&mut self, ty: &Type, default_size: usize, line: usize) -> Parsed<Define> {
        if !self.check(TokenType::LeftParen) {
            return Ok(Define::new(ty.clone(), line).with_size(default_size));
        }
        self.advance();

        if self.check(TokenType::Colon) {
            self.advance();
            self.expect(TokenType::RightParen)?;
            let ty = ty.clone().with_dimension(Dimension::Runtime);
            return Ok(Define::new(ty, line));
        }

        let first = self.expect_int()?;
        let size = if self.check(TokenType::Colon) {
            self.advance();
            let last = self.expect_int()?;
            if first != 1 {
                self.warn(
                    line,
                    format!(
                        "Define range not starting from 1 in line {}. \
                         This leads to incorrect default values.",
                        line
                    ),
                );
            }
            last - first + 1
        } else {
            first
        };
        self.expect(TokenType::RightParen)?;

        Ok(Define::new(ty.clone(), line).with_size(positive(size)?))
    }

    fn parse_namelist(&mut self) -> Parsed<Statement> {
        let line = self.line();
        self.expect(TokenType::Namelist)?;
        self.expect(TokenType::Slash)?;
        let name = self.expect(TokenType::Identifier)?.lexeme();
        self.expect(TokenType::Slash)?;

        let mut parameters = vec![Parameter::new(self.expect(TokenType::Identifier)?.lexeme())];
        while self.check(TokenType::Comma) {
            self.advance();
            parameters.push(Parameter::new(self.expect(TokenType::Identifier)?.lexeme()));
        }
        self.end_statement()?;

        Ok(Statement::NamelistDecl(Namelist::new(name, parameters).at_line(line)))
    }

    fn parse_assignment(&mut self) -> Parsed<Statement> {
        let line = self.line();
        let name = self.expect(TokenType::Identifier)?.lexeme();
        let subscript = self.parse_subscript()?;
        self.expect(TokenType::Assign)?;
        let value = self.parse_literal()?;
        self.end_statement()?;

        let range = match subscript {
            Subscript::None | Subscript::Whole => AssignRange::full(value),
            Subscript::Element(index) => AssignRange::from_source(value, index, index),
            Subscript::Range(first, last) => AssignRange::from_source(value, first, last),
        };

        Ok(Statement::Assignment {
            name: name.to_lowercase(),
            range,
            line,
        })
    }

    fn parse_subscript(&mut self) -> Parsed<Subscript> {
        if !self.check(TokenType::LeftParen) {
            return Ok(Subscript::None);
        }
        self.advance();

        let subscript = if self.check(TokenType::Colon) {
            self.advance();
            Subscript::Whole
        } else {
            let first = self.expect_int()?;
            if self.check(TokenType::Colon) {
                self.advance();
                Subscript::Range(first, self.expect_int()?)
            } else {
                Subscript::Element(first)
            }
        };

        self.expect(TokenType::RightParen)?;
        Ok(subscript)
    }

    /// Integer, real or string literal; numbers may carry a sign.
    fn parse_literal(&mut self) -> Parsed<Value> {
        let negative = match self.peek_type() {
            Some(TokenType::Minus) => {
                self.advance();
                Some(true)
            }
            Some(TokenType::Plus) => {
                self.advance();
                Some(false)
            }
            _ => None,
        };

        let token = self.advance().ok_or(Failure::Syntax)?;
        let value = match (token.value, negative) {
            (TokenValue::Integer(i), Some(true)) => Value::Integer(-i),
            (TokenValue::Integer(i), _) => Value::Integer(i),
            (TokenValue::Real(r), Some(true)) => Value::Real(-r),
            (TokenValue::Real(r), _) => Value::Real(r),
            (TokenValue::Character(s), None) => Value::Character(s),
            _ => return Err(Failure::Syntax),
        };
        Ok(value)
    }

    /// Collect the annotations of one documentation line.
    fn parse_annotation_line(&mut self) -> Vec<Annotation> {
        let mut annotations = Vec::new();
        let mut tag: Option<String> = None;

        while let Some(token_type) = self.peek_type().filter(|t| t.is_annotation()) {
            let text = self.advance().map(|t| t.lexeme()).unwrap_or_default();
            if token_type == TokenType::AnnotationKeyword {
                if let Some(previous) = tag.replace(text) {
                    annotations.push(Annotation::new(Some(previous), ""));
                }
            } else {
                annotations.push(Annotation::new(tag.take(), text));
            }
        }
        if let Some(tag) = tag {
            annotations.push(Annotation::new(Some(tag), ""));
        }

        if self.end_statement().is_err() {
            self.skip_line();
        }
        annotations
    }

    /// Skip the rest of a statement whose first token was `first`.
    fn recover(&mut self, first: TokenType, line: usize) {
        match first {
            TokenType::Subroutine => self.report(line, format!("Skipping subroutine at line {}", line)),
            TokenType::Namelist => self.report(line, format!("Skipping namelist at line {}", line)),
            _ => log::trace!("Skipping statement at line {}", line),
        }
        self.skip_line();
    }

    /// Skip one statement at file or module level.
    fn skip_statement(&mut self) {
        if let Some(first) = self.peek_type() {
            let line = self.line();
            self.recover(first, line);
        }
    }

    /// Skip tokens through the closing parenthesis of an opened group.
    fn skip_balanced(&mut self) -> Parsed<()> {
        let mut depth = 1;
        while depth > 0 {
            match self.peek_type() {
                None | Some(TokenType::EndLine) => return Err(Failure::Syntax),
                Some(TokenType::LeftParen) => depth += 1,
                Some(TokenType::RightParen) => depth -= 1,
                Some(_) => {}
            }
            self.advance();
        }
        Ok(())
    }

    /// Advance past the next end of line (or to the end of input).
    fn skip_line(&mut self) {
        while let Some(token) = self.advance() {
            if token.token_type == TokenType::EndLine {
                break;
            }
        }
    }

    /// A statement ends at an end of line or at the end of input.
    ///
    /// Documentation comments trailing a statement are dropped.
    fn end_statement(&mut self) -> Parsed<()> {
        while self.peek_type().map_or(false, |t| t.is_annotation()) {
            if let Some(token) = self.advance() {
                log::trace!("Dropping trailing annotation '{}' at line {}", token.lexeme(), token.line);
            }
        }
        match self.peek_type() {
            None => Ok(()),
            Some(TokenType::EndLine) => {
                self.advance();
                Ok(())
            }
            Some(_) => Err(Failure::Syntax),
        }
    }

    fn expect(&mut self, expected: TokenType) -> Parsed<Token> {
        if self.check(expected) {
            self.advance().ok_or(Failure::Syntax)
        } else {
            Err(Failure::Syntax)
        }
    }

    fn expect_int(&mut self) -> Parsed<i64> {
        match self.expect(TokenType::IntLiteral)?.value {
            TokenValue::Integer(i) => Ok(i),
            _ => Err(Failure::Syntax),
        }
    }

    fn check(&self, expected: TokenType) -> bool {
        self.peek_type() == Some(expected)
    }

    fn peek_type(&self) -> Option<TokenType> {
        self.current.as_ref().map(|t| t.token_type)
    }

    /// Line of the lookahead token, or of the scanner position at the end.
    fn line(&self) -> usize {
        self.current
            .as_ref()
            .map_or_else(|| self.scanner.line(), |t| t.line)
    }

    fn advance(&mut self) -> Option<Token> {
        let next = self.scanner.next_token();
        std::mem::replace(&mut self.current, next)
    }

    fn report(&mut self, line: usize, message: String) {
        self.has_error = true;
        let diagnostic = Diagnostic::error(line, message);
        diagnostic.emit();
        self.diagnostics.push(diagnostic);
    }

    fn warn(&mut self, line: usize, message: String) {
        let diagnostic = Diagnostic::warning(line, message);
        diagnostic.emit();
        self.diagnostics.push(diagnostic);
    }
}

/// Element counts must be at least one.
fn positive(size: i64) -> Parsed<usize> {
    match usize::try_from(size) {
        Ok(size) if size >= 1 => Ok(size),
        _ => Err(Failure::Syntax),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Severity;

    fn wrap(body: &str) -> String {
        format!(
            "module m\ncontains\nsubroutine readpar(unit)\n{}\nend subroutine readpar\nend module m\n",
            body
        )
    }

    fn parse(input: &str) -> (Result<Vec<Namelist>>, Parser) {
        let mut parser = Parser::new(input);
        let result = parser.parse();
        (result, parser)
    }

    #[test]
    fn test_simple_namelist() {
        let body = "integer :: order\nreal :: cfl\nnamelist /discretization/ order, cfl\norder = 3\ncfl = 0.5";
        let (result, parser) = parse(&wrap(body));
        let namelists = result.unwrap();

        assert!(!parser.has_error());
        assert_eq!(namelists.len(), 1);
        assert_eq!(namelists[0].name(), "discretization");
        assert_eq!(namelists[0].subroutine(), "readpar");
        assert_eq!(namelists[0].line(), 6);

        let order = namelists[0].get("order").unwrap();
        assert_eq!(order.values(), &[Value::Integer(3)]);
        let cfl = namelists[0].get("cfl").unwrap();
        assert_eq!(cfl.values(), &[Value::Real(0.5)]);
    }

    #[test]
    fn test_type_attributes_and_sizes() {
        let body = "character(len=32) :: name\n\
                    character(8) :: tag\n\
                    real, allocatable, dimension(:) :: coords\n\
                    integer, dimension(4) :: flags, pair(2)\n\
                    real :: grid(2:4), values(:)\n\
                    namelist /n/ name, tag, coords, flags, pair, grid, values";
        let (result, parser) = parse(&wrap(body));
        let namelists = result.unwrap();
        let nml = &namelists[0];

        let name = nml.get("name").unwrap().define().unwrap();
        assert_eq!(name.ty().length(), Some(32));
        assert_eq!(nml.get("tag").unwrap().define().unwrap().ty().length(), Some(8));

        let coords = nml.get("coords").unwrap().define().unwrap();
        assert_eq!(coords.ty().dimension(), Some(Dimension::Runtime));
        assert_eq!(coords.size(), 1);

        assert_eq!(nml.get("flags").unwrap().define().unwrap().size(), 4);
        assert_eq!(nml.get("pair").unwrap().define().unwrap().size(), 2);
        assert_eq!(nml.get("grid").unwrap().define().unwrap().size(), 3);
        assert_eq!(
            nml.get("values").unwrap().define().unwrap().ty().dimension(),
            Some(Dimension::Runtime)
        );

        // grid(2:4) starts at 2
        assert!(parser
            .diagnostics()
            .iter()
            .any(|d| d.severity == Severity::Warning && d.message.contains("not starting from 1")));
        assert!(!parser.has_error());
    }

    #[test]
    fn test_array_assignments() {
        let body = "integer :: a(4)\n\
                    namelist /n/ a\n\
                    a(2:3) = 7\n\
                    a(1) = -1\n\
                    a(:) = 0\n\
                    a = 9";
        let (result, _) = parse(&wrap(body));
        let namelists = result.unwrap();
        let a = namelists[0].get("a").unwrap();

        let assigns = a.assigns().unwrap();
        assert_eq!(assigns.len(), 4);
        assert_eq!((assigns[0].start, assigns[0].end), (1, Some(3)));
        assert_eq!((assigns[1].start, assigns[1].end), (0, Some(1)));
        assert_eq!((assigns[2].start, assigns[2].end), (0, None));

        assert_eq!(
            a.values(),
            &[Value::Integer(-1), Value::Integer(7), Value::Integer(7), Value::Integer(0)]
        );
    }

    #[test]
    fn test_partial_range_conversion() {
        let body = "real :: w(3)\nnamelist /n/ w\nw(2:4) = 1.5";
        let (result, _) = parse(&wrap(body));
        let namelists = result.unwrap();
        let w = namelists[0].get("w").unwrap();
        let range = &w.assigns().unwrap()[0];
        assert_eq!((range.start, range.end), (1, Some(4)));
        assert_eq!(w.define().unwrap().size(), 3);
        assert_eq!(w.values(), &[Value::Unset, Value::Real(1.5), Value::Real(1.5)]);
    }

    #[test]
    fn test_define_after_namelist_is_fatal() {
        let body = "integer :: a\nnamelist /n/ a\ninteger :: b";
        let (result, _) = parse(&wrap(body));
        assert!(matches!(result, Err(Error::DefineAfterNamelist { .. })));
    }

    #[test]
    fn test_unresolved_parameter_is_fatal() {
        let body = "integer :: a\nnamelist /output/ a, b";
        let (result, _) = parse(&wrap(body));
        match result {
            Err(Error::UnresolvedParameter {
                parameter,
                namelist,
                ..
            }) => {
                assert_eq!(parameter, "b");
                assert_eq!(namelist, "output");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_character_modifier_is_fatal() {
        let body = "character(size=4) :: a";
        let (result, _) = parse(&wrap(body));
        assert!(matches!(result, Err(Error::UnknownTypeModifier { .. })));
    }

    #[test]
    fn test_unmatched_statements_are_skipped() {
        let body = "implicit none\n\
                    integer :: a, b\n\
                    namelist /n/ a, b\n\
                    a = 1\n\
                    if (a .eq. 0) then\n\
                    b = 2\n\
                    end if\n\
                    b = a * 2\n\
                    read(unit, nml=n)";
        let (result, parser) = parse(&wrap(body));
        let namelists = result.unwrap();

        assert!(!parser.has_error());
        assert_eq!(namelists[0].get("b").unwrap().values(), &[Value::Integer(2)]);
    }

    #[test]
    fn test_malformed_namelist_raises_flag() {
        let body = "integer :: a\nnamelist /n/ a,\nnamelist /m/ a";
        let (result, parser) = parse(&wrap(body));
        let namelists = result.unwrap();

        assert!(parser.has_error());
        assert_eq!(namelists.len(), 1);
        assert_eq!(namelists[0].name(), "m");
        assert!(parser
            .diagnostics()
            .iter()
            .any(|d| d.message == "Skipping namelist at line 5"));
    }

    #[test]
    fn test_broken_subroutine_does_not_stop_later_ones() {
        let input = "module m\n\
                     subroutine broken(a b)\n\
                     integer :: x\n\
                     namelist /lost/ x\n\
                     end subroutine broken\n\
                     subroutine ok()\n\
                     integer :: y\n\
                     namelist /kept/ y\n\
                     end subroutine\n\
                     end module m\n";
        let (result, parser) = parse(input);
        let namelists = result.unwrap();

        assert!(parser.has_error());
        assert_eq!(namelists.len(), 1);
        assert_eq!(namelists[0].name(), "kept");
        let messages: Vec<_> = parser.diagnostics().iter().map(|d| d.message.as_str()).collect();
        assert!(messages.contains(&"Skipping subroutine at line 2"));
        assert!(messages.contains(&"Skipping namelist at line 4"));
    }

    #[test]
    fn test_bind_clause_and_end_names() {
        let input = "MODULE m\n\
                     SUBROUTINE init(a, b) BIND(C, name=\"init\")\n\
                     INTEGER :: a\n\
                     NAMELIST /n/ a\n\
                     END SUBROUTINE init\n\
                     END MODULE m\n";
        let (result, parser) = parse(input);
        assert_eq!(result.unwrap().len(), 1);
        assert!(!parser.has_error());
    }

    #[test]
    fn test_unterminated_subroutine_raises_flag() {
        let input = "module m\nsubroutine s()\ninteger :: a\nnamelist /n/ a\n";
        let (result, parser) = parse(input);
        assert!(result.unwrap().is_empty());
        assert!(parser.has_error());
    }

    #[test]
    fn test_annotations_attach_to_next_definition() {
        let body = "!> @brief Convergence order\n\
                    !! of the scheme\n\
                    !> @unit none\n\
                    integer :: order\n\
                    integer :: other\n\
                    namelist /n/ order, other";
        let (result, parser) = parse(&wrap(body));
        let namelists = result.unwrap();

        let order = namelists[0].get("order").unwrap().define().unwrap();
        assert_eq!(
            order.annotations(),
            &[
                Annotation::new(Some("brief".to_string()), "Convergence order"),
                Annotation::new(None, "of the scheme"),
                Annotation::new(Some("unit".to_string()), "none"),
            ]
        );
        let other = namelists[0].get("other").unwrap().define().unwrap();
        assert!(other.annotations().is_empty());
        assert!(!parser.has_error());
    }

    #[test]
    fn test_string_and_signed_literals() {
        let body = "character(len=8) :: out\nreal :: shift\nnamelist /n/ out, shift\nout = 'data'\nshift = -0.25";
        let (result, _) = parse(&wrap(body));
        let namelists = result.unwrap();
        assert_eq!(
            namelists[0].get("out").unwrap().values(),
            &[Value::Character("data".to_string())]
        );
        assert_eq!(namelists[0].get("shift").unwrap().values(), &[Value::Real(-0.25)]);
    }

    #[test]
    fn test_trailing_annotations_keep_statements() {
        let body = "integer :: order !! convergence order\n\
                    real :: cfl\n\
                    namelist /n/ order, cfl !> @note read from unit 5\n\
                    order = 3 !> default order\n\
                    cfl = 0.5 !! @unit none";
        let (result, parser) = parse(&wrap(body));
        let namelists = result.unwrap();

        assert!(!parser.has_error());
        assert_eq!(namelists.len(), 1);
        let order = namelists[0].get("order").unwrap();
        assert_eq!(order.values(), &[Value::Integer(3)]);
        assert!(order.define().unwrap().annotations().is_empty());
        assert_eq!(namelists[0].get("cfl").unwrap().values(), &[Value::Real(0.5)]);
    }

    #[test]
    fn test_trailing_annotation_on_subroutine_header() {
        let input = "module m\nsubroutine s() !> entry point\ninteger :: a\nnamelist /n/ a\nend subroutine s\nend module m\n";
        let (result, parser) = parse(input);
        assert_eq!(result.unwrap().len(), 1);
        assert!(!parser.has_error());
    }
}
