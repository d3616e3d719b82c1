// f90params/src/binder.rs

//! Semantic binding of one subroutine body.
//!
//! The parser hands over the body's statements in source order. The binder
//! folds them into three accumulators, rejecting bodies that break the
//! declaration order (types, then namelists, then assignments), and finally
//! resolves every namelist parameter against the collected type definitions.

use crate::error::{Diagnostic, Error, Result};
use crate::fortran_types::{Compatibility, TypeKind};
use crate::namelist::{AssignRange, Define, Namelist, Parameter};
use std::collections::HashMap;

/// Declarations keyed by lower-cased variable name.
pub type Defines = HashMap<String, Define>;

/// Assignment ranges keyed by lower-cased variable name, in source order.
pub type Assigns = HashMap<String, Vec<AssignRange>>;

/// One statement of a subroutine body that matters for extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `real, dimension(:) :: a, b(3)`
    TypeDefinition { defines: Defines, line: usize },
    /// `namelist /name/ a, b`
    NamelistDecl(Namelist),
    /// `a = 1`, `a(:) = 1`, `a(2:3) = 1`
    Assignment {
        /// Lower-cased variable name
        name: String,
        range: AssignRange,
        line: usize,
    },
}

/// Accumulates the statements of one subroutine and resolves its namelists.
#[derive(Debug)]
pub struct Binder {
    subroutine: String,
    defines: Defines,
    namelists: Vec<Namelist>,
    assigns: Assigns,
    diagnostics: Vec<Diagnostic>,
}

impl Binder {
    pub fn new<S: Into<String>>(subroutine: S) -> Self {
        Self {
            subroutine: subroutine.into(),
            defines: Defines::new(),
            namelists: Vec::new(),
            assigns: Assigns::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Fold the next statement into the accumulators.
    pub fn fold(&mut self, statement: Statement) -> Result<()> {
        match statement {
            Statement::TypeDefinition { defines, line } => {
                if !self.namelists.is_empty() {
                    return Err(Error::DefineAfterNamelist {
                        subroutine: self.subroutine.clone(),
                        line,
                    });
                }
                if !self.assigns.is_empty() {
                    return Err(Error::DefineAfterAssignment {
                        subroutine: self.subroutine.clone(),
                        line,
                    });
                }
                self.defines.extend(defines);
            }
            Statement::NamelistDecl(namelist) => {
                if !self.assigns.is_empty() {
                    return Err(Error::NamelistAfterAssignment {
                        subroutine: self.subroutine.clone(),
                        namelist: namelist.name().to_string(),
                        line: namelist.line(),
                    });
                }
                self.namelists.push(namelist);
            }
            Statement::Assignment { name, range, .. } => {
                self.assigns.entry(name).or_default().push(range);
            }
        }
        Ok(())
    }

    /// Resolve all namelists collected so far.
    ///
    /// Returns the bound namelists in declaration order together with the
    /// advisory diagnostics produced while binding.
    pub fn finish(mut self) -> Result<(Vec<Namelist>, Vec<Diagnostic>)> {
        for namelist in &mut self.namelists {
            namelist.set_subroutine(&self.subroutine);
            let namelist_name = namelist.name().to_string();

            for parameter in namelist.parameters_mut() {
                let lname = parameter.lname();
                let define = match self.defines.get(&lname) {
                    Some(define) => define.clone(),
                    None => {
                        return Err(Error::UnresolvedParameter {
                            parameter: parameter.name().to_string(),
                            namelist: namelist_name,
                            subroutine: self.subroutine.clone(),
                        })
                    }
                };
                let line = define.line();
                parameter.bind(define, self.assigns.get(&lname).cloned());

                if parameter.value_check() == Compatibility::Converted {
                    let kind = define_kind(parameter);
                    let source = parameter
                        .values()
                        .iter()
                        .find(|v| v.compatibility(kind) == Compatibility::Converted)
                        .map_or("real", |v| v.type_name());
                    let diagnostic = Diagnostic::warning(
                        line,
                        format!(
                            "Converting {} expression to {} type for '{}'",
                            source,
                            kind,
                            parameter.name()
                        ),
                    );
                    diagnostic.emit();
                    self.diagnostics.push(diagnostic);
                }
            }
        }

        log::debug!(
            "Bound {} namelist(s) in subroutine '{}'",
            self.namelists.len(),
            self.subroutine
        );
        Ok((self.namelists, self.diagnostics))
    }
}

fn define_kind(parameter: &Parameter) -> TypeKind {
    parameter
        .define()
        .map_or(TypeKind::Integer, |define| define.ty().kind())
}

/// Fold and resolve a complete statement list in one go.
pub fn bind<S: Into<String>>(
    subroutine: S,
    statements: impl IntoIterator<Item = Statement>,
) -> Result<Vec<Namelist>> {
    let mut binder = Binder::new(subroutine);
    for statement in statements {
        binder.fold(statement)?;
    }
    binder.finish().map(|(namelists, _)| namelists)
}
