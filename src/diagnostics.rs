//! # Diagnostic Sink
//!
//! An append-only log of errors and warnings, each carrying the source
//! coordinates of the node (or operand) that triggered it (`spec.md` §3/§4.4).
//!
//! Logging an error does more than append to a list: it returns [`Unwind`], a
//! zero-sized marker that callers propagate with `?` through the
//! expression-visiting methods in [`crate::analyser`]. This models the
//! source's exception-based non-local exit (`spec.md` §4.4/§9) as a typed
//! short-circuit -- the nearest enclosing *statement* visitor catches it and
//! moves on to the next statement, exactly matching "error emission ...
//! unwinds the current sub-expression ... other analysers in the family log
//! without unwinding." Warnings never unwind, which is why `log_warning`
//! returns `()`.

use std::fmt::{self, Display, Formatter};

use colored::Colorize;

use crate::operator::Operator;
use crate::position::Position;
use crate::types::Type;

/// Closed set of diagnostic kinds (`spec.md` §7).
///
/// `NotSupportedOperation` carries a free-form `description` rather than an
/// `Operator` because the source raises the same error class for two
/// distinct causes: an operator that type-checks but has no code-generator
/// lowering yet (`description` is the operator's identifier), and a
/// construct this subset never accepts at all, such as multi-target
/// assignment (`description` is a short phrase naming the construct).
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    TypeHintMissing { symbol_id: String },
    MismatchedTypes { actual: Type, expected: Type },
    NotSupportedOperation { description: String },
    UnresolvedReference { token: String },
    UnresolvedOperation { type_id: String, operation_id: Operator },
    TooManyReturns,
    InvalidType { symbol_id: String },
    IncorrectNumberOfOperands { got: usize, expected: usize },
    /// A construct that is fatal by default (`spec.md` §9) but has been
    /// downgraded to an ordinary diagnostic by
    /// [`crate::analyser::AnalyserOptions::fatal_unimplemented_constructs`].
    NotSupportedConstruct { construct: String },
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::TypeHintMissing { symbol_id } => {
                write!(f, "'{symbol_id}' needs a type hint")
            }
            DiagnosticKind::MismatchedTypes { actual, expected } => {
                write!(f, "expected type '{expected}' but got '{actual}'")
            }
            DiagnosticKind::NotSupportedOperation { description } => {
                write!(f, "'{description}' is not supported")
            }
            DiagnosticKind::UnresolvedReference { token } => {
                write!(f, "unresolved reference '{token}'")
            }
            DiagnosticKind::UnresolvedOperation {
                type_id,
                operation_id,
            } => write!(f, "'{operation_id}' does not apply to type '{type_id}'"),
            DiagnosticKind::TooManyReturns => write!(f, "cannot return more than one value"),
            DiagnosticKind::InvalidType { symbol_id } => {
                write!(f, "'{symbol_id}' is not a valid literal type in this subset")
            }
            DiagnosticKind::IncorrectNumberOfOperands { got, expected } => {
                write!(f, "expected {expected} operand(s) but got {got}")
            }
            DiagnosticKind::NotSupportedConstruct { construct } => {
                write!(f, "'{construct}' is not supported in this subset")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub position: Position,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.kind)
    }
}

/// Zero-sized marker returned by [`DiagnosticSink::log_error`]. Threading this
/// through `Result<_, Unwind>` and `?` is this crate's typed stand-in for the
/// source's non-local exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unwind;

#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Append the error and return `Unwind` so the caller can propagate it
    /// with `?`, aborting the rest of the current expression's walk.
    #[must_use]
    pub fn log_error(&mut self, kind: DiagnosticKind, position: Position) -> Unwind {
        log::error!("{}", format!("{position}: {kind}").red());
        self.errors.push(Diagnostic { kind, position });
        Unwind
    }

    /// Append the warning. Warnings are cosmetic and never unwind.
    pub fn log_warning(&mut self, kind: DiagnosticKind, position: Position) {
        log::warn!("{}", format!("{position}: {kind}").yellow());
        self.warnings.push(Diagnostic { kind, position });
    }
}
