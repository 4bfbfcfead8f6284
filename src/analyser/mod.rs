//! # Type Analyser
//!
//! The AST-walking driver that composes every other module: it resolves
//! identifiers through the [`Resolver`], looks operators up in the
//! [`OperationRegistry`], rewrites operator slots in place on success, and
//! reports everything it cannot accept through the [`DiagnosticSink`]
//! (`spec.md` §4.5).
//!
//! Two error channels coexist here, matching `spec.md` §4.4/§9 exactly:
//!
//! - [`Unwind`] aborts the current *expression* only; the nearest statement
//!   visitor swallows it (the diagnostic was already recorded) and moves on.
//! - [`FatalSentinel`] aborts the *entire* walk. It is raised for constructs
//!   this subset does not model at all -- `elif`, `break`, `continue`, and
//!   tuple-unpacking assignment targets -- unless
//!   [`AnalyserOptions::fatal_unimplemented_constructs`] has downgraded them
//!   to ordinary diagnostics.

mod expression;
mod statement;

use std::fmt::{self, Display, Formatter};

use crate::ast::Module;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::position::Position;
use crate::resolver::Resolver;
use crate::symbol::SymbolTable;
use crate::types::Type;
use crate::types::Value;

/// What a visited expression produced, consumed by the parent node's
/// visitor. `Type` and `Value` are the two cases `get_type` can classify
/// directly; `Name` defers classification to a symbol-table lookup; `Tuple`
/// is never classified at all (tuples only appear in contexts the calling
/// statement handles on its own terms).
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Resolved {
    Type(Type),
    Value(Value),
    Name(String),
    Tuple,
}

/// Knobs that change how the analyser reacts to constructs this subset does
/// not implement. `spec.md` §9's Open Question ("should unimplemented
/// constructs ever be downgraded from fatal to a normal diagnostic?") is
/// resolved here rather than left unanswered: the default preserves the
/// source's abort-the-walk behaviour, and setting this to `false` turns
/// those four constructs into ordinary, recoverable diagnostics instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyserOptions {
    pub fatal_unimplemented_constructs: bool,
}

impl Default for AnalyserOptions {
    fn default() -> Self {
        AnalyserOptions {
            fatal_unimplemented_constructs: true,
        }
    }
}

/// Raised when the walk hits a construct this subset does not implement and
/// [`AnalyserOptions::fatal_unimplemented_constructs`] is `true`. Unlike
/// [`crate::diagnostics::Unwind`], this is not caught by the nearest
/// statement -- it propagates all the way out of [`Analyser::check_module`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalSentinel {
    pub construct: &'static str,
    pub position: Position,
}

impl Display for FatalSentinel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: '{}' aborted analysis, this subset does not implement it",
            self.position, self.construct
        )
    }
}

impl std::error::Error for FatalSentinel {}

/// Drives a single module walk. Holds the three other modules that do the
/// actual work: a [`Resolver`] bound to this module's symbol tables, the
/// [`DiagnosticSink`] everything gets reported into, and the
/// [`AnalyserOptions`] chosen for this run.
pub struct Analyser {
    pub(crate) resolver: Resolver,
    pub(crate) sink: DiagnosticSink,
    pub(crate) options: AnalyserOptions,
}

impl Analyser {
    pub fn new(globals: SymbolTable, modules: SymbolTable, options: AnalyserOptions) -> Analyser {
        Analyser {
            resolver: Resolver::new(globals).with_modules(modules),
            sink: DiagnosticSink::default(),
            options,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.sink.has_errors()
    }

    pub fn errors(&self) -> &[Diagnostic] {
        self.sink.errors()
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        self.sink.warnings()
    }

    /// Walk every top-level statement in `module`, rewriting operator slots
    /// in place as they resolve. Returns `Ok(())` even when diagnostics were
    /// recorded -- check [`Analyser::has_errors`] for that. Only returns
    /// `Err` when the walk hit a [`FatalSentinel`] and had to abort early.
    pub fn check_module(&mut self, module: &mut Module) -> Result<(), FatalSentinel> {
        self.visit_block(module)
    }

    /// Abort with a [`FatalSentinel`], or downgrade to an ordinary
    /// diagnostic and continue, depending on
    /// [`AnalyserOptions::fatal_unimplemented_constructs`] (`spec.md` §9).
    pub(crate) fn fatal_or_downgrade(
        &mut self,
        construct: &'static str,
        position: Position,
    ) -> Result<(), FatalSentinel> {
        if self.options.fatal_unimplemented_constructs {
            Err(FatalSentinel { construct, position })
        } else {
            self.sink.log_error(
                crate::diagnostics::DiagnosticKind::NotSupportedConstruct {
                    construct: construct.to_string(),
                },
                position,
            );
            Ok(())
        }
    }

    /// The type a visited expression result contributes to its parent. A
    /// `Name` that does not resolve falls back to `Type::NoneType` rather
    /// than logging anything here -- the caller is the one in a position to
    /// know whether an unresolved identifier matters in its context (`spec.md`
    /// §4.5 "get_type").
    pub(crate) fn get_type(&self, resolved: &Resolved) -> Type {
        match resolved {
            Resolved::Type(t) => t.clone(),
            Resolved::Value(v) => Type::get_type(v),
            Resolved::Name(id) => match self.resolver.resolve(id) {
                Some(symbol) => symbol.type_of(),
                None => {
                    log::trace!("'{id}' did not resolve to any symbol, treating as none");
                    Type::NoneType
                }
            },
            Resolved::Tuple => Type::NoneType,
        }
    }

    /// If `resolved` denotes a type symbol -- a bare `Type` already produced
    /// by a nested type-hint subscript, or a `Name` that resolves to
    /// `Symbol::Type` -- return it. Used by `visit_subscript` to tell the
    /// type-hint-constructor form (`Sequence[int]`, `spec.md` §4.5
    /// "Subscript") apart from a runtime indexing expression: the source's
    /// `visit_Subscript` resolves an `ast.Name` to its symbol first and only
    /// then tests `isinstance(value, IType)`, rather than testing the
    /// pre-resolution node.
    pub(crate) fn resolved_as_type_symbol(&self, resolved: &Resolved) -> Option<Type> {
        match resolved {
            Resolved::Type(t) => Some(t.clone()),
            Resolved::Name(id) => match self.resolver.resolve(id) {
                Some(crate::symbol::Symbol::Type(t)) => Some(t.clone()),
                _ => None,
            },
            _ => None,
        }
    }
}
