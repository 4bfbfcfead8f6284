//! # AST (input contract)
//!
//! The closed set of node kinds this crate accepts, as handed down by the
//! parser (`spec.md` §6 "Input contract"). The parser, the earlier
//! symbol-collection pass and the AST's own construction are explicitly out
//! of scope (`spec.md` §1) -- these types exist here only so the analyser has
//! something concrete to walk and rewrite.
//!
//! ## Operator rewriting
//!
//! Every operator-bearing node holds an [`OperatorSlot`] rather than a bare
//! [`Operator`]. `spec.md` §9's Design Notes call for modelling the mutable
//! "op" slot as a sum type rather than a dynamically-typed field:
//! `Syntactic(Operator)` before resolution, `Resolved(Operation)` after. The
//! analyser rewrites the slot in place on success and never partially
//! rewrites a node (`spec.md` §3 invariant).

pub mod expression;
pub mod statement;

pub use expression::{Expression, NameConstant};
pub use statement::{Argument, AssignTarget, Statement};

use crate::operation::{BinaryOperation, UnaryOperation};
use crate::operator::Operator;

/// A statement list making up a whole module (`spec.md` §4.5 "Module node").
pub type Module = Vec<Statement>;

/// An operator slot that starts out syntactic and is rewritten, in place, to
/// the resolved operation once the analyser proves it type-checks.
#[derive(Debug, Clone, PartialEq)]
pub enum OperatorSlot<Resolved> {
    Syntactic(Operator),
    Resolved(Resolved),
}

impl<Resolved> OperatorSlot<Resolved> {
    pub fn syntactic(operator: Operator) -> Self {
        OperatorSlot::Syntactic(operator)
    }

    /// The abstract operator this slot represents, whichever state it is in.
    /// Used when a node that has already been rewritten (idempotent
    /// re-analysis, `spec.md` §8) is visited again.
    pub fn operator(&self) -> Operator
    where
        Resolved: ResolvedOperator,
    {
        match self {
            OperatorSlot::Syntactic(op) => *op,
            OperatorSlot::Resolved(resolved) => resolved.operator(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, OperatorSlot::Resolved(_))
    }
}

/// Implemented by the two concrete operation kinds so [`OperatorSlot::operator`]
/// works generically over either.
pub trait ResolvedOperator {
    fn operator(&self) -> Operator;
}

impl ResolvedOperator for BinaryOperation {
    fn operator(&self) -> Operator {
        self.operator
    }
}

impl ResolvedOperator for UnaryOperation {
    fn operator(&self) -> Operator {
        self.operator
    }
}

pub type BinaryOperatorSlot = OperatorSlot<BinaryOperation>;
pub type UnaryOperatorSlot = OperatorSlot<UnaryOperation>;
