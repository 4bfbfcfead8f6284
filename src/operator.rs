//! # Operator Vocabulary
//!
//! The closed set of abstract, untyped operators the parser can hand the
//! analyser. An `Operator` carries no type information by itself -- it is the
//! key the [`crate::operation`] registry looks up to find a concrete,
//! operand-typed [`crate::operation::Operation`].
//!
//! Arity is not a property of the variant itself: `Plus` and `Minus` are
//! looked up in the unary table when the parser produced a `UnaryOp` node
//! (`-x`) and in the binary table when it produced a `BinOp` node (`a - b`).
//! Which table is consulted is decided by the AST node kind being visited,
//! not by the operator.

use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Operator {
    Plus,
    Minus,
    Mult,
    IntDiv,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    And,
    Or,
    Not,
    Subscript,
}

impl Operator {
    /// Stable identifier string, used verbatim in diagnostic payloads.
    pub fn identifier(self) -> &'static str {
        match self {
            Operator::Plus => "Plus",
            Operator::Minus => "Minus",
            Operator::Mult => "Mult",
            Operator::IntDiv => "IntDiv",
            Operator::Mod => "Mod",
            Operator::Eq => "Eq",
            Operator::NotEq => "NotEq",
            Operator::Lt => "Lt",
            Operator::LtE => "LtE",
            Operator::Gt => "Gt",
            Operator::GtE => "GtE",
            Operator::Is => "Is",
            Operator::IsNot => "IsNot",
            Operator::And => "And",
            Operator::Or => "Or",
            Operator::Not => "Not",
            Operator::Subscript => "Subscript",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}
