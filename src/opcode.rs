//! # VM Opcode (external datum)
//!
//! A fixed label from the target stack machine's instruction set. Per `spec.md`
//! §1/§6, the byte encoding of these opcodes is owned by the code generator and
//! the opcode byte tables, not by this crate -- `Opcode` here is purely a name
//! the operation registry can point at, so that a resolved [`crate::operation::Operation`]
//! carries *which* VM primitive it lowers to without this crate knowing how
//! that primitive is serialised.
//!
//! The members below are the ones this operator vocabulary actually needs;
//! they match the identifiers of the target VM's real opcode table.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Opcode {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    NumEqual,
    NumNotEqual,
    Lt,
    Le,
    Gt,
    Ge,
    Equal,
    NotEqual,
    BoolAnd,
    BoolOr,
    Not,
    IsNull,
    PickItem,
    Cat,
}

/// An `Operation`'s lowering target: most operators lower to a single opcode,
/// but some (e.g. a future `is not`, lowered as `ISNULL` followed by a boolean
/// negation) need a short fixed sequence. Kept as a distinct type rather than
/// always using `Vec<Opcode>` so the common single-opcode case doesn't pay for
/// a heap allocation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OpcodeTarget {
    Single(Opcode),
    Sequence(Vec<Opcode>),
}

impl From<Opcode> for OpcodeTarget {
    fn from(op: Opcode) -> Self {
        OpcodeTarget::Single(op)
    }
}
