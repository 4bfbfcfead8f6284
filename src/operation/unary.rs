//! Concrete unary operation table.
//!
//! `Operator::Plus`/`Operator::Minus` are shared with the binary table (the
//! parser hands the analyser the same enum values for `+x`/`-x` as for
//! `a + b`/`a - b`; see `crate::operator`'s module doc) but are looked up in
//! this separate, unary-only table.

use std::collections::HashMap;

use super::UnaryOperation;
use crate::opcode::{Opcode, OpcodeTarget};
use crate::operator::Operator;
use crate::types::Type;

pub(super) fn table() -> HashMap<Operator, Vec<UnaryOperation>> {
    let mut table: HashMap<Operator, Vec<UnaryOperation>> = HashMap::new();

    table.insert(
        Operator::Plus,
        vec![UnaryOperation {
            operator: Operator::Plus,
            operand_type: Type::Integer,
            result_type: Type::Integer,
            // unary plus is a no-op at the VM level: nothing to emit.
            opcode: OpcodeTarget::Sequence(vec![]),
            supported: true,
        }],
    );

    table.insert(
        Operator::Minus,
        vec![UnaryOperation {
            operator: Operator::Minus,
            operand_type: Type::Integer,
            result_type: Type::Integer,
            // negation lowers as `0 - x`; no dedicated NEGATE opcode in the
            // harvested subset (see opcode.rs module doc).
            opcode: OpcodeTarget::Sequence(vec![Opcode::Sub]),
            supported: true,
        }],
    );

    table.insert(
        Operator::Not,
        vec![UnaryOperation {
            operator: Operator::Not,
            operand_type: Type::Boolean,
            result_type: Type::Boolean,
            opcode: Opcode::Not.into(),
            supported: true,
        }],
    );

    table
}
