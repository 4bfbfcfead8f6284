//! Concrete binary operation table.
//!
//! Grounded on `examples/original_source/boa3/model/operation/binary/arithmetic/concat.py`:
//! that file is the canonical example of an operation that type-checks but is
//! not supported (`Plus` on two strings, lowered to `CAT`, `is_supported =
//! False`). The rest of the table follows the same shape for the operators
//! enumerated in `spec.md` §2.2, using the opcode identifiers harvested from
//! `examples/original_source/boa3/neo/vm/opcode/Opcode.py`.

use std::collections::HashMap;

use super::BinaryOperation;
use crate::opcode::Opcode;
use crate::operator::Operator;
use crate::types::Type;

fn op(operator: Operator, left: Type, right: Type, result: Type, opcode: Opcode, supported: bool) -> BinaryOperation {
    BinaryOperation {
        operator,
        left_type: left,
        right_type: right,
        result_type: result,
        opcode: opcode.into(),
        supported,
    }
}

pub(super) fn table() -> HashMap<Operator, Vec<BinaryOperation>> {
    use Operator::*;
    use Type::{Boolean as B, Integer as I, NoneType as N, String as S};

    let mut table: HashMap<Operator, Vec<BinaryOperation>> = HashMap::new();

    table.insert(
        Plus,
        vec![
            op(Plus, I, I, I, Opcode::Add, true),
            // string concatenation: typed, not yet lowered -- see module doc.
            op(Plus, S, S, S, Opcode::Cat, false),
        ],
    );
    table.insert(Minus, vec![op(Minus, I, I, I, Opcode::Sub, true)]);
    table.insert(Mult, vec![op(Mult, I, I, I, Opcode::Mul, true)]);
    table.insert(IntDiv, vec![op(IntDiv, I, I, I, Opcode::Div, true)]);
    table.insert(Mod, vec![op(Mod, I, I, I, Opcode::Mod, true)]);

    // `is`, `is not` and `eq` were not implemented yet -- see the TODO in
    // `visit_Compare` this whole table is grounded on.
    table.insert(
        Eq,
        vec![
            op(Eq, I, I, B, Opcode::NumEqual, false),
            op(Eq, B, B, B, Opcode::Equal, false),
            op(Eq, S, S, B, Opcode::Equal, false),
        ],
    );
    table.insert(
        NotEq,
        vec![
            op(NotEq, I, I, B, Opcode::NumNotEqual, true),
            op(NotEq, B, B, B, Opcode::NotEqual, true),
            op(NotEq, S, S, B, Opcode::NotEqual, true),
        ],
    );

    table.insert(Lt, vec![op(Lt, I, I, B, Opcode::Lt, true)]);
    table.insert(LtE, vec![op(LtE, I, I, B, Opcode::Le, true)]);
    table.insert(Gt, vec![op(Gt, I, I, B, Opcode::Gt, true)]);
    table.insert(GtE, vec![op(GtE, I, I, B, Opcode::Ge, true)]);

    // identity comparison: only meaningfully typed against `none` in this
    // subset (`x is None`); not yet lowered by the code generator.
    table.insert(Is, vec![op(Is, N, N, B, Opcode::IsNull, false)]);
    table.insert(IsNot, vec![op(IsNot, N, N, B, Opcode::IsNull, false)]);

    table.insert(And, vec![op(And, B, B, B, Opcode::BoolAnd, true)]);
    table.insert(Or, vec![op(Or, B, B, B, Opcode::BoolOr, true)]);

    table
}
