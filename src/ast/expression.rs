//! Expression node kinds (`spec.md` §4.5).

use crate::ast::{BinaryOperatorSlot, UnaryOperatorSlot};
use crate::position::Position;

/// The raw value carried by a number literal, before this subset's
/// restriction to integers is enforced. Mirrors the dynamically-typed
/// source's `ast.Num.n`, which may be an int, a float or a complex number --
/// only the `Int` case survives semantic analysis (`spec.md` §4.5 "Number
/// literal").
#[derive(Debug, Clone, PartialEq)]
pub enum NumberValue {
    Int(i64),
    Float(f64),
    Complex,
}

impl NumberValue {
    /// The literal's type name, used in the `InvalidType` diagnostic payload
    /// when it isn't an integer.
    pub fn type_name(&self) -> &'static str {
        match self {
            NumberValue::Int(_) => "int",
            NumberValue::Float(_) => "float",
            NumberValue::Complex => "complex",
        }
    }
}

/// The three keyword literals the source grammar accepts (`ast.NameConstant`
/// in the original grammar).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameConstant {
    True,
    False,
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number {
        value: NumberValue,
        position: Position,
    },
    Str {
        value: String,
        position: Position,
    },
    NameConstant {
        value: NameConstant,
        position: Position,
    },
    /// A bare identifier reference; resolved against the symbol table by the
    /// parent node, not by the `Name` visitor itself (`spec.md` §4.5 "Name
    /// constant / Name").
    Name {
        id: String,
        position: Position,
    },
    /// Unevaluated element list -- tuples in this subset only appear in
    /// type-hint and multi-assignment-target contexts, handled by the parent
    /// node, so elements are not recursively walked here (`spec.md` §4.5
    /// "Tuple literal").
    Tuple {
        elements: Vec<Expression>,
        position: Position,
    },
    /// Transparent wrapper around a subscript slice value (`spec.md` §4.5
    /// "Index node wrapper").
    Index {
        value: Box<Expression>,
    },
    Subscript {
        value: Box<Expression>,
        index: Box<Expression>,
        position: Position,
    },
    BinaryOp {
        op: BinaryOperatorSlot,
        left: Box<Expression>,
        right: Box<Expression>,
        position: Position,
    },
    UnaryOp {
        op: UnaryOperatorSlot,
        operand: Box<Expression>,
        position: Position,
    },
    /// A chained comparison (`a < b <= c`): one left operand, then parallel
    /// lists of operators and right-hand comparators (`spec.md` §4.5
    /// "Compare").
    Compare {
        left: Box<Expression>,
        ops: Vec<BinaryOperatorSlot>,
        comparators: Vec<Expression>,
        position: Position,
    },
    /// A chained boolean operation (`a and b and c`): one shared operator
    /// across all operands (`spec.md` §4.5 "Boolean operation").
    BoolOp {
        op: BinaryOperatorSlot,
        values: Vec<Expression>,
        position: Position,
    },
    IfExp {
        test: Box<Expression>,
        body: Box<Expression>,
        orelse: Box<Expression>,
        position: Position,
    },
}

impl Expression {
    /// The position to attach a diagnostic to when this node itself (rather
    /// than a more specific operand) is at fault. `Index` has none of its
    /// own -- it is transparent -- so it defers to its child.
    pub fn position(&self) -> Position {
        match self {
            Expression::Number { position, .. }
            | Expression::Str { position, .. }
            | Expression::NameConstant { position, .. }
            | Expression::Name { position, .. }
            | Expression::Tuple { position, .. }
            | Expression::Subscript { position, .. }
            | Expression::BinaryOp { position, .. }
            | Expression::UnaryOp { position, .. }
            | Expression::Compare { position, .. }
            | Expression::BoolOp { position, .. }
            | Expression::IfExp { position, .. } => *position,
            Expression::Index { value } => value.position(),
        }
    }
}
