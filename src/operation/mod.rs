//! # Operation Registry
//!
//! For each [`Operator`], the registry holds zero or more concrete *operations*
//! indexed by operand types (`spec.md` §3/§4.2). This module defines the
//! `Operation` shapes and the registry lookup API; [`binary`] and [`unary`]
//! populate the concrete tables.
//!
//! Two independent axes are kept apart on purpose (§4.2): whether an operation
//! *type-checks* (`validate_type`) and whether it is *supported* by the code
//! generator yet (`supported`). String concatenation is the textbook example:
//! `Plus` on two strings type-checks (result type `str`) but is not supported
//! (`Opcode::Cat` has no faithful lowering yet), which is a distinct error
//! class from "these types don't work with this operator at all".

mod binary;
mod unary;

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::opcode::OpcodeTarget;
use crate::operator::Operator;
use crate::types::Type;

/// A resolved application of a binary [`Operator`] to specific operand types.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperation {
    pub operator: Operator,
    pub left_type: Type,
    pub right_type: Type,
    pub result_type: Type,
    pub opcode: OpcodeTarget,
    pub supported: bool,
}

impl BinaryOperation {
    /// Total, side-effect free: does this concrete operation apply to
    /// `(left, right)`?
    pub fn validate_type(&self, left: &Type, right: &Type) -> bool {
        self.left_type == *left && self.right_type == *right
    }
}

/// A resolved application of a unary [`Operator`] to a specific operand type.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperation {
    pub operator: Operator,
    pub operand_type: Type,
    pub result_type: Type,
    pub opcode: OpcodeTarget,
    pub supported: bool,
}

impl UnaryOperation {
    pub fn validate_type(&self, operand: &Type) -> bool {
        self.operand_type == *operand
    }
}

/// The two operator-indexed tables. Built once, at process start, and never
/// mutated afterwards -- operations are process-lifetime singletons (`spec.md`
/// §3 "Lifecycles").
pub struct OperationRegistry {
    binary: HashMap<Operator, Vec<BinaryOperation>>,
    unary: HashMap<Operator, Vec<UnaryOperation>>,
}

static REGISTRY: Lazy<OperationRegistry> = Lazy::new(OperationRegistry::build);

impl OperationRegistry {
    fn build() -> OperationRegistry {
        OperationRegistry {
            binary: binary::table(),
            unary: unary::table(),
        }
    }

    pub fn global() -> &'static OperationRegistry {
        &REGISTRY
    }

    /// First registered binary operation under `operator` whose
    /// `validate_type` accepts `(left, right)`.
    pub fn validate_binary(
        &self,
        operator: Operator,
        left: &Type,
        right: &Type,
    ) -> Option<&BinaryOperation> {
        self.binary
            .get(&operator)
            .and_then(|ops| ops.iter().find(|op| op.validate_type(left, right)))
    }

    /// The canonical (first-registered) binary operation for `operator`, used
    /// for diagnostics that need to report the expected signature.
    pub fn canonical_binary(&self, operator: Operator) -> Option<&BinaryOperation> {
        self.binary.get(&operator).and_then(|ops| ops.first())
    }

    pub fn validate_unary(&self, operator: Operator, operand: &Type) -> Option<&UnaryOperation> {
        self.unary
            .get(&operator)
            .and_then(|ops| ops.iter().find(|op| op.validate_type(operand)))
    }

    pub fn canonical_unary(&self, operator: Operator) -> Option<&UnaryOperation> {
        self.unary.get(&operator).and_then(|ops| ops.first())
    }

    /// True iff the vocabulary has *any* registered operations (supported or
    /// not) for `operator` as a binary operator -- used to tell "operator is
    /// known to the vocabulary but these types don't match" apart from
    /// "operator unknown" in diagnostics.
    pub fn knows_binary(&self, operator: Operator) -> bool {
        self.binary.contains_key(&operator)
    }

    pub fn knows_unary(&self, operator: Operator) -> bool {
        self.unary.contains_key(&operator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_plus_int_is_supported() {
        let reg = OperationRegistry::global();
        let op = reg
            .validate_binary(Operator::Plus, &Type::Integer, &Type::Integer)
            .expect("int + int should resolve");
        assert!(op.supported);
        assert_eq!(op.result_type, Type::Integer);
    }

    #[test]
    fn str_plus_str_is_typed_but_not_supported() {
        let reg = OperationRegistry::global();
        let op = reg
            .validate_binary(Operator::Plus, &Type::String, &Type::String)
            .expect("str + str should type-check");
        assert_eq!(op.result_type, Type::String);
        assert!(!op.supported);
    }

    #[test]
    fn int_plus_str_does_not_resolve() {
        let reg = OperationRegistry::global();
        assert!(reg
            .validate_binary(Operator::Plus, &Type::Integer, &Type::String)
            .is_none());
    }

    #[test]
    fn canonical_operation_reports_expected_signature() {
        let reg = OperationRegistry::global();
        let canonical = reg
            .canonical_binary(Operator::IntDiv)
            .expect("IntDiv has at least one registered operation");
        assert_eq!(canonical.left_type, Type::Integer);
        assert_eq!(canonical.right_type, Type::Integer);
    }

    #[test]
    fn unknown_operator_reports_as_unknown_to_vocabulary() {
        let reg = OperationRegistry::global();
        // every Operator variant that appears in a BinOp/Compare/BoolOp node
        // is registered; Subscript is handled outside the registry entirely.
        assert!(!reg.knows_binary(Operator::Subscript));
    }
}
