//! Expression visitors (`spec.md` §4.5). Each one returns
//! `Result<Resolved, Unwind>` -- on failure, a diagnostic has already been
//! recorded and the caller propagates the short-circuit with `?`.

use super::{Analyser, Resolved};
use crate::ast::{BinaryOperatorSlot, Expression, NameConstant, UnaryOperatorSlot};
use crate::diagnostics::{DiagnosticKind, Unwind};
use crate::operation::OperationRegistry;
use crate::operator::Operator;
use crate::position::Position;
use crate::types::{Type, Value};

impl Analyser {
    pub(crate) fn visit_expression(&mut self, expr: &mut Expression) -> Result<Resolved, Unwind> {
        match expr {
            Expression::Number { value, position } => self.visit_number(value, *position),
            Expression::Str { value, .. } => Ok(Resolved::Value(Value::Str(value.clone()))),
            Expression::NameConstant { value, .. } => Ok(Resolved::Value(name_constant_value(*value))),
            Expression::Name { id, .. } => Ok(Resolved::Name(id.clone())),
            Expression::Tuple { .. } => Ok(Resolved::Tuple),
            Expression::Index { value } => self.visit_expression(value),
            Expression::Subscript {
                value,
                index,
                position,
            } => self.visit_subscript(value, index, *position),
            Expression::BinaryOp {
                op,
                left,
                right,
                position,
            } => self.visit_binary_op(op, left, right, *position),
            Expression::UnaryOp {
                op,
                operand,
                position,
            } => self.visit_unary_op(op, operand, *position),
            Expression::Compare {
                left,
                ops,
                comparators,
                position,
            } => self.visit_compare(left, ops, comparators, *position),
            Expression::BoolOp {
                op,
                values,
                position,
            } => self.visit_bool_op(op, values, *position),
            Expression::IfExp { test, position, .. } => self.visit_if_exp(test, *position),
        }
    }

    /// Only `int` literals survive this subset; `float`/`complex` are
    /// recognised by the grammar but rejected here (`spec.md` §4.5 "Number
    /// literal").
    fn visit_number(
        &mut self,
        value: &crate::ast::expression::NumberValue,
        position: Position,
    ) -> Result<Resolved, Unwind> {
        match value {
            crate::ast::expression::NumberValue::Int(n) => Ok(Resolved::Value(Value::Int(*n))),
            other => Err(self.sink.log_error(
                DiagnosticKind::InvalidType {
                    symbol_id: other.type_name().to_string(),
                },
                position,
            )),
        }
    }

    /// Transparent pass-through to the value side; then checks the value is
    /// subscriptable and the index type is a valid key for it (`spec.md`
    /// §4.5 "Subscript"). When both sides denote type symbols -- either
    /// already a bare `Type` (a nested type hint, e.g. the inner
    /// `Sequence[int]` of `Sequence[Sequence[int]]`) or a `Name` that
    /// resolves to `Symbol::Type` (the base case, e.g. `Sequence[int]`
    /// itself) -- this is a sequence-type constructor, not a runtime
    /// indexing expression, and is short-circuited before any of the
    /// sequence checks below. A `Name` must be resolved through the
    /// `Resolver` first: it always walks to `Resolved::Name`, regardless of
    /// what it names, so the check cannot be done on the unresolved
    /// `Resolved` value alone.
    fn visit_subscript(
        &mut self,
        value: &mut Expression,
        index: &mut Expression,
        position: Position,
    ) -> Result<Resolved, Unwind> {
        let value_resolved = self.visit_expression(value)?;
        let index_resolved = self.visit_expression(index)?;

        if let (Some(value_type), Some(key_type)) = (
            self.resolved_as_type_symbol(&value_resolved),
            self.resolved_as_type_symbol(&index_resolved),
        ) {
            return Ok(Resolved::Type(Type::sequence(value_type, key_type)));
        }

        let value_type = self.get_type(&value_resolved);
        let index_type = self.get_type(&index_resolved);

        match &value_type {
            Type::Sequence { value_type: element, valid_key } => {
                if !value_type.is_valid_key(&index_type) {
                    return Err(self.sink.log_error(
                        DiagnosticKind::MismatchedTypes {
                            actual: index_type,
                            expected: valid_key.as_ref().clone(),
                        },
                        position,
                    ));
                }
                Ok(Resolved::Type(element.as_ref().clone()))
            }
            _ => Err(self.sink.log_error(
                DiagnosticKind::UnresolvedOperation {
                    type_id: value_type.identifier(),
                    operation_id: Operator::Subscript,
                },
                position,
            )),
        }
    }

    /// Walks left-to-right (`spec.md` §8 "diagnostic order equals depth-first
    /// left-to-right walk order"), looks the abstract operator up in the
    /// registry, and rewrites `op` in place on success. Already-resolved
    /// slots (idempotent re-analysis, §8) short-circuit straight to their
    /// cached result type.
    fn visit_binary_op(
        &mut self,
        op: &mut BinaryOperatorSlot,
        left: &mut Expression,
        right: &mut Expression,
        position: Position,
    ) -> Result<Resolved, Unwind> {
        if let crate::ast::OperatorSlot::Resolved(resolved) = op {
            return Ok(Resolved::Type(resolved.result_type.clone()));
        }
        let operator = match op {
            crate::ast::OperatorSlot::Syntactic(operator) => *operator,
            crate::ast::OperatorSlot::Resolved(_) => unreachable!(),
        };

        let left_resolved = self.visit_expression(left)?;
        let right_resolved = self.visit_expression(right)?;
        let left_type = self.get_type(&left_resolved);
        let right_type = self.get_type(&right_resolved);

        let registry = OperationRegistry::global();
        if !registry.knows_binary(operator) {
            return Err(self.sink.log_error(
                DiagnosticKind::UnresolvedReference {
                    token: operator.identifier().to_string(),
                },
                position,
            ));
        }
        match registry.validate_binary(operator, &left_type, &right_type) {
            Some(resolved) if resolved.supported => {
                let result_type = resolved.result_type.clone();
                let resolved = resolved.clone();
                log::debug!("resolved {operator} at {position} to {resolved:?}");
                *op = crate::ast::OperatorSlot::Resolved(resolved);
                Ok(Resolved::Type(result_type))
            }
            _ => Err(self.sink.log_error(
                DiagnosticKind::NotSupportedOperation {
                    description: operator.identifier().to_string(),
                },
                position,
            )),
        }
    }

    fn visit_unary_op(
        &mut self,
        op: &mut UnaryOperatorSlot,
        operand: &mut Expression,
        position: Position,
    ) -> Result<Resolved, Unwind> {
        if let crate::ast::OperatorSlot::Resolved(resolved) = op {
            return Ok(Resolved::Type(resolved.result_type.clone()));
        }
        let operator = match op {
            crate::ast::OperatorSlot::Syntactic(operator) => *operator,
            crate::ast::OperatorSlot::Resolved(_) => unreachable!(),
        };

        let operand_resolved = self.visit_expression(operand)?;
        let operand_type = self.get_type(&operand_resolved);

        let registry = OperationRegistry::global();
        if !registry.knows_unary(operator) {
            return Err(self.sink.log_error(
                DiagnosticKind::UnresolvedReference {
                    token: operator.identifier().to_string(),
                },
                position,
            ));
        }
        match registry.validate_unary(operator, &operand_type) {
            Some(resolved) if resolved.supported => {
                let result_type = resolved.result_type.clone();
                let resolved = resolved.clone();
                log::debug!("resolved {operator} at {position} to {resolved:?}");
                *op = crate::ast::OperatorSlot::Resolved(resolved);
                Ok(Resolved::Type(result_type))
            }
            _ => Err(self.sink.log_error(
                DiagnosticKind::NotSupportedOperation {
                    description: operator.identifier().to_string(),
                },
                position,
            )),
        }
    }

    /// Chained comparison: each operator pairs with exactly one comparator,
    /// and the "current left" shifts to the previous right after each pair
    /// (`spec.md` §4.5 "Compare"). Diagnostics advance to the comparator's
    /// own position rather than staying pinned to the whole expression.
    fn visit_compare(
        &mut self,
        left: &mut Expression,
        ops: &mut [BinaryOperatorSlot],
        comparators: &mut [Expression],
        position: Position,
    ) -> Result<Resolved, Unwind> {
        if ops.len() != comparators.len() {
            return Err(self.sink.log_error(
                DiagnosticKind::IncorrectNumberOfOperands {
                    got: comparators.len(),
                    expected: ops.len(),
                },
                position,
            ));
        }

        let left_resolved = self.visit_expression(left)?;
        let mut left_type = self.get_type(&left_resolved);
        if ops.is_empty() {
            return Ok(Resolved::Type(left_type));
        }

        let mut current_position = position;
        let mut result_type = left_type.clone();
        let registry = OperationRegistry::global();

        for (op_slot, comparator) in ops.iter_mut().zip(comparators.iter_mut()) {
            let operator = match op_slot {
                crate::ast::OperatorSlot::Syntactic(operator) => *operator,
                crate::ast::OperatorSlot::Resolved(resolved) => resolved.operator,
            };
            let right_resolved = self.visit_expression(comparator)?;
            let right_type = self.get_type(&right_resolved);

            if !registry.knows_binary(operator) {
                return Err(self.sink.log_error(
                    DiagnosticKind::UnresolvedReference {
                        token: operator.identifier().to_string(),
                    },
                    current_position,
                ));
            }
            match registry.validate_binary(operator, &left_type, &right_type) {
                Some(resolved) if resolved.supported => {
                    result_type = resolved.result_type.clone();
                    log::debug!("resolved {operator} at {current_position} to {resolved:?}");
                    *op_slot = crate::ast::OperatorSlot::Resolved(resolved.clone());
                }
                _ => {
                    return Err(self.sink.log_error(
                        DiagnosticKind::NotSupportedOperation {
                            description: operator.identifier().to_string(),
                        },
                        current_position,
                    ))
                }
            }

            current_position = comparator.position();
            left_type = right_type;
        }

        Ok(Resolved::Type(result_type))
    }

    /// Chained boolean operation (`a and b and c`): one shared operator
    /// across every pair. Only the first successfully resolved operation is
    /// recorded into `op` -- later pairs are still walked for their own
    /// diagnostics, but do not overwrite it (`spec.md` §4.5 "Boolean
    /// operation"). Unlike [`Analyser::visit_binary_op`], a pairing that
    /// type-checks but is unsupported is not itself an error here: only a
    /// pairing that does not type-check at all is, mirroring the source's
    /// boolean-operation walker exactly.
    fn visit_bool_op(
        &mut self,
        op: &mut BinaryOperatorSlot,
        values: &mut [Expression],
        position: Position,
    ) -> Result<Resolved, Unwind> {
        let operator = match op {
            crate::ast::OperatorSlot::Syntactic(operator) => *operator,
            crate::ast::OperatorSlot::Resolved(resolved) => resolved.operator,
        };
        let registry = OperationRegistry::global();
        if !registry.knows_binary(operator) {
            return Err(self.sink.log_error(
                DiagnosticKind::UnresolvedReference {
                    token: operator.identifier().to_string(),
                },
                position,
            ));
        }

        let (first, rest) = values
            .split_first_mut()
            .expect("BoolOp always has at least one operand");
        let first_resolved = self.visit_expression(first)?;
        let mut left_type = self.get_type(&first_resolved);

        if rest.is_empty() {
            return Ok(Resolved::Type(left_type));
        }

        let mut current_position = position;
        let mut recorded = None;
        let mut result_type = left_type.clone();

        for value in rest.iter_mut() {
            let right_resolved = self.visit_expression(value)?;
            let right_type = self.get_type(&right_resolved);

            match registry.validate_binary(operator, &left_type, &right_type) {
                None => {
                    return Err(self.sink.log_error(
                        DiagnosticKind::NotSupportedOperation {
                            description: operator.identifier().to_string(),
                        },
                        current_position,
                    ))
                }
                Some(resolved) => {
                    if recorded.is_none() {
                        result_type = resolved.result_type.clone();
                        log::debug!("resolved {operator} at {current_position} to {resolved:?}");
                        recorded = Some(resolved.clone());
                    }
                }
            }

            current_position = value.position();
            left_type = right_type;
        }

        if let Some(resolved) = recorded {
            *op = crate::ast::OperatorSlot::Resolved(resolved);
        }
        Ok(Resolved::Type(result_type))
    }

    /// Checks the test is boolean-typed; the branch bodies themselves are
    /// not walked here, matching the source's `IfExp` handler, which never
    /// recurses into `body`/`orelse` (`spec.md` §4.5 "While/If/IfExp").
    fn visit_if_exp(&mut self, test: &mut Expression, position: Position) -> Result<Resolved, Unwind> {
        self.check_test_is_bool(test, position)?;
        Ok(Resolved::Value(Value::None))
    }

    /// Shared by `While`/`If`/`IfExp`: the test expression must type-check
    /// to `bool`.
    pub(crate) fn check_test_is_bool(
        &mut self,
        test: &mut Expression,
        position: Position,
    ) -> Result<(), Unwind> {
        let resolved = self.visit_expression(test)?;
        let test_type = self.get_type(&resolved);
        if test_type != Type::Boolean {
            return Err(self.sink.log_error(
                DiagnosticKind::MismatchedTypes {
                    actual: test_type,
                    expected: Type::Boolean,
                },
                position,
            ));
        }
        Ok(())
    }
}

fn name_constant_value(value: NameConstant) -> Value {
    match value {
        NameConstant::True => Value::Bool(true),
        NameConstant::False => Value::Bool(false),
        NameConstant::None => Value::None,
    }
}
