//! Integration tests exercising the whole analyser against the concrete
//! scenarios enumerated in `spec.md` §8, built directly as AST literals (no
//! parser exists in this crate -- the input contract is the AST itself).
//!
//! Every scenario that involves a `return` is wrapped in a `FunctionDef`, the
//! same way `check_module` expects to encounter it: `current_method` is only
//! ever set by walking into a function body.

use semantic_core::analyser::{Analyser, AnalyserOptions};
use semantic_core::ast::{Argument, AssignTarget, Expression, OperatorSlot, Statement};
use semantic_core::diagnostics::DiagnosticKind;
use semantic_core::operator::Operator;
use semantic_core::position::Position;
use semantic_core::symbol::{MethodSymbol, Symbol, SymbolTable};
use semantic_core::types::Type;

fn pos(line: usize, column: usize) -> Position {
    Position::new(line, column)
}

fn name(id: &str, line: usize, column: usize) -> Expression {
    Expression::Name {
        id: id.to_string(),
        position: pos(line, column),
    }
}

fn int_literal(value: i64, line: usize, column: usize) -> Expression {
    Expression::Number {
        value: semantic_core::ast::expression::NumberValue::Int(value),
        position: pos(line, column),
    }
}

fn globals_with_method(
    name: &str,
    params: Vec<Type>,
    return_type: Type,
    arg_names: &[&str],
) -> SymbolTable {
    let mut locals = SymbolTable::default();
    for (id, ty) in arg_names.iter().zip(params.iter()) {
        locals.insert(id.to_string(), Symbol::Expression(ty.clone()));
    }
    let mut globals = SymbolTable::default();
    globals.insert(
        name.to_string(),
        Symbol::Method(MethodSymbol {
            params,
            return_type,
            locals,
        }),
    );
    globals
}

fn function(name: &str, args: Vec<Argument>, body: Vec<Statement>) -> Statement {
    Statement::FunctionDef {
        name: name.to_string(),
        args,
        body,
        position: pos(1, 0),
    }
}

fn typed_arg(name: &str, annotation: Type, line: usize, column: usize) -> Argument {
    Argument {
        name: name.to_string(),
        annotation: Some(annotation),
        position: pos(line, column),
    }
}

fn untyped_arg(name: &str, line: usize, column: usize) -> Argument {
    Argument {
        name: name.to_string(),
        annotation: None,
        position: pos(line, column),
    }
}

/// Scenario 1: `def f(a: int, b: int) -> int: return a + b` -- zero errors,
/// the `+` node's slot resolves to the integer-Add operation.
#[test]
fn typed_addition_resolves_and_rewrites() {
    let globals = globals_with_method("f", vec![Type::Integer, Type::Integer], Type::Integer, &["a", "b"]);

    let mut module = vec![function(
        "f",
        vec![
            typed_arg("a", Type::Integer, 1, 6),
            typed_arg("b", Type::Integer, 1, 14),
        ],
        vec![Statement::Return {
            value: Some(Expression::BinaryOp {
                op: OperatorSlot::syntactic(Operator::Plus),
                left: Box::new(name("a", 1, 34)),
                right: Box::new(name("b", 1, 38)),
                position: pos(1, 34),
            }),
            position: pos(1, 27),
        }],
    )];

    let mut analyser = Analyser::new(globals, SymbolTable::default(), AnalyserOptions::default());
    analyser.check_module(&mut module).expect("no fatal sentinel expected");

    assert!(!analyser.has_errors(), "{:?}", analyser.errors());
    let Statement::FunctionDef { body, .. } = &module[0] else {
        panic!("expected a FunctionDef")
    };
    match &body[0] {
        Statement::Return {
            value: Some(Expression::BinaryOp { op, .. }),
            ..
        } => assert!(op.is_resolved(), "Plus should have been rewritten"),
        _ => panic!("expected a Return with a BinaryOp"),
    }
}

/// Scenario 2: `def f(a, b): return a + b` -- two TypeHintMissing for the
/// unannotated args, plus one for the method's own return.
#[test]
fn missing_argument_and_return_hints_are_all_reported() {
    let globals = globals_with_method("f", vec![Type::Integer, Type::Integer], Type::NoneType, &["a", "b"]);

    let mut module = vec![function(
        "f",
        vec![untyped_arg("a", 1, 6), untyped_arg("b", 1, 9)],
        vec![Statement::Return {
            value: Some(Expression::BinaryOp {
                op: OperatorSlot::syntactic(Operator::Plus),
                left: Box::new(name("a", 2, 9)),
                right: Box::new(name("b", 2, 13)),
                position: pos(2, 9),
            }),
            position: pos(2, 2),
        }],
    )];

    let mut analyser = Analyser::new(globals, SymbolTable::default(), AnalyserOptions::default());
    analyser.check_module(&mut module).expect("no fatal sentinel");

    let hints: Vec<_> = analyser
        .errors()
        .iter()
        .filter(|d| matches!(d.kind, DiagnosticKind::TypeHintMissing { .. }))
        .collect();
    assert_eq!(hints.len(), 3, "{:?}", analyser.errors());
}

/// Scenario 3: `def f() -> int: return` -- one MismatchedTypes(none, int).
#[test]
fn bare_return_against_declared_type_mismatches() {
    let globals = globals_with_method("f", vec![], Type::Integer, &[]);

    let mut module = vec![function(
        "f",
        vec![],
        vec![Statement::Return {
            value: None,
            position: pos(1, 17),
        }],
    )];

    let mut analyser = Analyser::new(globals, SymbolTable::default(), AnalyserOptions::default());
    analyser.check_module(&mut module).unwrap();

    assert_eq!(analyser.errors().len(), 1);
    match &analyser.errors()[0].kind {
        DiagnosticKind::MismatchedTypes { actual, expected } => {
            assert_eq!(*actual, Type::NoneType);
            assert_eq!(*expected, Type::Integer);
        }
        other => panic!("expected MismatchedTypes, got {other:?}"),
    }
}

/// Scenario 4: `def f(s: str, t: str) -> str: return s + t` -- string
/// concatenation type-checks but is not supported by the code generator yet.
#[test]
fn string_concatenation_is_typed_but_not_supported() {
    let globals = globals_with_method("f", vec![Type::String, Type::String], Type::String, &["s", "t"]);

    let mut module = vec![function(
        "f",
        vec![
            typed_arg("s", Type::String, 1, 6),
            typed_arg("t", Type::String, 1, 14),
        ],
        vec![Statement::Return {
            value: Some(Expression::BinaryOp {
                op: OperatorSlot::syntactic(Operator::Plus),
                left: Box::new(name("s", 1, 40)),
                right: Box::new(name("t", 1, 44)),
                position: pos(1, 40),
            }),
            position: pos(1, 33),
        }],
    )];

    let mut analyser = Analyser::new(globals, SymbolTable::default(), AnalyserOptions::default());
    analyser.check_module(&mut module).unwrap();

    assert_eq!(analyser.errors().len(), 1);
    assert!(matches!(
        &analyser.errors()[0].kind,
        DiagnosticKind::NotSupportedOperation { description } if description == "Plus"
    ));
}

/// Scenario 5: `def f(xs: Sequence[int], k: str) -> int: return xs[k]` --
/// the key type does not match the sequence's declared valid key.
#[test]
fn subscript_with_wrong_key_type_mismatches() {
    let sequence_type = Type::sequence(Type::Integer, Type::Integer);
    let globals = globals_with_method(
        "f",
        vec![sequence_type.clone(), Type::String],
        Type::Integer,
        &["xs", "k"],
    );

    let mut module = vec![function(
        "f",
        vec![
            typed_arg("xs", sequence_type, 1, 6),
            typed_arg("k", Type::String, 1, 26),
        ],
        vec![Statement::Return {
            value: Some(Expression::Subscript {
                value: Box::new(name("xs", 1, 50)),
                index: Box::new(name("k", 1, 53)),
                position: pos(1, 50),
            }),
            position: pos(1, 43),
        }],
    )];

    let mut analyser = Analyser::new(globals, SymbolTable::default(), AnalyserOptions::default());
    analyser.check_module(&mut module).unwrap();

    assert_eq!(analyser.errors().len(), 1);
    match &analyser.errors()[0].kind {
        DiagnosticKind::MismatchedTypes { actual, expected } => {
            assert_eq!(*actual, Type::String);
            assert_eq!(*expected, Type::Integer);
        }
        other => panic!("expected MismatchedTypes, got {other:?}"),
    }
}

/// The type-hint constructor form (`spec.md` §4.5 "Subscript": "if both sides
/// are Types ... return the outer Type unchanged") where both sides are bare
/// `Name`s naming type symbols -- e.g. `Sequence[int]` itself, not a nested
/// subscript already holding a resolved `Type`. `value`/`index` must resolve
/// through the symbol table to `Symbol::Type` before the analyser can tell
/// this apart from ordinary runtime indexing.
#[test]
fn subscript_of_two_type_names_is_a_type_constructor() {
    let mut globals = globals_with_method(
        "f",
        vec![],
        Type::sequence(Type::Integer, Type::Boolean),
        &[],
    );
    globals.insert("IntType".to_string(), Symbol::Type(Type::Integer));
    globals.insert("BoolType".to_string(), Symbol::Type(Type::Boolean));

    let mut module = vec![function(
        "f",
        vec![],
        vec![Statement::Return {
            value: Some(Expression::Subscript {
                value: Box::new(name("IntType", 1, 30)),
                index: Box::new(name("BoolType", 1, 38)),
                position: pos(1, 30),
            }),
            position: pos(1, 23),
        }],
    )];

    let mut analyser = Analyser::new(globals, SymbolTable::default(), AnalyserOptions::default());
    analyser.check_module(&mut module).expect("no fatal sentinel expected");

    assert!(!analyser.has_errors(), "{:?}", analyser.errors());
}

/// Scenario 6: a `while` loop tested against a non-boolean condition.
#[test]
fn while_test_must_be_boolean() {
    let globals = globals_with_method("f", vec![Type::Integer], Type::Integer, &["a"]);

    let mut module = vec![function(
        "f",
        vec![typed_arg("a", Type::Integer, 1, 6)],
        vec![
            Statement::While {
                test: name("a", 2, 8),
                body: vec![Statement::Assignment {
                    targets: vec![AssignTarget::Name("a".to_string(), pos(3, 4))],
                    value: Expression::BinaryOp {
                        op: OperatorSlot::syntactic(Operator::Minus),
                        left: Box::new(name("a", 3, 8)),
                        right: Box::new(int_literal(1, 3, 12)),
                        position: pos(3, 8),
                    },
                    position: pos(3, 4),
                }],
                orelse: vec![],
                position: pos(2, 2),
            },
            Statement::Return {
                value: Some(name("a", 4, 9)),
                position: pos(4, 2),
            },
        ],
    )];

    let mut analyser = Analyser::new(globals, SymbolTable::default(), AnalyserOptions::default());
    analyser.check_module(&mut module).unwrap();

    let mismatches: Vec<_> = analyser
        .errors()
        .iter()
        .filter(|d| matches!(d.kind, DiagnosticKind::MismatchedTypes { .. }))
        .collect();
    assert_eq!(mismatches.len(), 1);
}

/// `break` aborts the whole walk by default.
#[test]
fn break_is_a_fatal_sentinel_by_default() {
    let mut module = vec![Statement::Break(pos(1, 4))];
    let mut analyser = Analyser::new(
        SymbolTable::default(),
        SymbolTable::default(),
        AnalyserOptions::default(),
    );
    assert!(analyser.check_module(&mut module).is_err());
}

/// With `fatal_unimplemented_constructs` off, the same construct becomes an
/// ordinary, recoverable diagnostic instead.
#[test]
fn break_can_be_downgraded_to_an_ordinary_diagnostic() {
    let mut module = vec![Statement::Break(pos(1, 4))];
    let options = AnalyserOptions {
        fatal_unimplemented_constructs: false,
    };
    let mut analyser = Analyser::new(SymbolTable::default(), SymbolTable::default(), options);
    let result = analyser.check_module(&mut module);
    assert!(result.is_ok());
    assert!(analyser.errors().iter().any(
        |d| matches!(&d.kind, DiagnosticKind::NotSupportedConstruct { construct } if construct == "break")
    ));
}

/// Multi-target assignment is an ordinary diagnostic, not a fatal sentinel.
#[test]
fn multi_target_assignment_is_recoverable() {
    let mut module = vec![Statement::Assignment {
        targets: vec![
            AssignTarget::Name("a".to_string(), pos(1, 0)),
            AssignTarget::Name("b".to_string(), pos(1, 4)),
        ],
        value: int_literal(1, 1, 8),
        position: pos(1, 0),
    }];
    let mut analyser = Analyser::new(
        SymbolTable::default(),
        SymbolTable::default(),
        AnalyserOptions::default(),
    );
    let result = analyser.check_module(&mut module);
    assert!(result.is_ok());
    assert!(analyser.errors().iter().any(|d| matches!(
        &d.kind,
        DiagnosticKind::NotSupportedOperation { description } if description == "Multiple variable assignments"
    )));
}

/// Tuple-unpacking assignment targets are, unlike the plain multi-target
/// case above, a fatal sentinel (`spec.md` §9).
#[test]
fn tuple_unpack_assignment_is_fatal_by_default() {
    let mut module = vec![Statement::Assignment {
        targets: vec![AssignTarget::Tuple(
            vec![
                AssignTarget::Name("a".to_string(), pos(1, 0)),
                AssignTarget::Name("b".to_string(), pos(1, 2)),
            ],
            pos(1, 0),
        )],
        value: Expression::Tuple {
            elements: vec![],
            position: pos(1, 8),
        },
        position: pos(1, 0),
    }];
    let mut analyser = Analyser::new(
        SymbolTable::default(),
        SymbolTable::default(),
        AnalyserOptions::default(),
    );
    assert!(analyser.check_module(&mut module).is_err());
}

/// Idempotent re-analysis: an already-rewritten operator slot is accepted
/// as-is and produces no new diagnostics.
#[test]
fn rerunning_on_an_already_rewritten_ast_is_a_no_op() {
    let globals = globals_with_method("f", vec![Type::Integer, Type::Integer], Type::Integer, &["a", "b"]);

    let mut module = vec![function(
        "f",
        vec![
            typed_arg("a", Type::Integer, 1, 6),
            typed_arg("b", Type::Integer, 1, 14),
        ],
        vec![Statement::Return {
            value: Some(Expression::BinaryOp {
                op: OperatorSlot::syntactic(Operator::Plus),
                left: Box::new(name("a", 1, 34)),
                right: Box::new(name("b", 1, 38)),
                position: pos(1, 34),
            }),
            position: pos(1, 27),
        }],
    )];

    let mut first = Analyser::new(globals.clone(), SymbolTable::default(), AnalyserOptions::default());
    first.check_module(&mut module).unwrap();
    assert!(!first.has_errors());

    let mut second = Analyser::new(globals, SymbolTable::default(), AnalyserOptions::default());
    second.check_module(&mut module).unwrap();
    assert!(!second.has_errors());
}
