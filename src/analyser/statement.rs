//! Statement visitors (`spec.md` §4.5). Unlike expression visitors these
//! return `Result<(), FatalSentinel>` -- a [`Unwind`](crate::diagnostics::Unwind)
//! from a nested expression is swallowed here (the diagnostic is already on
//! the sink), only a [`FatalSentinel`] propagates further.

use super::{Analyser, FatalSentinel};
use crate::ast::{AssignTarget, Expression, Statement};
use crate::diagnostics::DiagnosticKind;
use crate::position::Position;
use crate::types::Type;

impl Analyser {
    pub(crate) fn visit_block(&mut self, statements: &mut [Statement]) -> Result<(), FatalSentinel> {
        for statement in statements.iter_mut() {
            self.visit_statement(statement)?;
        }
        Ok(())
    }

    fn visit_statement(&mut self, statement: &mut Statement) -> Result<(), FatalSentinel> {
        log::trace!("visiting statement at {}", statement.position());
        match statement {
            Statement::FunctionDef {
                name,
                args,
                body,
                position,
            } => self.visit_function_def(name, args, body, *position),
            Statement::Return { value, position } => self.visit_return(value, *position),
            Statement::Assignment {
                targets,
                value,
                position,
            } => self.visit_assignment(targets, value, *position),
            Statement::While {
                test,
                body,
                orelse,
                position,
            } => self.visit_while(test, body, orelse, *position),
            Statement::If {
                test,
                body,
                orelse,
                position,
            } => self.visit_if(test, body, orelse, *position),
            Statement::Break(position) => self.fatal_or_downgrade("break", *position),
            Statement::Continue(position) => self.fatal_or_downgrade("continue", *position),
        }
    }

    /// Missing argument annotations are logged but do not stop the walk
    /// (`spec.md` §4.5 "Arguments / single argument"); the method body is
    /// then walked with `current_method` set so locals resolve against it.
    fn visit_function_def(
        &mut self,
        name: &str,
        args: &mut [crate::ast::Argument],
        body: &mut [Statement],
        _position: Position,
    ) -> Result<(), FatalSentinel> {
        log::trace!("entering function '{name}'");
        for arg in args.iter() {
            if arg.annotation.is_none() {
                self.sink.log_error(
                    DiagnosticKind::TypeHintMissing {
                        symbol_id: arg.name.clone(),
                    },
                    arg.position,
                );
            }
        }

        self.resolver.enter_method(name.to_string());
        let result = self.visit_block(body);
        self.resolver.exit_method();
        log::trace!("leaving function '{name}'");
        result
    }

    /// Three-way branch on the declared return type versus what is actually
    /// returned (`spec.md` §4.5 "Return"). A bad return value's subtree is
    /// not walked any further -- matching the source, which returns early
    /// for the `TooManyReturns`/`TypeHintMissing` cases rather than falling
    /// through to a generic child walk.
    fn visit_return(
        &mut self,
        value: &mut Option<Expression>,
        position: Position,
    ) -> Result<(), FatalSentinel> {
        let declared_return = self
            .resolver
            .current_method()
            .expect("Return only ever appears inside a function body")
            .return_type
            .clone();

        match value {
            Some(Expression::Tuple { .. }) => {
                self.sink.log_error(DiagnosticKind::TooManyReturns, position);
            }
            Some(expr) => {
                if declared_return == Type::NoneType {
                    let method_name = self
                        .resolver
                        .current_method_name()
                        .expect("current_method_name is set while inside a function body")
                        .to_string();
                    self.sink.log_error(
                        DiagnosticKind::TypeHintMissing {
                            symbol_id: method_name,
                        },
                        position,
                    );
                } else {
                    // TODO: compare the returned expression's resolved type
                    // against `declared_return` once the lattice supports
                    // comparing a value's inferred type to a declared
                    // annotation type symmetrically.
                    let _ = self.visit_expression(expr);
                }
            }
            None => {
                if declared_return != Type::NoneType {
                    self.sink.log_error(
                        DiagnosticKind::MismatchedTypes {
                            actual: Type::NoneType,
                            expected: declared_return,
                        },
                        position,
                    );
                }
            }
        }
        Ok(())
    }

    /// Multi-target assignment (`a = b = c`) is an ordinary, recoverable
    /// diagnostic; a tuple-unpacking target is a fatal sentinel (`spec.md`
    /// §9 groups nested tuple-unpack assignment with `elif`/`break`/
    /// `continue`). The assigned value is still walked afterwards regardless
    /// of either check, mirroring the source's unconditional child walk.
    fn visit_assignment(
        &mut self,
        targets: &mut [AssignTarget],
        value: &mut Expression,
        position: Position,
    ) -> Result<(), FatalSentinel> {
        if targets.len() > 1 {
            self.sink.log_error(
                DiagnosticKind::NotSupportedOperation {
                    description: "Multiple variable assignments".to_string(),
                },
                position,
            );
        }

        if targets.iter().any(|target| matches!(target, AssignTarget::Tuple(..))) {
            self.fatal_or_downgrade("nested tuple-unpack assignment", position)?;
        }

        let _ = self.visit_expression(value);
        Ok(())
    }

    fn visit_while(
        &mut self,
        test: &mut Expression,
        body: &mut [Statement],
        orelse: &mut [Statement],
        position: Position,
    ) -> Result<(), FatalSentinel> {
        let _ = self.check_test_is_bool(test, position);
        self.visit_block(body)?;
        self.visit_block(orelse)
    }

    /// A single `elif` is represented as an `If` node nested alone in
    /// `orelse` -- this subset does not accept it and treats it as a fatal
    /// sentinel by default (`spec.md` §9).
    fn visit_if(
        &mut self,
        test: &mut Expression,
        body: &mut [Statement],
        orelse: &mut [Statement],
        position: Position,
    ) -> Result<(), FatalSentinel> {
        let _ = self.check_test_is_bool(test, position);
        self.visit_block(body)?;

        if let [Statement::If { position: elif_position, .. }] = orelse {
            self.fatal_or_downgrade("elif", *elif_position)?;
        }

        self.visit_block(orelse)
    }
}
