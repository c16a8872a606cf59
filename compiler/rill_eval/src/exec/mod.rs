//! Statement execution.
//!
//! Every statement node implements [`Execute`], returning the
//! [`FlowState`] its enclosing construct must act on:
//!
//! - `control`: if, loops, switch, break/continue, return
//! - `assign`: declarations, assignment and in-place operations
//! - `expr`: expression evaluation, used by both

mod assign;
mod control;
mod expr;

use rill_ir::ast::{Block, ExpressionStatement, MultiStatement, Stmt};
use rill_ir::Spanned;
use rill_stack::ensure_sufficient_stack;

use crate::environment::RuntimeScope;
use crate::errors::{unexpected_flow, EvalResult};
use crate::flow::FlowState;
use crate::interpreter::Interpreter;

/// A node that runs against a runtime context.
///
/// Nodes hold no mutable state, so one tree may execute any number of times
/// and from several independent chains.
pub trait Execute {
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState>;
}

impl Execute for Stmt {
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        let result = match self {
            Stmt::Block(s) => s.execute(scope, interp),
            Stmt::If(s) => s.execute(scope, interp),
            Stmt::While(s) => s.execute(scope, interp),
            Stmt::For(s) => s.execute(scope, interp),
            Stmt::ForEach(s) => s.execute(scope, interp),
            Stmt::Switch(s) => s.execute(scope, interp),
            Stmt::Declaration(s) => s.execute(scope, interp),
            Stmt::DeclarationAssignment(s) => s.execute(scope, interp),
            Stmt::Assignment(s) => s.execute(scope, interp),
            Stmt::NumericInPlace(s) => s.execute(scope, interp),
            Stmt::BooleanInPlace(s) => s.execute(scope, interp),
            Stmt::StringConcat(s) => s.execute(scope, interp),
            Stmt::Control(s) => s.execute(scope, interp),
            Stmt::Return(s) => s.execute(scope, interp),
            Stmt::Multi(s) => s.execute(scope, interp),
            Stmt::Expression(s) => s.execute(scope, interp),
            Stmt::Global(s) => s.execute(scope, interp),
            Stmt::Extern(s) => s.execute(scope, interp),
        };
        result.map_err(|err| err.with_span(self.span()))
    }
}

impl Execute for Block {
    /// Runs the statements in one fresh child context, stopping at the
    /// first non-nominal signal.
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        interp.check_cancelled()?;
        let inner = scope.child();
        ensure_sufficient_stack(|| {
            for stmt in &self.statements {
                let flow = stmt.execute(&inner, interp)?;
                if !flow.is_nominal() {
                    return Ok(flow);
                }
            }
            Ok(FlowState::Nominal)
        })
    }
}

impl Execute for MultiStatement {
    /// Runs in the enclosing context: `int a = 1, b = a;` declares both
    /// names alongside their neighbours.
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        for stmt in &self.statements {
            interp.check_cancelled()?;
            let flow = stmt.execute(scope, interp)?;
            if !flow.is_nominal() {
                return Ok(flow);
            }
        }
        Ok(FlowState::Nominal)
    }
}

impl Execute for ExpressionStatement {
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        interp.eval(&self.expr, scope)?;
        Ok(FlowState::Nominal)
    }
}

/// Run a statement that must complete normally, such as a `for`
/// initializer or increment.
fn run_nominal(
    stmt: &Stmt,
    scope: &RuntimeScope,
    interp: &mut Interpreter<'_>,
    context: &'static str,
) -> EvalResult<()> {
    match stmt.execute(scope, interp)? {
        FlowState::Nominal => Ok(()),
        flow => Err(unexpected_flow(flow, context)),
    }
}
