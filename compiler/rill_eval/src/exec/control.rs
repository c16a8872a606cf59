//! Branches, loops, switch and flow statements.
//!
//! Each loop owns a loop context living for the whole loop (holding `for`
//! initializers or the `foreach` iteration contexts), and the body block
//! opens a fresh child per iteration. Per-iteration signals:
//!
//! - `Nominal` / `LoopContinue`: next iteration (after the `for` increments)
//! - `LoopBreak`: leave the loop, yielding `Nominal`
//! - `Return`: leave the loop, re-propagating `Return`

use rill_ir::ast::{
    ControlKind, ControlStatement, ForEachLoop, ForLoop, IfStatement, ReturnStatement,
    SwitchStatement, WhileLoop,
};
use rill_ir::{Literal, PrimitiveKind, Value};
use tracing::trace;

use super::expr::apply_conversion;
use super::{run_nominal, Execute};
use crate::environment::RuntimeScope;
use crate::errors::{type_mismatch, EvalResult};
use crate::flow::FlowState;
use crate::interpreter::Interpreter;

/// What a loop does after one body execution.
enum Step {
    Next,
    Exit(FlowState),
}

fn step(flow: FlowState) -> Step {
    match flow {
        FlowState::Nominal | FlowState::LoopContinue => Step::Next,
        FlowState::LoopBreak => Step::Exit(FlowState::Nominal),
        FlowState::Return => Step::Exit(FlowState::Return),
    }
}

impl Execute for IfStatement {
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        for branch in &self.branches {
            if interp.eval_bool(&branch.condition, scope)? {
                return branch.body.execute(scope, interp);
            }
        }
        match &self.otherwise {
            Some(block) => block.execute(scope, interp),
            None => Ok(FlowState::Nominal),
        }
    }
}

impl Execute for WhileLoop {
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        let loop_scope = scope.child();
        loop {
            interp.check_cancelled()?;
            if !interp.eval_bool(&self.condition, &loop_scope)? {
                return Ok(FlowState::Nominal);
            }
            if let Step::Exit(flow) = step(self.body.execute(&loop_scope, interp)?) {
                trace!(%flow, "while exited");
                return Ok(flow);
            }
        }
    }
}

impl Execute for ForLoop {
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        let loop_scope = scope.child();
        for init in &self.initializers {
            run_nominal(init, &loop_scope, interp, "for initializer")?;
        }
        loop {
            interp.check_cancelled()?;
            if let Some(condition) = &self.condition {
                if !interp.eval_bool(condition, &loop_scope)? {
                    return Ok(FlowState::Nominal);
                }
            }
            if let Step::Exit(flow) = step(self.body.execute(&loop_scope, interp)?) {
                trace!(%flow, "for exited");
                return Ok(flow);
            }
            for increment in &self.increments {
                run_nominal(increment, &loop_scope, interp, "for increment")?;
            }
        }
    }
}

impl Execute for ForEachLoop {
    /// The container is evaluated once and its elements snapshotted, so the
    /// body may modify the list without affecting the iteration.
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        let container = interp.eval(&self.container, scope)?;
        let items: Vec<Value> = match &container {
            Value::List(list) => list.snapshot(),
            Value::Str(text) => text
                .encode_utf16()
                .map(|unit| Value::from_i128(PrimitiveKind::Char, i128::from(unit)))
                .collect(),
            other => return Err(type_mismatch("an enumerable value", other.type_name())),
        };

        let loop_scope = scope.child();
        for item in items {
            interp.check_cancelled()?;
            let iteration = loop_scope.child();
            let value = apply_conversion(item, self.conversion)?;
            interp.declare(&iteration, self.variable, value, &self.variable_ty)?;
            if let Step::Exit(flow) = step(self.body.execute(&iteration, interp)?) {
                trace!(%flow, "foreach exited");
                return Ok(flow);
            }
        }
        Ok(FlowState::Nominal)
    }
}

impl Execute for SwitchStatement {
    /// Labels match by exact kind: `case 1:` never matches a `long` subject
    /// because the parser already converted every label to the subject's
    /// type.
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        let subject = interp.eval(&self.subject, scope)?;
        let Some(label) = Literal::from_value(&subject) else {
            return Err(type_mismatch("a switchable value", subject.type_name()));
        };
        let Some(section) = self.section_for(&label) else {
            return Ok(FlowState::Nominal);
        };
        match section.execute(scope, interp)? {
            FlowState::LoopBreak => Ok(FlowState::Nominal),
            flow => Ok(flow),
        }
    }
}

impl Execute for ControlStatement {
    fn execute(&self, _scope: &RuntimeScope, _interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        Ok(match self.kind {
            ControlKind::Break => FlowState::LoopBreak,
            ControlKind::Continue => FlowState::LoopContinue,
        })
    }
}

impl Execute for ReturnStatement {
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        let value = match &self.value {
            Some(expr) => {
                let value = interp.eval(expr, scope)?;
                apply_conversion(value, self.conversion)?
            }
            None => Value::Void,
        };
        interp.set_return(value);
        Ok(FlowState::Return)
    }
}
