//! Declarations, assignment and in-place operations.
//!
//! Assignments resolve their place once: for `list[i] op= v` the list and
//! index are evaluated before the operand, and the same element is read and
//! written.

use rill_ir::ast::{
    Assignment, BooleanInPlaceOperation, Declaration, DeclarationAssignment, ExternDeclaration,
    GlobalDeclaration, InPlacePlan, NumericInPlaceOperation, StringConcatAssignment,
};
use rill_ir::{LogicalAssignOp, Value};
use tracing::debug;

use super::expr::apply_conversion;
use super::Execute;
use crate::environment::RuntimeScope;
use crate::errors::{extern_missing, host_operator_failed, type_mismatch, EvalResult};
use crate::flow::FlowState;
use crate::interpreter::{coerce_host_value, Interpreter};
use crate::operators::apply_plan;
use crate::persistence::PersistedValue;

impl Execute for Declaration {
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        interp.declare(scope, self.name, self.ty.default_value(), &self.ty)?;
        Ok(FlowState::Nominal)
    }
}

impl Execute for DeclarationAssignment {
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        let value = interp.eval(&self.value, scope)?;
        let value = apply_conversion(value, self.conversion)?;
        interp.declare(scope, self.name, value, &self.ty)?;
        Ok(FlowState::Nominal)
    }
}

impl Execute for Assignment {
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        let slot = interp.resolve_place(&self.target, scope)?;
        let value = interp.eval(&self.value, scope)?;
        let value = apply_conversion(value, self.conversion)?;
        interp.write_slot(&slot, scope, value)?;
        Ok(FlowState::Nominal)
    }
}

impl Execute for NumericInPlaceOperation {
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        let slot = interp.resolve_place(&self.target, scope)?;
        let current = interp.read_slot(&slot, scope)?;
        let operand = interp.eval(&self.operand, scope)?;
        let result = match &self.plan {
            InPlacePlan::Primitive(plan) => apply_plan(plan, &current, &operand)?,
            InPlacePlan::Host(resolved) => resolved
                .operator
                .apply(&current, &operand)
                .map_err(|err| host_operator_failed(self.op.binary_op().method_name(), err))?,
        };
        interp.write_slot(&slot, scope, result)?;
        Ok(FlowState::Nominal)
    }
}

impl Execute for BooleanInPlaceOperation {
    /// The operand is neither evaluated nor assigned once the current value
    /// decides the result.
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        let slot = interp.resolve_place(&self.target, scope)?;
        let current = interp.read_slot(&slot, scope)?;
        let Some(current) = current.as_bool() else {
            return Err(type_mismatch("bool", current.type_name()));
        };
        let decided = match self.op {
            LogicalAssignOp::AndAlso => !current,
            LogicalAssignOp::OrElse => current,
        };
        if !decided {
            let operand = interp.eval_bool(&self.operand, scope)?;
            interp.write_slot(&slot, scope, Value::Bool(operand))?;
        }
        Ok(FlowState::Nominal)
    }
}

impl Execute for StringConcatAssignment {
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        let slot = interp.resolve_place(&self.target, scope)?;
        let current = interp.read_slot(&slot, scope)?;
        let Some(text) = current.as_str() else {
            return Err(type_mismatch("string", current.type_name()));
        };
        let operand = interp.eval(&self.operand, scope)?;
        let joined = Value::string(format!("{text}{operand}"));
        interp.write_slot(&slot, scope, joined)?;
        Ok(FlowState::Nominal)
    }
}

impl Execute for GlobalDeclaration {
    /// Loads the persisted value when the store has one of the right shape;
    /// otherwise uses the initializer and writes it back.
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        let key = interp.name_text(self.name);
        let store = interp.store();
        let loaded = store
            .as_ref()
            .and_then(|store| store.get(key))
            .and_then(|persisted| persisted.to_value(&self.ty));

        let value = if let Some(value) = loaded {
            debug!(global = key, "loaded persisted value");
            value
        } else {
            let initial = match &self.default {
                Some(expr) => {
                    let value = interp.eval(expr, scope)?;
                    apply_conversion(value, self.conversion)?
                }
                None => self.ty.default_value(),
            };
            if let (Some(store), Some(persisted)) = (&store, PersistedValue::from_value(&initial)) {
                store.set(key, persisted);
            }
            initial
        };

        interp.declare(scope, self.name, value, &self.ty)?;
        interp.register_global(self.name, self.ty.clone());
        Ok(FlowState::Nominal)
    }
}

impl Execute for ExternDeclaration {
    fn execute(&self, scope: &RuntimeScope, interp: &mut Interpreter<'_>) -> EvalResult<FlowState> {
        let key = interp.name_text(self.name);
        let value = match interp.extern_value(key) {
            Some(supplied) => coerce_host_value(supplied, &self.ty)?,
            None => match &self.default {
                Some(expr) => {
                    let value = interp.eval(expr, scope)?;
                    apply_conversion(value, self.conversion)?
                }
                None => return Err(extern_missing(key)),
            },
        };
        interp.declare(scope, self.name, value, &self.ty)?;
        Ok(FlowState::Nominal)
    }
}
