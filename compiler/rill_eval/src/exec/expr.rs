//! Expression evaluation.
//!
//! Expressions arrive fully typed: every promotion is an explicit
//! `Convert` node and every host operator is already resolved, so
//! evaluation never inspects static types.

use rill_ir::ast::{Conversion, Expr, ExprKind, ListMethod, Place};
use rill_ir::{BinaryOp, ListValue, Name, PrimitiveKind, Value};
use rill_stack::ensure_sufficient_stack;

use crate::environment::RuntimeScope;
use crate::errors::{
    host_operator_failed, index_out_of_bounds, type_mismatch, undefined_function,
    undefined_variable, EvalResult,
};
use crate::interpreter::Interpreter;
use crate::operators::{convert, evaluate_binary, evaluate_math, evaluate_unary};

/// A resolved assignment target.
pub(crate) enum Slot {
    Local(Name),
    Element { list: ListValue, index: usize },
}

impl<'a> Interpreter<'a> {
    /// Evaluate `expr`, attaching its span to any error raised inside it.
    pub(crate) fn eval(&mut self, expr: &Expr, scope: &RuntimeScope) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_kind(expr, scope)).map_err(|err| err.with_span(expr.span))
    }

    pub(crate) fn eval_bool(&mut self, expr: &Expr, scope: &RuntimeScope) -> EvalResult<bool> {
        let value = self.eval(expr, scope)?;
        value
            .as_bool()
            .ok_or_else(|| type_mismatch("bool", value.type_name()).with_span(expr.span))
    }

    fn eval_all(&mut self, exprs: &[Expr], scope: &RuntimeScope) -> EvalResult<Vec<Value>> {
        exprs.iter().map(|expr| self.eval(expr, scope)).collect()
    }

    fn eval_kind(&mut self, expr: &Expr, scope: &RuntimeScope) -> EvalResult {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(literal.to_value()),
            ExprKind::Local(name) => self.lookup(*name, scope),
            ExprKind::Unary { op, operand } => {
                let value = self.eval(operand, scope)?;
                evaluate_unary(*op, &value)
            }
            ExprKind::Binary {
                op: op @ (BinaryOp::And | BinaryOp::Or),
                lhs,
                rhs,
            } => {
                let left = self.eval_bool(lhs, scope)?;
                let short_circuits = if *op == BinaryOp::And { !left } else { left };
                if short_circuits {
                    Ok(Value::Bool(left))
                } else {
                    self.eval_bool(rhs, scope).map(Value::Bool)
                }
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let left = self.eval(lhs, scope)?;
                let right = self.eval(rhs, scope)?;
                evaluate_binary(*op, &left, &right)
            }
            ExprKind::HostBinary {
                op,
                operator,
                lhs,
                rhs,
            } => {
                let left = self.eval(lhs, scope)?;
                let right = self.eval(rhs, scope)?;
                operator
                    .operator
                    .apply(&left, &right)
                    .map_err(|err| host_operator_failed(op.method_name(), err))
            }
            ExprKind::Concat { lhs, rhs } => {
                let left = self.eval(lhs, scope)?;
                let right = self.eval(rhs, scope)?;
                Ok(Value::string(format!("{left}{right}")))
            }
            ExprKind::Equality { negated, lhs, rhs } => {
                let left = self.eval(lhs, scope)?;
                let right = self.eval(rhs, scope)?;
                Ok(Value::Bool((left == right) != *negated))
            }
            ExprKind::Conditional {
                cond,
                then,
                otherwise,
            } => {
                if self.eval_bool(cond, scope)? {
                    self.eval(then, scope)
                } else {
                    self.eval(otherwise, scope)
                }
            }
            ExprKind::Convert { to, operand } => {
                let value = self.eval(operand, scope)?;
                convert(&value, *to)
            }
            ExprKind::Call { function, args } => {
                let args = self.eval_all(args, scope)?;
                let script = self.script();
                let decl = script
                    .function(*function)
                    .ok_or_else(|| undefined_function(self.name_text(*function)))?;
                self.call_function(decl, args, Some(expr.span))
            }
            ExprKind::Print(operand) => {
                let value = self.eval(operand, scope)?;
                self.print_handler().println(&value.to_string());
                Ok(Value::Void)
            }
            ExprKind::Math { func, args } => {
                let args = self.eval_all(args, scope)?;
                evaluate_math(*func, &args)
            }
            ExprKind::NewList { items } => self.eval_all(items, scope).map(Value::list),
            ExprKind::Index { target, index } => {
                let target = self.eval(target, scope)?;
                let index = self.eval(index, scope)?;
                match &target {
                    Value::List(list) => {
                        let position = element_index(&index, list.len())?;
                        list.get(position)
                            .ok_or_else(|| index_out_of_bounds(to_i64(position), list.len()))
                    }
                    Value::Str(text) => {
                        let len = text.encode_utf16().count();
                        let position = element_index(&index, len)?;
                        text.encode_utf16()
                            .nth(position)
                            .map(|unit| Value::from_i128(PrimitiveKind::Char, i128::from(unit)))
                            .ok_or_else(|| index_out_of_bounds(to_i64(position), len))
                    }
                    other => Err(type_mismatch("a list or string", other.type_name())),
                }
            }
            ExprKind::Length(target) => {
                let len = match self.eval(target, scope)? {
                    Value::List(list) => list.len(),
                    Value::Str(text) => text.encode_utf16().count(),
                    other => return Err(type_mismatch("a list or string", other.type_name())),
                };
                Ok(Value::Int(i32::try_from(len).unwrap_or(i32::MAX)))
            }
            ExprKind::ListMethod {
                receiver,
                method,
                args,
            } => {
                let receiver = self.eval(receiver, scope)?;
                let Value::List(list) = &receiver else {
                    return Err(type_mismatch("a list", receiver.type_name()));
                };
                let mut args = self.eval_all(args, scope)?.into_iter();
                match (method, args.next()) {
                    (ListMethod::Add, Some(item)) => {
                        list.push(item);
                        Ok(Value::Void)
                    }
                    (ListMethod::Contains, Some(item)) => Ok(Value::Bool(list.contains(&item))),
                    (ListMethod::Clear, _) => {
                        list.clear();
                        Ok(Value::Void)
                    }
                    (ListMethod::Add | ListMethod::Contains, None) => Err(type_mismatch(
                        "an element argument",
                        "no arguments",
                    )),
                }
            }
        }
    }

    fn lookup(&self, name: Name, scope: &RuntimeScope) -> EvalResult {
        scope
            .borrow()
            .lookup(name)
            .ok_or_else(|| undefined_variable(self.name_text(name)))
    }

    /// Evaluate an assignment target's list and index, once.
    pub(crate) fn resolve_place(&mut self, place: &Place, scope: &RuntimeScope) -> EvalResult<Slot> {
        match place {
            Place::Local(name) => Ok(Slot::Local(*name)),
            Place::Index { list, index } => {
                let target = self.eval(list, scope)?;
                let index = self.eval(index, scope)?;
                let Value::List(list) = &target else {
                    return Err(type_mismatch("a list", target.type_name()));
                };
                let index = element_index(&index, list.len())?;
                Ok(Slot::Element {
                    list: list.clone(),
                    index,
                })
            }
        }
    }

    pub(crate) fn read_slot(&self, slot: &Slot, scope: &RuntimeScope) -> EvalResult {
        match slot {
            Slot::Local(name) => self.lookup(*name, scope),
            Slot::Element { list, index } => list
                .get(*index)
                .ok_or_else(|| index_out_of_bounds(to_i64(*index), list.len())),
        }
    }

    pub(crate) fn write_slot(&self, slot: &Slot, scope: &RuntimeScope, value: Value) -> EvalResult<()> {
        match slot {
            Slot::Local(name) => {
                let result = scope.borrow_mut().assign(*name, value);
                result.map_err(|err| self.binding_error(err, *name))
            }
            Slot::Element { list, index } => {
                if list.set(*index, value) {
                    Ok(())
                } else {
                    Err(index_out_of_bounds(to_i64(*index), list.len()))
                }
            }
        }
    }
}

/// Apply a store conversion. Runs exactly once per stored value.
pub(crate) fn apply_conversion(value: Value, conversion: Conversion) -> EvalResult {
    match conversion {
        Conversion::Identity => Ok(value),
        Conversion::Numeric(kind) => convert(&value, kind),
    }
}

/// Validate an `int` index against a length.
fn element_index(index: &Value, len: usize) -> EvalResult<usize> {
    let Some(raw) = index.as_i128() else {
        return Err(type_mismatch("int", index.type_name()));
    };
    match usize::try_from(raw) {
        Ok(position) if position < len => Ok(position),
        _ => Err(index_out_of_bounds(
            i64::try_from(raw).unwrap_or(i64::MIN),
            len,
        )),
    }
}

fn to_i64(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}
