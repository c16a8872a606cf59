//! Primitive arithmetic.
//!
//! Operands reaching these functions already share one kind: the parser
//! inserted every promotion and the coercion table decided every widening.
//! Integral results wrap to the target width; integral `/` and `%` by zero
//! fail; shift counts are masked to the operand width.

use std::cmp::Ordering;

use rill_ir::ast::MathFn;
use rill_ir::{ArithOp, BinaryOp, PrimitiveKind, PrimitivePlan, UnaryOp, Value};

use crate::errors::{division_by_zero, invalid_operation, type_mismatch, EvalResult};

/// Apply a resolved compound assignment to the current value of the place.
pub fn apply_plan(plan: &PrimitivePlan, current: &Value, operand: &Value) -> EvalResult {
    if plan.widen {
        let widened = convert(operand, plan.operand)?;
        apply_arith(plan.op, plan.target, current, &widened)
    } else {
        apply_arith(plan.op, plan.target, current, operand)
    }
}

/// Explicit or implicit primitive conversion.
pub fn convert(value: &Value, kind: PrimitiveKind) -> EvalResult {
    value
        .convert(kind)
        .ok_or_else(|| type_mismatch(kind, value.type_name()))
}

/// Evaluate a non-short-circuit binary operator on two primitives.
pub fn evaluate_binary(op: BinaryOp, lhs: &Value, rhs: &Value) -> EvalResult {
    let Some(kind) = lhs.kind() else {
        return Err(invalid_operation(op.as_symbol(), lhs.type_name()));
    };
    let arith = match op {
        BinaryOp::Add => ArithOp::Add,
        BinaryOp::Sub => ArithOp::Sub,
        BinaryOp::Mul => ArithOp::Mul,
        BinaryOp::Div => ArithOp::Div,
        BinaryOp::Rem => ArithOp::Rem,
        BinaryOp::Shl => ArithOp::Shl,
        BinaryOp::Shr => ArithOp::Shr,
        BinaryOp::BitAnd | BinaryOp::And => ArithOp::And,
        BinaryOp::BitOr | BinaryOp::Or => ArithOp::Or,
        BinaryOp::BitXor => ArithOp::Xor,
        BinaryOp::Eq
        | BinaryOp::NotEq
        | BinaryOp::Lt
        | BinaryOp::LtEq
        | BinaryOp::Gt
        | BinaryOp::GtEq => return compare(op, lhs, rhs).map(Value::Bool),
    };
    apply_arith(arith, kind, lhs, rhs)
}

pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    let invalid = || invalid_operation(op.as_symbol(), operand.type_name());
    let kind = operand.kind().ok_or_else(invalid)?;
    match op {
        UnaryOp::Not => operand.as_bool().map(|b| Value::Bool(!b)).ok_or_else(invalid),
        UnaryOp::Neg if kind.is_float() => operand
            .as_f64()
            .map(|v| Value::from_f64(kind, -v))
            .ok_or_else(invalid),
        UnaryOp::Neg if kind.is_integral() => operand
            .as_i128()
            .map(|v| Value::from_i128(kind, v.wrapping_neg()))
            .ok_or_else(invalid),
        UnaryOp::BitNot if kind.is_integral() => operand
            .as_i128()
            .map(|v| Value::from_i128(kind, !v))
            .ok_or_else(invalid),
        UnaryOp::Neg | UnaryOp::BitNot => Err(invalid()),
    }
}

/// `Math.F(args)`. Arguments already have the result kind.
pub fn evaluate_math(func: MathFn, args: &[Value]) -> EvalResult {
    let name = match func {
        MathFn::Abs => "Math.Abs",
        MathFn::Min => "Math.Min",
        MathFn::Max => "Math.Max",
        MathFn::Pow => "Math.Pow",
        MathFn::Sqrt => "Math.Sqrt",
        MathFn::Floor => "Math.Floor",
        MathFn::Ceiling => "Math.Ceiling",
    };
    let first = args.first().ok_or_else(|| invalid_operation(name, "no arguments"))?;
    let kind = first
        .kind()
        .ok_or_else(|| invalid_operation(name, first.type_name()))?;
    let float = |v: &Value| v.as_f64().ok_or_else(|| type_mismatch(kind, v.type_name()));
    let second = || {
        args.get(1)
            .ok_or_else(|| invalid_operation(name, "a missing argument"))
    };

    match func {
        MathFn::Abs if kind.is_integral() => first
            .as_i128()
            .map(|v| Value::from_i128(kind, v.wrapping_abs()))
            .ok_or_else(|| type_mismatch(kind, first.type_name())),
        MathFn::Abs => Ok(Value::from_f64(kind, float(first)?.abs())),
        MathFn::Min | MathFn::Max => {
            let other = second()?;
            let ordering = ordering(first, other)?;
            let pick_first = match (func, ordering) {
                // NaN wins either way.
                (_, None) => first.as_f64().is_some_and(f64::is_nan),
                (MathFn::Min, Some(ord)) => ord != Ordering::Greater,
                (_, Some(ord)) => ord != Ordering::Less,
            };
            Ok(if pick_first { first.clone() } else { other.clone() })
        }
        MathFn::Pow => Ok(Value::Double(float(first)?.powf(float(second()?)?))),
        MathFn::Sqrt => Ok(Value::Double(float(first)?.sqrt())),
        MathFn::Floor => Ok(Value::Double(float(first)?.floor())),
        MathFn::Ceiling => Ok(Value::Double(float(first)?.ceil())),
    }
}

fn compare(op: BinaryOp, lhs: &Value, rhs: &Value) -> EvalResult<bool> {
    match op {
        BinaryOp::Eq => Ok(lhs == rhs),
        BinaryOp::NotEq => Ok(lhs != rhs),
        _ => {
            let ord = ordering(lhs, rhs)?;
            Ok(match op {
                BinaryOp::Lt => ord == Some(Ordering::Less),
                BinaryOp::LtEq => matches!(ord, Some(Ordering::Less | Ordering::Equal)),
                BinaryOp::Gt => ord == Some(Ordering::Greater),
                BinaryOp::GtEq => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
                _ => false,
            })
        }
    }
}

/// Numeric ordering; `None` when either side is NaN.
fn ordering(lhs: &Value, rhs: &Value) -> EvalResult<Option<Ordering>> {
    if let (Some(a), Some(b)) = (lhs.as_i128(), rhs.as_i128()) {
        return Ok(Some(a.cmp(&b)));
    }
    match (lhs.as_f64(), rhs.as_f64()) {
        (Some(a), Some(b)) => Ok(a.partial_cmp(&b)),
        _ => Err(invalid_operation("<", lhs.type_name())),
    }
}

fn apply_arith(op: ArithOp, kind: PrimitiveKind, lhs: &Value, rhs: &Value) -> EvalResult {
    let symbol = arith_symbol(op);
    if kind == PrimitiveKind::Bool {
        let (Some(a), Some(b)) = (lhs.as_bool(), rhs.as_bool()) else {
            return Err(type_mismatch("bool", mismatched(lhs, rhs, Value::as_bool)));
        };
        return match op {
            ArithOp::Xor => Ok(Value::Bool(a ^ b)),
            ArithOp::And => Ok(Value::Bool(a & b)),
            ArithOp::Or => Ok(Value::Bool(a | b)),
            _ => Err(invalid_operation(symbol, "bool")),
        };
    }

    if kind.is_float() {
        let (Some(a), Some(b)) = (lhs.as_f64(), rhs.as_f64()) else {
            return Err(type_mismatch(kind, mismatched(lhs, rhs, Value::as_f64)));
        };
        let result = match op {
            ArithOp::Add => a + b,
            ArithOp::Sub => a - b,
            ArithOp::Mul => a * b,
            ArithOp::Div => a / b,
            ArithOp::Rem => a % b,
            ArithOp::Pow => a.powf(b),
            ArithOp::Shl | ArithOp::Shr | ArithOp::Xor | ArithOp::And | ArithOp::Or => {
                return Err(invalid_operation(symbol, kind));
            }
        };
        return Ok(Value::from_f64(kind, result));
    }

    let (Some(a), Some(b)) = (lhs.as_i128(), rhs.as_i128()) else {
        return Err(type_mismatch(kind, mismatched(lhs, rhs, Value::as_i128)));
    };
    let result = match op {
        ArithOp::Add => a.wrapping_add(b),
        ArithOp::Sub => a.wrapping_sub(b),
        ArithOp::Mul => a.wrapping_mul(b),
        ArithOp::Div if b == 0 => return Err(division_by_zero()),
        ArithOp::Div => a.wrapping_div(b),
        ArithOp::Rem if b == 0 => return Err(division_by_zero()),
        ArithOp::Rem => a.wrapping_rem(b),
        ArithOp::Shl => a.wrapping_shl(shift_count(kind, b)),
        ArithOp::Shr => a.wrapping_shr(shift_count(kind, b)),
        ArithOp::Xor => a ^ b,
        ArithOp::And => a & b,
        ArithOp::Or => a | b,
        ArithOp::Pow => return Err(invalid_operation(symbol, kind)),
    };
    Ok(Value::from_i128(kind, result))
}

/// Shift count masked to 5 bits, or 6 bits for 64-bit operands.
fn shift_count(kind: PrimitiveKind, count: i128) -> u32 {
    let mask = if kind.bits() == 64 { 63 } else { 31 };
    u32::try_from(count & mask).unwrap_or(0)
}

/// Type name of whichever operand failed `view`.
fn mismatched<T>(lhs: &Value, rhs: &Value, view: fn(&Value) -> Option<T>) -> String {
    if view(lhs).is_none() {
        lhs.type_name()
    } else {
        rhs.type_name()
    }
}

fn arith_symbol(op: ArithOp) -> &'static str {
    match op {
        ArithOp::Add => "+",
        ArithOp::Sub => "-",
        ArithOp::Mul => "*",
        ArithOp::Div => "/",
        ArithOp::Rem => "%",
        ArithOp::Shl => "<<",
        ArithOp::Shr => ">>",
        ArithOp::Pow | ArithOp::Xor => "^",
        ArithOp::And => "&",
        ArithOp::Or => "|",
    }
}

#[cfg(test)]
mod tests;
