#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

use pretty_assertions::assert_eq;
use rill_ir::{CoercionTable, CompoundOp};

use super::*;
use crate::errors::EvalErrorKind;

fn plan(op: CompoundOp, left: PrimitiveKind, right: PrimitiveKind) -> PrimitivePlan {
    CoercionTable::global()
        .resolve(op, left, right)
        .expect("pair should be accepted")
}

#[test]
fn int_plus_widened_byte() {
    let plan = plan(CompoundOp::Add, PrimitiveKind::Int, PrimitiveKind::Byte);
    let result = apply_plan(&plan, &Value::Int(5), &Value::Byte(3)).unwrap();
    assert_eq!(result, Value::Int(8));
}

#[test]
fn xor_assign_is_power_on_floats() {
    let plan = plan(CompoundOp::Xor, PrimitiveKind::Float, PrimitiveKind::Int);
    let result = apply_plan(&plan, &Value::Float(2.0), &Value::Int(3)).unwrap();
    assert_eq!(result, Value::Float(8.0));
}

#[test]
fn xor_assign_is_exclusive_or_on_bools_and_integers() {
    let bools = plan(CompoundOp::Xor, PrimitiveKind::Bool, PrimitiveKind::Bool);
    assert_eq!(
        apply_plan(&bools, &Value::Bool(true), &Value::Bool(false)).unwrap(),
        Value::Bool(true)
    );
    let ints = plan(CompoundOp::Xor, PrimitiveKind::Int, PrimitiveKind::Int);
    assert_eq!(
        apply_plan(&ints, &Value::Int(0b1100), &Value::Int(0b1010)).unwrap(),
        Value::Int(0b0110)
    );
}

#[test]
fn integral_arithmetic_wraps() {
    let add = plan(CompoundOp::Add, PrimitiveKind::Byte, PrimitiveKind::Byte);
    assert_eq!(
        apply_plan(&add, &Value::Byte(250), &Value::Byte(10)).unwrap(),
        Value::Byte(4)
    );
    let mul = plan(CompoundOp::Mul, PrimitiveKind::ULong, PrimitiveKind::ULong);
    assert_eq!(
        apply_plan(&mul, &Value::ULong(u64::MAX), &Value::ULong(2)).unwrap(),
        Value::ULong(u64::MAX - 1)
    );
}

#[test]
fn integer_division_by_zero_fails() {
    let div = plan(CompoundOp::Div, PrimitiveKind::Int, PrimitiveKind::Int);
    let err = apply_plan(&div, &Value::Int(1), &Value::Int(0)).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);

    let rem = evaluate_binary(BinaryOp::Rem, &Value::Long(1), &Value::Long(0)).unwrap_err();
    assert_eq!(rem.kind, EvalErrorKind::DivisionByZero);
}

#[test]
fn float_division_by_zero_is_infinite() {
    let result = evaluate_binary(BinaryOp::Div, &Value::Double(1.0), &Value::Double(0.0)).unwrap();
    assert_eq!(result, Value::Double(f64::INFINITY));
}

#[test]
fn shift_counts_are_masked() {
    let shl = plan(CompoundOp::Shl, PrimitiveKind::Int, PrimitiveKind::Int);
    assert_eq!(
        apply_plan(&shl, &Value::Int(1), &Value::Int(33)).unwrap(),
        Value::Int(2)
    );
    assert_eq!(
        evaluate_binary(BinaryOp::Shl, &Value::Long(1), &Value::Int(65)).unwrap(),
        Value::Long(2)
    );
    assert_eq!(
        evaluate_binary(BinaryOp::Shr, &Value::Int(-8), &Value::Int(1)).unwrap(),
        Value::Int(-4)
    );
}

#[test]
fn comparisons() {
    assert_eq!(
        evaluate_binary(BinaryOp::Lt, &Value::Int(1), &Value::Int(2)).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_binary(BinaryOp::GtEq, &Value::Double(2.0), &Value::Double(2.0)).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_binary(BinaryOp::Lt, &Value::Double(f64::NAN), &Value::Double(1.0)).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        evaluate_binary(BinaryOp::Eq, &Value::Char('a'), &Value::Char('a')).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn unary_operators() {
    assert_eq!(
        evaluate_unary(UnaryOp::Neg, &Value::Int(i32::MIN)).unwrap(),
        Value::Int(i32::MIN)
    );
    assert_eq!(
        evaluate_unary(UnaryOp::BitNot, &Value::Int(0)).unwrap(),
        Value::Int(-1)
    );
    assert_eq!(
        evaluate_unary(UnaryOp::Not, &Value::Bool(true)).unwrap(),
        Value::Bool(false)
    );
    assert!(evaluate_unary(UnaryOp::BitNot, &Value::Double(1.0)).is_err());
}

#[test]
fn math_functions() {
    assert_eq!(
        evaluate_math(MathFn::Abs, &[Value::Int(-4)]).unwrap(),
        Value::Int(4)
    );
    assert_eq!(
        evaluate_math(MathFn::Max, &[Value::Long(3), Value::Long(9)]).unwrap(),
        Value::Long(9)
    );
    assert_eq!(
        evaluate_math(MathFn::Min, &[Value::Double(3.5), Value::Double(-1.0)]).unwrap(),
        Value::Double(-1.0)
    );
    assert_eq!(
        evaluate_math(MathFn::Pow, &[Value::Double(2.0), Value::Double(10.0)]).unwrap(),
        Value::Double(1024.0)
    );
    assert_eq!(
        evaluate_math(MathFn::Floor, &[Value::Double(2.7)]).unwrap(),
        Value::Double(2.0)
    );
}

#[test]
fn conversion_failures_are_type_mismatches() {
    let err = convert(&Value::string("x"), PrimitiveKind::Int).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeMismatch {
            expected: "int".to_string(),
            found: "string".to_string(),
        }
    );
    assert_eq!(
        convert(&Value::Double(3.9), PrimitiveKind::Int).unwrap(),
        Value::Int(3)
    );
}
