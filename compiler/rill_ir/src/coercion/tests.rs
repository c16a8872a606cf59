use super::*;
use pretty_assertions::assert_eq;
use PrimitiveKind::{Bool, Byte, Char, Double, Float, Int, Long, Short, UInt, ULong};

fn rule(op: CompoundOp, left: PrimitiveKind, right: PrimitiveKind) -> CoercionRule {
    CoercionTable::global().rule(op, left, right)
}

#[test]
fn widening_direction_is_asymmetric() {
    assert_eq!(rule(CompoundOp::Add, Int, Byte), CoercionRule::WidenThenApply);
    assert_eq!(rule(CompoundOp::Add, Byte, Int), CoercionRule::Reject);
    assert_eq!(rule(CompoundOp::Add, Long, Int), CoercionRule::WidenThenApply);
    assert_eq!(rule(CompoundOp::Add, Int, Long), CoercionRule::Reject);
    assert_eq!(rule(CompoundOp::Mul, Double, Float), CoercionRule::WidenThenApply);
    assert_eq!(rule(CompoundOp::Mul, Float, Double), CoercionRule::Reject);
}

#[test]
fn identity_applies_directly() {
    for kind in [Byte, Short, Int, UInt, Long, ULong, Float, Double] {
        assert_eq!(rule(CompoundOp::Sub, kind, kind), CoercionRule::Apply);
    }
}

#[test]
fn arithmetic_rejects_bool_and_char() {
    assert_eq!(rule(CompoundOp::Add, Bool, Bool), CoercionRule::Reject);
    assert_eq!(rule(CompoundOp::Add, Char, Char), CoercionRule::Reject);
    assert_eq!(rule(CompoundOp::Add, Int, Char), CoercionRule::WidenThenApply);
}

#[test]
fn shifts_take_an_int_count() {
    assert_eq!(rule(CompoundOp::Shl, Long, Int), CoercionRule::Apply);
    assert_eq!(rule(CompoundOp::Shl, Byte, Byte), CoercionRule::WidenThenApply);
    assert_eq!(rule(CompoundOp::Shr, Int, Long), CoercionRule::Reject);
    assert_eq!(rule(CompoundOp::Shr, Double, Int), CoercionRule::Reject);

    let plan = CoercionTable::global()
        .resolve(CompoundOp::Shl, Long, Byte)
        .unwrap_or_else(|| panic!("long <<= byte should resolve"));
    assert_eq!(plan.target, Long);
    assert_eq!(plan.operand, Int);
    assert!(plan.widen);
}

#[test]
fn xor_is_type_directed() {
    let table = CoercionTable::global();
    let float_plan = table.resolve(CompoundOp::Xor, Float, Int);
    assert_eq!(float_plan.map(|p| p.op), Some(ArithOp::Pow));
    let bool_plan = table.resolve(CompoundOp::Xor, Bool, Bool);
    assert_eq!(bool_plan.map(|p| p.op), Some(ArithOp::Xor));
    let int_plan = table.resolve(CompoundOp::Xor, Int, Short);
    assert_eq!(int_plan.map(|p| p.op), Some(ArithOp::Xor));
}

#[test]
fn bitwise_accepts_integral_and_bool_only() {
    assert_eq!(rule(CompoundOp::And, Bool, Bool), CoercionRule::Apply);
    assert_eq!(rule(CompoundOp::Or, UInt, Byte), CoercionRule::WidenThenApply);
    assert_eq!(rule(CompoundOp::And, Float, Float), CoercionRule::Reject);
    assert_eq!(rule(CompoundOp::Or, Bool, Int), CoercionRule::Reject);
}

#[test]
fn table_agrees_with_assignability_for_arithmetic() {
    let table = CoercionTable::global();
    for left in PrimitiveKind::ALL.into_iter().filter(|k| k.is_numeric()) {
        for right in PrimitiveKind::ALL {
            let accepted = table.rule(CompoundOp::Add, left, right) != CoercionRule::Reject;
            assert_eq!(accepted, right.assignable_to(left), "{left} += {right}");
        }
    }
}
