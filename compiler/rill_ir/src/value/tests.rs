use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn equality_is_exact_kind() {
    assert_eq!(Value::Int(1), Value::Int(1));
    assert_ne!(Value::Int(1), Value::Long(1));
    assert_ne!(Value::Float(1.0), Value::Double(1.0));
    assert_eq!(Value::string("a"), Value::string("a"));
}

#[test]
fn lists_compare_by_reference() {
    let a = Value::list(vec![Value::Int(1)]);
    let b = Value::list(vec![Value::Int(1)]);
    assert_ne!(a, b);
    assert_eq!(a.clone(), a);
}

#[test]
fn integral_conversion_wraps() {
    assert_eq!(Value::Int(300).convert(PrimitiveKind::Byte), Some(Value::Byte(44)));
    assert_eq!(Value::Int(-1).convert(PrimitiveKind::UInt), Some(Value::UInt(u32::MAX)));
    assert_eq!(Value::Double(3.9).convert(PrimitiveKind::Int), Some(Value::Int(3)));
    assert_eq!(Value::Double(-3.9).convert(PrimitiveKind::Int), Some(Value::Int(-3)));
}

#[test]
fn bool_does_not_convert() {
    assert_eq!(Value::Bool(true).convert(PrimitiveKind::Int), None);
    assert_eq!(Value::Int(1).convert(PrimitiveKind::Bool), None);
    assert_eq!(Value::Bool(true).convert(PrimitiveKind::Bool), Some(Value::Bool(true)));
}

#[test]
fn display_matches_script_conventions() {
    assert_eq!(Value::Bool(true).to_string(), "True");
    assert_eq!(Value::Float(8.0).to_string(), "8");
    assert_eq!(Value::Double(2.5).to_string(), "2.5");
    assert_eq!(Value::Char('x').to_string(), "x");
    let list = Value::list(vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(list.to_string(), "[1, 2]");
}

#[test]
fn list_mutation_is_shared() {
    let list = ListValue::new(vec![]);
    let alias = list.clone();
    alias.push(Value::Int(4));
    assert_eq!(list.len(), 1);
    assert!(list.set(0, Value::Int(5)));
    assert!(!list.set(3, Value::Int(5)));
    assert_eq!(alias.get(0), Some(Value::Int(5)));
}

#[test]
fn zero_values() {
    assert_eq!(Value::zero(PrimitiveKind::Bool), Value::Bool(false));
    assert_eq!(Value::zero(PrimitiveKind::UShort), Value::UShort(0));
    assert_eq!(Value::zero(PrimitiveKind::Double), Value::Double(0.0));
}

fn integral_kind() -> impl Strategy<Value = PrimitiveKind> {
    prop::sample::select(
        PrimitiveKind::ALL
            .into_iter()
            .filter(|k| k.is_integral())
            .collect::<Vec<_>>(),
    )
}

proptest! {
    /// Widening between integral kinds never changes the value.
    #[test]
    fn integral_widening_preserves_value(from in integral_kind(), to in integral_kind(), raw in any::<i64>()) {
        prop_assume!(from.widens_to(to));
        let source = Value::from_i128(from, i128::from(raw));
        let widened = source.convert(to);
        prop_assert_eq!(widened.and_then(|v| v.as_i128()), source.as_i128());
    }
}
