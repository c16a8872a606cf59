use super::*;
use pretty_assertions::assert_eq;

#[test]
fn widening_is_directional() {
    assert!(PrimitiveKind::Byte.widens_to(PrimitiveKind::Int));
    assert!(!PrimitiveKind::Int.widens_to(PrimitiveKind::Byte));
    assert!(PrimitiveKind::Int.widens_to(PrimitiveKind::Long));
    assert!(!PrimitiveKind::Long.widens_to(PrimitiveKind::Int));
    assert!(PrimitiveKind::Int.widens_to(PrimitiveKind::Float));
    assert!(!PrimitiveKind::Double.widens_to(PrimitiveKind::Float));
}

#[test]
fn signed_never_widens_to_unsigned() {
    for from in [
        PrimitiveKind::SByte,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
    ] {
        for to in [
            PrimitiveKind::Byte,
            PrimitiveKind::UShort,
            PrimitiveKind::UInt,
            PrimitiveKind::ULong,
        ] {
            assert!(!from.widens_to(to), "{from} -> {to}");
        }
    }
}

#[test]
fn char_widens_like_ushort() {
    assert!(PrimitiveKind::Char.widens_to(PrimitiveKind::UShort));
    assert!(PrimitiveKind::Char.widens_to(PrimitiveKind::Int));
    assert!(!PrimitiveKind::UShort.widens_to(PrimitiveKind::Char));
    assert!(!PrimitiveKind::Byte.widens_to(PrimitiveKind::Char));
}

#[test]
fn bool_is_isolated() {
    for kind in PrimitiveKind::ALL {
        if kind != PrimitiveKind::Bool {
            assert!(!PrimitiveKind::Bool.widens_to(kind));
            assert!(!kind.widens_to(PrimitiveKind::Bool));
        }
    }
}

#[test]
fn promotion_follows_csharp() {
    use PrimitiveKind::{Byte, Double, Float, Int, Long, Short, UInt, ULong};
    assert_eq!(PrimitiveKind::promote(Byte, Byte), Some(Int));
    assert_eq!(PrimitiveKind::promote(Short, Int), Some(Int));
    assert_eq!(PrimitiveKind::promote(UInt, Int), Some(Long));
    assert_eq!(PrimitiveKind::promote(UInt, Byte), Some(UInt));
    assert_eq!(PrimitiveKind::promote(ULong, Int), None);
    assert_eq!(PrimitiveKind::promote(ULong, UInt), Some(ULong));
    assert_eq!(PrimitiveKind::promote(Long, Float), Some(Float));
    assert_eq!(PrimitiveKind::promote(Float, Double), Some(Double));
    assert_eq!(PrimitiveKind::promote(PrimitiveKind::Bool, Int), None);
}

#[test]
fn assignability_rule() {
    let int = ValueType::INT;
    let long = ValueType::Primitive(PrimitiveKind::Long);
    assert!(long.is_assignable_from(&int));
    assert!(!int.is_assignable_from(&long));
    assert!(ValueType::String.is_assignable_from(&ValueType::String));
    assert!(!ValueType::String.is_assignable_from(&int));

    let ints = ValueType::list_of(ValueType::INT);
    let longs = ValueType::list_of(long);
    assert!(!longs.is_assignable_from(&ints));
    assert!(!ValueType::Void.is_assignable_from(&ValueType::Void));
}

#[test]
fn enumerable_elements() {
    assert_eq!(
        ValueType::list_of(ValueType::DOUBLE).enumerable_element(),
        Some(ValueType::DOUBLE)
    );
    assert_eq!(ValueType::String.enumerable_element(), Some(ValueType::CHAR));
    assert_eq!(ValueType::INT.enumerable_element(), None);
}

#[test]
fn host_types_compare_by_name() {
    let a = HostType::new("Money", || Value::Void);
    let b = HostType::new("Money", || Value::Int(1));
    assert_eq!(ValueType::Host(a), ValueType::Host(b));
}

#[test]
fn display_nested_list() {
    let ty = ValueType::list_of(ValueType::list_of(ValueType::INT));
    assert_eq!(ty.to_string(), "List<List<int>>");
}
