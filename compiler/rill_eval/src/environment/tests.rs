#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

use pretty_assertions::assert_eq;
use rill_ir::{StringInterner, Value, ValueType};

use super::*;

#[test]
fn lookup_walks_the_chain() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let root = LocalScope::root();
    root.borrow_mut()
        .declare(x, Value::Int(1), ValueType::INT)
        .unwrap();

    let child = root.child();
    let grandchild = child.child();
    assert_eq!(grandchild.borrow().lookup(x), Some(Value::Int(1)));
    assert!(grandchild.borrow().is_declared(x));
}

#[test]
fn redeclaring_a_visible_name_fails() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let root = LocalScope::root();
    root.borrow_mut()
        .declare(x, Value::Int(1), ValueType::INT)
        .unwrap();

    let child = root.child();
    let err = child
        .borrow_mut()
        .declare(x, Value::Int(2), ValueType::INT)
        .unwrap_err();
    assert_eq!(err, BindingError::Redeclared);

    let again = root
        .borrow_mut()
        .declare(x, Value::Int(3), ValueType::INT)
        .unwrap_err();
    assert_eq!(again, BindingError::Redeclared);
}

#[test]
fn siblings_may_reuse_a_name() {
    let interner = StringInterner::new();
    let i = interner.intern("i");
    let root = LocalScope::root();
    for n in 0..3 {
        let iteration = root.child();
        iteration
            .borrow_mut()
            .declare(i, Value::Int(n), ValueType::INT)
            .unwrap();
    }
    assert!(!root.borrow().is_declared(i));
}

#[test]
fn assign_updates_the_nearest_binding() {
    let interner = StringInterner::new();
    let total = interner.intern("total");
    let root = LocalScope::root();
    root.borrow_mut()
        .declare(total, Value::Long(0), ValueType::Primitive(rill_ir::PrimitiveKind::Long))
        .unwrap();

    let child = root.child();
    child.borrow_mut().assign(total, Value::Long(42)).unwrap();
    assert_eq!(root.borrow().lookup(total), Some(Value::Long(42)));
}

#[test]
fn assign_checks_the_declared_type() {
    let interner = StringInterner::new();
    let total = interner.intern("total");
    let root = LocalScope::root();
    root.borrow_mut()
        .declare(total, Value::Int(0), ValueType::INT)
        .unwrap();

    let err = root.borrow_mut().assign(total, Value::Long(1)).unwrap_err();
    assert_eq!(
        err,
        BindingError::TypeMismatch {
            expected: ValueType::INT,
            found: "long".to_string(),
        }
    );
}

#[test]
fn assign_to_unknown_name_fails() {
    let interner = StringInterner::new();
    let root = LocalScope::root();
    let err = root
        .borrow_mut()
        .assign(interner.intern("ghost"), Value::Int(1))
        .unwrap_err();
    assert_eq!(err, BindingError::Undefined);
}

#[test]
fn conformance_is_exact_for_primitives() {
    assert!(conforms(&Value::Int(1), &ValueType::INT));
    assert!(!conforms(&Value::Byte(1), &ValueType::INT));
    assert!(conforms(&Value::string("a"), &ValueType::String));
    assert!(conforms(
        &Value::list(Vec::new()),
        &ValueType::list_of(ValueType::INT)
    ));
    assert!(!conforms(&Value::Void, &ValueType::String));
}
