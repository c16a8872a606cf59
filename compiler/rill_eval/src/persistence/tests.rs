#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn memory_store_round_trip() {
    let store = MemoryStore::new();
    assert!(store.is_empty());
    store.set("score", PersistedValue::Int(12));
    assert_eq!(store.get("score"), Some(PersistedValue::Int(12)));
    assert_eq!(store.get("missing"), None);
    assert_eq!(store.len(), 1);
}

#[test]
fn nested_lists_persist() {
    let inner = Value::list(vec![Value::string("a"), Value::string("b")]);
    let outer = Value::list(vec![inner]);
    let persisted = PersistedValue::from_value(&outer).unwrap();
    assert_eq!(
        persisted,
        PersistedValue::List(vec![PersistedValue::List(vec![
            PersistedValue::Str("a".to_string()),
            PersistedValue::Str("b".to_string()),
        ])])
    );

    let ty = ValueType::list_of(ValueType::list_of(ValueType::String));
    let restored = persisted.to_value(&ty).unwrap();
    assert_eq!(restored.to_string(), "[[a, b]]");
}

#[test]
fn unsupported_kinds_are_not_persisted() {
    assert_eq!(PersistedValue::from_value(&Value::Long(1)), None);
    assert_eq!(
        PersistedValue::from_value(&Value::list(vec![Value::Float(1.0)])),
        None
    );
}

#[test]
fn shape_mismatch_is_rejected() {
    let stored = PersistedValue::Str("seven".to_string());
    assert!(stored.to_value(&ValueType::INT).is_none());
    assert!(PersistedValue::Int(7).to_value(&ValueType::INT).is_some());
}
