//! Storage behind `global` declarations.
//!
//! A `global T name = init;` loads `name` from the store when present and
//! otherwise writes its initial value back. Stores are synchronous and
//! infallible from the script's point of view: a store that cannot save
//! simply drops the write.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use rill_ir::{PrimitiveKind, Value, ValueType};

/// A value a store can hold.
#[derive(Clone, Debug, PartialEq)]
pub enum PersistedValue {
    Str(String),
    Bool(bool),
    Double(f64),
    Int(i32),
    List(Vec<PersistedValue>),
}

impl PersistedValue {
    /// Snapshot a runtime value, or `None` for kinds a store cannot hold.
    pub fn from_value(value: &Value) -> Option<PersistedValue> {
        let persisted = match value {
            Value::Str(s) => PersistedValue::Str(s.to_string()),
            Value::Bool(b) => PersistedValue::Bool(*b),
            Value::Double(d) => PersistedValue::Double(*d),
            Value::Int(i) => PersistedValue::Int(*i),
            Value::List(list) => PersistedValue::List(
                list.snapshot()
                    .iter()
                    .map(PersistedValue::from_value)
                    .collect::<Option<Vec<_>>>()?,
            ),
            _ => return None,
        };
        Some(persisted)
    }

    /// Rebuild a runtime value of type `ty`, or `None` when the stored
    /// shape does not match.
    pub fn to_value(&self, ty: &ValueType) -> Option<Value> {
        let value = match (ty, self) {
            (ValueType::String, PersistedValue::Str(s)) => Value::string(s),
            (ValueType::Primitive(PrimitiveKind::Bool), PersistedValue::Bool(b)) => Value::Bool(*b),
            (ValueType::Primitive(PrimitiveKind::Double), PersistedValue::Double(d)) => {
                Value::Double(*d)
            }
            (ValueType::Primitive(PrimitiveKind::Int), PersistedValue::Int(i)) => Value::Int(*i),
            (ValueType::List(element), PersistedValue::List(items)) => Value::list(
                items
                    .iter()
                    .map(|item| item.to_value(element))
                    .collect::<Option<Vec<_>>>()?,
            ),
            _ => return None,
        };
        Some(value)
    }
}

/// Synchronous key/value store for persisted globals.
pub trait PersistenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<PersistedValue>;

    /// Fire-and-forget write.
    fn set(&self, key: &str, value: PersistedValue);
}

pub type SharedStore = Arc<dyn PersistenceStore>;

/// In-memory store, shared between interpreters through `Arc`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<FxHashMap<String, PersistedValue>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<MemoryStore> {
        Arc::new(Self::new())
    }

    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl PersistenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<PersistedValue> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: PersistedValue) {
        tracing::trace!(key, ?value, "persist");
        self.values.lock().insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests;
