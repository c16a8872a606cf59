//! Host integration: host-defined types and their operators.
//!
//! The host registers its types and the operators they support before a
//! script is compiled. The parser resolves a compound assignment on
//! non-primitive operands against this registry, so an unsupported operator
//! is a parse error rather than a runtime lookup failure.

use std::any::Any;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{BinaryOp, HostType, Value, ValueType};

/// A value owned by the host and manipulated by scripts.
pub trait HostObject: fmt::Debug {
    /// Name of the registered host type this value belongs to.
    fn type_name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;

    /// Text used by `print` and string concatenation.
    fn render(&self) -> String;

    /// Value equality. Defaults to identity.
    fn equals(&self, _other: &dyn HostObject) -> bool {
        false
    }
}

/// Reference-counted host object stored in a [`Value`].
#[derive(Clone, Debug)]
pub struct HostValue(Rc<dyn HostObject>);

impl HostValue {
    pub fn new(object: impl HostObject + 'static) -> Self {
        HostValue(Rc::new(object))
    }

    pub fn type_name(&self) -> &str {
        self.0.type_name()
    }

    pub fn render(&self) -> String {
        self.0.render()
    }

    pub fn equals(&self, other: &HostValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || self.0.equals(other.0.as_ref())
    }

    /// Downcast to the concrete host type.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

/// Error raised by a host operator; surfaced as a runtime error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostError(pub String);

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        HostError(message.into())
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for HostError {}

/// Implementation of one binary operator for one pair of operand types.
///
/// Compiled scripts hold resolved operators, and compiled scripts are
/// shared across threads, hence `Send + Sync`.
pub trait HostOperator: Send + Sync {
    fn apply(&self, lhs: &Value, rhs: &Value) -> Result<Value, HostError>;
}

impl<F> HostOperator for F
where
    F: Fn(&Value, &Value) -> Result<Value, HostError> + Send + Sync,
{
    fn apply(&self, lhs: &Value, rhs: &Value) -> Result<Value, HostError> {
        self(lhs, rhs)
    }
}

/// A resolved host operator and its result type.
#[derive(Clone)]
pub struct ResolvedOperator {
    pub result: ValueType,
    pub operator: Arc<dyn HostOperator>,
}

impl fmt::Debug for ResolvedOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedOperator")
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

type OperatorKey = (BinaryOp, ValueType, ValueType);

/// Host types and operators visible to a script.
#[derive(Clone, Default)]
pub struct HostTypeRegistry {
    types: FxHashMap<String, HostType>,
    operators: FxHashMap<OperatorKey, ResolvedOperator>,
}

impl HostTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type; `default` produces the value of a declaration
    /// without an initializer.
    pub fn register_type(
        &mut self,
        name: &str,
        default: impl Fn() -> Value + Send + Sync + 'static,
    ) -> ValueType {
        let host = HostType::new(name, default);
        self.types.insert(name.to_string(), host.clone());
        ValueType::Host(host)
    }

    /// Register `lhs op rhs -> result`.
    pub fn register_operator(
        &mut self,
        op: BinaryOp,
        lhs: ValueType,
        rhs: ValueType,
        result: ValueType,
        operator: impl HostOperator + 'static,
    ) {
        self.operators.insert(
            (op, lhs, rhs),
            ResolvedOperator {
                result,
                operator: Arc::new(operator),
            },
        );
    }

    pub fn lookup_type(&self, name: &str) -> Option<ValueType> {
        self.types.get(name).cloned().map(ValueType::Host)
    }

    pub fn resolve_operator(
        &self,
        op: BinaryOp,
        lhs: &ValueType,
        rhs: &ValueType,
    ) -> Option<&ResolvedOperator> {
        self.operators.get(&(op, lhs.clone(), rhs.clone()))
    }
}

impl fmt::Debug for HostTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostTypeRegistry")
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .field("operators", &self.operators.len())
            .finish()
    }
}
