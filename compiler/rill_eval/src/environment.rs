//! Runtime context chain.
//!
//! Each execution builds its own chain of [`ScopeRuntimeContext`]s: a root
//! for the script's top level, then one child per block, loop, iteration
//! and function call. Contexts are parent-linked through [`LocalScope`] and
//! never shared across threads.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use rill_ir::{Name, Value, ValueType};

/// Single-threaded shared handle to a scope.
///
/// Wraps `Rc<RefCell<T>>` so every scope allocation goes through
/// [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }
}

impl LocalScope<ScopeRuntimeContext> {
    /// A fresh root context.
    pub fn root() -> Self {
        LocalScope::new(ScopeRuntimeContext::new())
    }

    /// A new context whose parent is this one.
    #[must_use]
    pub fn child(&self) -> Self {
        LocalScope::new(ScopeRuntimeContext::with_parent(self.clone()))
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Handle to one context in the runtime chain.
pub type RuntimeScope = LocalScope<ScopeRuntimeContext>;

/// Why a binding operation failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindingError {
    /// The name is already visible somewhere in the chain.
    Redeclared,
    /// The name is not visible anywhere in the chain.
    Undefined,
    /// The value does not conform to the binding's static type.
    TypeMismatch { expected: ValueType, found: String },
}

/// A variable binding: its current value and its declared type.
#[derive(Clone, Debug)]
pub struct Binding {
    pub value: Value,
    pub ty: ValueType,
}

/// One link in the runtime context chain.
#[derive(Debug, Default)]
pub struct ScopeRuntimeContext {
    bindings: FxHashMap<Name, Binding>,
    parent: Option<LocalScope<ScopeRuntimeContext>>,
}

impl ScopeRuntimeContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: LocalScope<ScopeRuntimeContext>) -> Self {
        ScopeRuntimeContext {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Whether `name` is bound here or in any ancestor.
    pub fn is_declared(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.borrow().is_declared(name))
    }

    /// Bind `name` in this context.
    ///
    /// Fails when the name is visible anywhere in the chain, or when the
    /// value does not conform to `ty`.
    pub fn declare(&mut self, name: Name, value: Value, ty: ValueType) -> Result<(), BindingError> {
        if self.is_declared(name) {
            return Err(BindingError::Redeclared);
        }
        check_conforms(&value, &ty)?;
        self.bindings.insert(name, Binding { value, ty });
        Ok(())
    }

    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(binding) = self.bindings.get(&name) {
            return Some(binding.value.clone());
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.borrow().lookup(name))
    }

    /// Overwrite the nearest binding of `name`.
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), BindingError> {
        if let Some(binding) = self.bindings.get_mut(&name) {
            check_conforms(&value, &binding.ty)?;
            binding.value = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(BindingError::Undefined),
        }
    }
}

fn check_conforms(value: &Value, ty: &ValueType) -> Result<(), BindingError> {
    if conforms(value, ty) {
        Ok(())
    } else {
        Err(BindingError::TypeMismatch {
            expected: ty.clone(),
            found: value.type_name(),
        })
    }
}

/// Whether a runtime value has the shape of a static type.
///
/// Primitive kinds must match exactly; list element types are not
/// re-checked here since every element went through a typed store.
pub fn conforms(value: &Value, ty: &ValueType) -> bool {
    match (ty, value) {
        (ValueType::Void, Value::Void)
        | (ValueType::String, Value::Str(_))
        | (ValueType::List(_), Value::List(_)) => true,
        (ValueType::Primitive(kind), value) => value.kind() == Some(*kind),
        (ValueType::Host(host), Value::Host(object)) => host.name() == object.type_name(),
        _ => false,
    }
}

#[cfg(test)]
mod tests;
