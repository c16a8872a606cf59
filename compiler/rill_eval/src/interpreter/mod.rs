//! Tree-walking interpreter for compiled Rill scripts.
//!
//! An [`Interpreter`] borrows an immutable [`Script`] and owns everything an
//! execution mutates: the root runtime context, the call stack, the
//! top-level return slot and the list of `global` bindings to persist.
//! Several interpreters may run the same script at once, each on its own
//! thread.
//!
//! Statement execution lives in `crate::exec`; this module holds the host
//! entry points ([`Interpreter::run`], [`Interpreter::call`]) and the
//! services statements call back into.

mod builder;

pub use builder::InterpreterBuilder;

use rustc_hash::FxHashMap;
use tracing::debug;

use rill_ir::ast::{FunctionDecl, Script};
use rill_ir::{Name, Span, Value, ValueType};
use rill_stack::ensure_sufficient_stack;

use crate::diagnostics::{CallFrame, CallStack};
use crate::environment::{conforms, BindingError, RuntimeScope};
use crate::errors::{
    arity_mismatch, missing_return, redeclaration, type_mismatch, undefined_function,
    undefined_variable, unexpected_flow, EvalError, EvalResult,
};
use crate::exec::Execute;
use crate::flow::{CancellationToken, FlowState};
use crate::operators::convert;
use crate::persistence::{PersistedValue, SharedStore};
use crate::print_handler::SharedPrintHandler;

/// Executes one compiled script.
pub struct Interpreter<'a> {
    script: &'a Script,
    call_stack: CallStack,
    print_handler: SharedPrintHandler,
    store: Option<SharedStore>,
    externs: FxHashMap<String, Value>,
    cancel: CancellationToken,
    /// Root context of the latest run; function calls chain off it.
    root: Option<RuntimeScope>,
    /// Return slot for `return` outside any function.
    result: Option<Value>,
    /// `global` bindings in declaration order.
    globals: Vec<(Name, ValueType)>,
}

impl<'a> Interpreter<'a> {
    /// An interpreter with default configuration: stdout printing, no
    /// persistence, no externs.
    pub fn new(script: &'a Script) -> Self {
        InterpreterBuilder::new(script).build()
    }

    pub fn builder(script: &'a Script) -> InterpreterBuilder<'a> {
        InterpreterBuilder::new(script)
    }

    /// Run the script's top-level statements in a fresh root context.
    ///
    /// Returns the value of a top-level `return`, or `None` when the
    /// statements complete without one (or return nothing).
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self) -> EvalResult<Option<Value>> {
        let root = RuntimeScope::root();
        self.root = Some(root.clone());
        self.result = None;
        self.globals.clear();

        let script = self.script;
        let flow = ensure_sufficient_stack(|| -> EvalResult<FlowState> {
            for stmt in &script.body {
                self.check_cancelled()?;
                let flow = stmt.execute(&root, self)?;
                if !flow.is_nominal() {
                    return Ok(flow);
                }
            }
            Ok(FlowState::Nominal)
        })?;

        match flow {
            FlowState::Nominal => Ok(None),
            FlowState::Return => Ok(self
                .result
                .take()
                .filter(|value| !matches!(value, Value::Void))),
            flow => Err(unexpected_flow(flow, "top-level code")),
        }
    }

    /// Call a script function by name with host-supplied arguments.
    ///
    /// Arguments are converted to the parameter types where an implicit
    /// widening exists. The function sees the root context of the latest
    /// [`Interpreter::run`], or an empty one if the script has not run.
    pub fn call(&mut self, name: &str, args: Vec<Value>) -> EvalResult<Value> {
        let script = self.script;
        let decl = script
            .function_named(name)
            .ok_or_else(|| undefined_function(name))?;
        let args = if args.len() == decl.params.len() {
            args.into_iter()
                .zip(&decl.params)
                .map(|(arg, param)| coerce_host_value(arg, &param.ty))
                .collect::<EvalResult<Vec<_>>>()?
        } else {
            args
        };
        self.call_function(decl, args, None)
    }

    /// Current value of a top-level binding from the latest run.
    pub fn global(&self, name: &str) -> Option<Value> {
        let name = self.script.interner.get(name)?;
        self.root.as_ref()?.borrow().lookup(name)
    }

    /// Write the current value of every `global` back to the store.
    pub fn persist_globals(&self) {
        let (Some(store), Some(root)) = (&self.store, &self.root) else {
            return;
        };
        for (name, _) in &self.globals {
            let key = self.name_text(*name);
            let value = root.borrow().lookup(*name);
            if let Some(persisted) = value.as_ref().and_then(PersistedValue::from_value) {
                store.set(key, persisted);
            }
        }
        debug!(count = self.globals.len(), "persisted globals");
    }

    /// A handle the host can use to cancel this interpreter from any thread.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub(crate) fn script(&self) -> &'a Script {
        self.script
    }

    /// Invoke a function: bind parameters in a fresh context under the root
    /// and run the body, mapping its final flow to a value.
    pub(crate) fn call_function(
        &mut self,
        decl: &'a FunctionDecl,
        args: Vec<Value>,
        call_span: Option<Span>,
    ) -> EvalResult {
        let name = self.name_text(decl.name);
        if args.len() != decl.params.len() {
            return Err(arity_mismatch(name, decl.params.len(), args.len()));
        }
        self.call_stack.push(CallFrame::new(decl.name, call_span))?;
        debug!(function = name, depth = self.call_stack.depth(), "call");

        let outcome = self
            .run_body(decl, args)
            .map_err(|err| err.with_backtrace(self.call_stack.capture(&self.script.interner)));
        let returned = self.call_stack.pop().and_then(|frame| frame.return_value);

        match outcome? {
            FlowState::Return => Ok(returned.unwrap_or(Value::Void)),
            FlowState::Nominal if matches!(decl.return_type, ValueType::Void) => Ok(Value::Void),
            FlowState::Nominal => Err(missing_return(name).with_span(decl.span)),
            flow => Err(unexpected_flow(flow, "function body")),
        }
    }

    fn run_body(&mut self, decl: &'a FunctionDecl, args: Vec<Value>) -> EvalResult<FlowState> {
        let scope = self.root_scope().child();
        for (param, arg) in decl.params.iter().zip(args) {
            self.declare(&scope, param.name, arg, &param.ty)?;
        }
        ensure_sufficient_stack(|| decl.body.execute(&scope, self))
    }

    fn root_scope(&mut self) -> RuntimeScope {
        self.root.get_or_insert_with(RuntimeScope::root).clone()
    }

    #[inline]
    pub(crate) fn check_cancelled(&self) -> EvalResult<()> {
        self.cancel.check()
    }

    pub(crate) fn declare(
        &self,
        scope: &RuntimeScope,
        name: Name,
        value: Value,
        ty: &ValueType,
    ) -> EvalResult<()> {
        let result = scope.borrow_mut().declare(name, value, ty.clone());
        result.map_err(|err| self.binding_error(err, name))
    }

    pub(crate) fn binding_error(&self, err: BindingError, name: Name) -> EvalError {
        let name = self.name_text(name);
        match err {
            BindingError::Redeclared => redeclaration(name),
            BindingError::Undefined => undefined_variable(name),
            BindingError::TypeMismatch { expected, found } => type_mismatch(expected, found),
        }
    }

    /// Store a `return` value in the innermost frame, or in the top-level
    /// slot outside any function.
    pub(crate) fn set_return(&mut self, value: Value) {
        match self.call_stack.current_frame_mut() {
            Some(frame) => frame.return_value = Some(value),
            None => self.result = Some(value),
        }
    }

    #[inline]
    pub(crate) fn name_text(&self, name: Name) -> &'static str {
        self.script.interner.lookup(name)
    }

    pub(crate) fn store(&self) -> Option<SharedStore> {
        self.store.clone()
    }

    pub(crate) fn register_global(&mut self, name: Name, ty: ValueType) {
        self.globals.push((name, ty));
    }

    pub(crate) fn extern_value(&self, name: &str) -> Option<Value> {
        self.externs.get(name).cloned()
    }
}

/// Fit a host-supplied value to a static type.
///
/// Values of the exact type pass through; primitives that widen implicitly
/// are converted; anything else is a type mismatch.
pub(crate) fn coerce_host_value(value: Value, ty: &ValueType) -> EvalResult {
    if conforms(&value, ty) {
        return Ok(value);
    }
    match (value.kind(), ty) {
        (Some(from), ValueType::Primitive(to)) if from.assignable_to(*to) => convert(&value, *to),
        _ => Err(type_mismatch(ty, value.type_name())),
    }
}
