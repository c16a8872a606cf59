//! Rill Eval - tree-walking executor for compiled Rill scripts.
//!
//! # Architecture
//!
//! - `Execute`: every statement node runs against a runtime context and
//!   returns a `FlowState` (`exec`)
//! - `ScopeRuntimeContext`: parent-linked bindings, one chain per execution
//! - `evaluate_binary` / `apply_plan`: primitive arithmetic, including the
//!   compound-assignment plans chosen at parse time
//! - `Interpreter`: host entry points, call stack, globals and externs
//! - `PersistenceStore`: where `global` values live between runs
//!
//! Scripts are immutable; everything an execution mutates is owned by its
//! `Interpreter`.

mod diagnostics;
mod environment;
pub mod errors;
pub mod exec;
mod flow;
pub mod interpreter;
mod operators;
mod persistence;
mod print_handler;

pub use diagnostics::{CallFrame, CallStack, DEFAULT_MAX_DEPTH};
pub use environment::{
    conforms, Binding, BindingError, LocalScope, RuntimeScope, ScopeRuntimeContext,
};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use exec::Execute;
pub use flow::{CancellationToken, FlowState};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use operators::{apply_plan, convert, evaluate_binary, evaluate_unary};
pub use persistence::{MemoryStore, PersistedValue, PersistenceStore, SharedStore};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
