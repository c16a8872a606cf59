//! `InterpreterBuilder` for configuring an execution.

use rustc_hash::FxHashMap;

use rill_ir::ast::Script;
use rill_ir::Value;

use super::Interpreter;
use crate::diagnostics::{CallStack, DEFAULT_MAX_DEPTH};
use crate::flow::CancellationToken;
use crate::persistence::SharedStore;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for [`Interpreter`] instances.
///
/// Everything is optional: the defaults print to stdout, persist nothing,
/// supply no extern values and allow [`DEFAULT_MAX_DEPTH`] nested calls.
pub struct InterpreterBuilder<'a> {
    script: &'a Script,
    max_depth: usize,
    print_handler: Option<SharedPrintHandler>,
    store: Option<SharedStore>,
    externs: FxHashMap<String, Value>,
    cancel: Option<CancellationToken>,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(script: &'a Script) -> Self {
        Self {
            script,
            max_depth: DEFAULT_MAX_DEPTH,
            print_handler: None,
            store: None,
            externs: FxHashMap::default(),
            cancel: None,
        }
    }

    /// Limit how deeply script functions may nest.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Where `print` writes. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Backing store for `global` declarations.
    #[must_use]
    pub fn store(mut self, store: SharedStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Supply the value of an `extern` declaration.
    #[must_use]
    pub fn extern_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.externs.insert(name.into(), value);
        self
    }

    /// Share a cancellation token with the host.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        Interpreter {
            script: self.script,
            call_stack: CallStack::new(self.max_depth),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            store: self.store,
            externs: self.externs,
            cancel: self.cancel.unwrap_or_default(),
            root: None,
            result: None,
            globals: Vec::new(),
        }
    }
}
