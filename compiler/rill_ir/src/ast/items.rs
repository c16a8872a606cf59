//! Script-level items: functions and the compiled script.

use rustc_hash::FxHashMap;

use super::stmt::{Block, Stmt};
use crate::{Name, SharedInterner, Span, ValueType};

#[derive(Clone, Debug)]
pub struct Param {
    pub name: Name,
    pub ty: ValueType,
    pub span: Span,
}

/// `T name(T a, ...) { ... }`
#[derive(Clone, Debug)]
pub struct FunctionDecl {
    pub name: Name,
    pub params: Vec<Param>,
    pub return_type: ValueType,
    pub body: Block,
    pub span: Span,
}

/// A compiled script.
///
/// Immutable and `Send + Sync`; each execution builds its own runtime
/// chain, so one script may run on several threads at once.
pub struct Script {
    pub functions: FxHashMap<Name, FunctionDecl>,
    /// Top-level statements, run directly in the root scope.
    pub body: Vec<Stmt>,
    pub return_type: ValueType,
    pub interner: SharedInterner,
}

impl Script {
    pub fn function(&self, name: Name) -> Option<&FunctionDecl> {
        self.functions.get(&name)
    }

    /// Look up a function by its source name.
    pub fn function_named(&self, name: &str) -> Option<&FunctionDecl> {
        self.interner.get(name).and_then(|n| self.functions.get(&n))
    }
}

impl std::fmt::Debug for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Script")
            .field("functions", &self.functions.len())
            .field("body", &self.body)
            .field("return_type", &self.return_type)
            .finish_non_exhaustive()
    }
}
