//! Compile-time scope chain.
//!
//! Mirrors the runtime scope chain while statements are translated: every
//! block, loop and function pushes a scope, and each scope records the names
//! it declares, its constants, and which constructs enclose it. Name lookup
//! walks outward through all enclosing scopes; flag queries stop at the
//! nearest function boundary.

use bitflags::bitflags;
use rustc_hash::FxHashMap;

use rill_ir::{Literal, Name, ValueType};

bitflags! {
    /// What a compile scope is nested in.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ScopeFlags: u8 {
        /// Body of `while`, `for` or `foreach`.
        const LOOP = 1 << 0;
        /// Body of a `switch`.
        const SWITCH = 1 << 1;
        /// Function body root. Flag and return-type lookups stop here.
        const FUNCTION = 1 << 2;
        /// The script's top-level scope.
        const TOP_LEVEL = 1 << 3;
    }
}

/// A name visible at compile time.
#[derive(Clone, Debug, PartialEq)]
pub enum Symbol {
    Variable(ValueType),
    /// `const`; uses are replaced by the literal.
    Constant(Literal),
}

impl Symbol {
    pub fn ty(&self) -> ValueType {
        match self {
            Symbol::Variable(ty) => ty.clone(),
            Symbol::Constant(literal) => literal.value_type(),
        }
    }
}

#[derive(Debug, Default)]
struct CompileScope {
    symbols: FxHashMap<Name, Symbol>,
    flags: ScopeFlags,
    return_type: Option<ValueType>,
}

/// Stack of compile scopes. The root scope is never popped.
#[derive(Debug)]
pub struct CompilationContext {
    scopes: Vec<CompileScope>,
}

impl CompilationContext {
    /// Context with a top-level scope returning `return_type`.
    pub fn new(return_type: ValueType) -> Self {
        CompilationContext {
            scopes: vec![CompileScope {
                symbols: FxHashMap::default(),
                flags: ScopeFlags::TOP_LEVEL,
                return_type: Some(return_type),
            }],
        }
    }

    pub fn push(&mut self, flags: ScopeFlags) {
        self.scopes.push(CompileScope {
            flags,
            ..CompileScope::default()
        });
    }

    /// Enter a function body. The new scope sees the top-level names but
    /// none of the flags of whatever precedes it on the stack.
    pub fn push_function(&mut self, return_type: ValueType) {
        self.scopes.push(CompileScope {
            symbols: FxHashMap::default(),
            flags: ScopeFlags::FUNCTION,
            return_type: Some(return_type),
        });
    }

    pub fn pop(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Whether the innermost scope is the top-level scope.
    pub fn is_top_level(&self) -> bool {
        self.scopes.len() == 1
    }

    pub fn lookup(&self, name: Name) -> Option<&Symbol> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.symbols.get(&name))
    }

    /// Declare a variable in the innermost scope.
    ///
    /// Returns `false` without declaring when `name` is already visible
    /// from here, in this scope or any enclosing one.
    #[must_use]
    pub fn declare(&mut self, name: Name, ty: ValueType) -> bool {
        self.insert(name, Symbol::Variable(ty))
    }

    #[must_use]
    pub fn declare_constant(&mut self, name: Name, value: Literal) -> bool {
        self.insert(name, Symbol::Constant(value))
    }

    fn insert(&mut self, name: Name, symbol: Symbol) -> bool {
        if self.lookup(name).is_some() {
            return false;
        }
        match self.scopes.last_mut() {
            Some(scope) => {
                scope.symbols.insert(name, symbol);
                true
            }
            None => false,
        }
    }

    fn enclosing_flags(&self) -> ScopeFlags {
        let mut flags = ScopeFlags::empty();
        for scope in self.scopes.iter().rev() {
            flags |= scope.flags;
            if scope.flags.intersects(ScopeFlags::FUNCTION | ScopeFlags::TOP_LEVEL) {
                break;
            }
        }
        flags
    }

    /// Whether `continue` has a loop to continue.
    pub fn in_loop(&self) -> bool {
        self.enclosing_flags().contains(ScopeFlags::LOOP)
    }

    /// Whether `break` has a loop or switch to leave.
    pub fn in_breakable(&self) -> bool {
        self.enclosing_flags()
            .intersects(ScopeFlags::LOOP | ScopeFlags::SWITCH)
    }

    /// Return type of the enclosing function, or the script's.
    pub fn return_type(&self) -> &ValueType {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.return_type.as_ref())
            .unwrap_or(&ValueType::Void)
    }
}

#[cfg(test)]
mod tests;
