//! Rill statement compiler.
//!
//! Translates a lexed token list into a typed, immutable [`Script`]. Every
//! name is resolved and every type checked here, so execution never meets
//! an unknown variable or an unsupported operator that translation could
//! have caught.
//!
//! Translation runs in three passes over the tokens:
//!
//! 1. collect function signatures and skip their bodies,
//! 2. translate the top-level statements in the root scope,
//! 3. translate each function body with the complete top-level scope.
//!
//! The first error aborts translation.

mod context;
mod cursor;
mod error;
mod grammar;

use rustc_hash::FxHashMap;

use rill_ir::ast::{Param, Script};
use rill_ir::{HostTypeRegistry, Name, SharedInterner, Span, StringInterner, TokenList, ValueType};

pub use context::{CompilationContext, ScopeFlags, Symbol};
pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};

/// Host-supplied translation settings.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Type a top-level `return` must produce.
    pub return_type: ValueType,
    /// Host types and their operators.
    pub host: HostTypeRegistry,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            return_type: ValueType::Void,
            host: HostTypeRegistry::new(),
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn with_return_type(mut self, ty: ValueType) -> Self {
        self.return_type = ty;
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: HostTypeRegistry) -> Self {
        self.host = host;
        self
    }
}

/// Signature of a script function, known before any body is translated.
#[derive(Clone, Debug)]
pub struct FunctionSignature {
    pub params: Vec<Param>,
    pub return_type: ValueType,
    pub span: Span,
}

/// Statement parser over one token list.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    ctx: CompilationContext,
    host: &'a HostTypeRegistry,
    functions: FxHashMap<Name, FunctionSignature>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner, options: &'a ParseOptions) -> Self {
        Parser {
            cursor: Cursor::new(tokens, interner),
            ctx: CompilationContext::new(options.return_type.clone()),
            host: &options.host,
            functions: FxHashMap::default(),
        }
    }

    pub fn context(&self) -> &CompilationContext {
        &self.ctx
    }

    /// Mutable access to the compile scope, for hosts that predeclare
    /// variables before translating statements one at a time.
    pub fn context_mut(&mut self) -> &mut CompilationContext {
        &mut self.ctx
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    /// Run `f` inside a fresh compile scope.
    fn in_scope<T>(
        &mut self,
        flags: ScopeFlags,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.ctx.push(flags);
        let result = f(self);
        self.ctx.pop();
        result
    }

    fn text(&self, name: Name) -> &'static str {
        self.cursor.text(name)
    }
}

/// Translate a whole script.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(
    tokens: &TokenList,
    interner: &SharedInterner,
    options: &ParseOptions,
) -> Result<Script, ParseError> {
    let mut parser = Parser::new(tokens, interner, options);
    let (functions, body) = parser.parse_script()?;
    Ok(Script {
        functions,
        body,
        return_type: options.return_type.clone(),
        interner: interner.clone(),
    })
}

#[cfg(test)]
mod tests;
