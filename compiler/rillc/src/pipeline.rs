//! Source to result, with every failure rendered as a `Diagnostic`.

use rill_diagnostic::Diagnostic;
use rill_eval::{Interpreter, SharedPrintHandler, DEFAULT_MAX_DEPTH};
use rill_ir::ast::Script;
use rill_ir::{SharedInterner, Value};
use rill_parse::ParseOptions;
use tracing::debug;

/// How `rill run` executes a compiled script.
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Function to call after the top-level statements finish.
    pub call: Option<String>,
    pub max_depth: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            call: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Lex and parse `source` with a fresh interner.
pub fn compile(source: &str, options: &ParseOptions) -> Result<Script, Diagnostic> {
    let interner = SharedInterner::new();
    let tokens = rill_lexer::lex(source, &interner).map_err(|err| err.to_diagnostic())?;
    let script =
        rill_parse::parse(&tokens, &interner, options).map_err(|err| err.to_diagnostic())?;
    debug!(
        functions = script.functions.len(),
        statements = script.body.len(),
        "compiled"
    );
    Ok(script)
}

/// Run the top level, then the requested function if any.
///
/// Returns the value worth showing: the function's result when one was
/// called, otherwise the top-level `return` value. `void` results are
/// `None`.
pub fn execute(
    script: &Script,
    options: &RunOptions,
    print_handler: SharedPrintHandler,
) -> Result<Option<Value>, Diagnostic> {
    let mut interp = Interpreter::builder(script)
        .max_call_depth(options.max_depth)
        .print_handler(print_handler)
        .build();
    let returned = interp.run().map_err(|err| err.to_diagnostic())?;
    match &options.call {
        Some(name) => {
            let value = interp
                .call(name, Vec::new())
                .map_err(|err| err.to_diagnostic())?;
            Ok(Some(value).filter(|value| !matches!(value, Value::Void)))
        }
        None => Ok(returned),
    }
}
