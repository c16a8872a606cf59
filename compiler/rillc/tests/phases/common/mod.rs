//! Shared helpers for phase tests.

use rill_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use rill_diagnostic::Diagnostic;
use rill_eval::buffer_handler;
use rill_ir::ast::Script;
use rill_ir::Value;
use rill_parse::ParseOptions;
use rillc::{compile, execute, RunOptions};

/// Compile `source`, panicking with the rendered diagnostic on failure.
pub fn compile_ok(source: &str) -> Script {
    match compile(source, &ParseOptions::default()) {
        Ok(script) => script,
        Err(diagnostic) => panic!("expected a clean compile:\n{}", render(&diagnostic, source)),
    }
}

pub fn compile_err(source: &str) -> Diagnostic {
    compile(source, &ParseOptions::default()).expect_err("source should not compile")
}

/// Output of a successful run: printed lines and the shown result.
pub struct RunOutput {
    pub printed: String,
    pub result: Option<Value>,
}

pub fn run_with(source: &str, options: &RunOptions) -> Result<RunOutput, Diagnostic> {
    let script = compile_ok(source);
    let handler = buffer_handler();
    let result = execute(&script, options, handler.clone())?;
    Ok(RunOutput {
        printed: handler.output(),
        result,
    })
}

/// Run `source` and return what it printed.
pub fn run_printed(source: &str) -> String {
    match run_with(source, &RunOptions::default()) {
        Ok(output) => output.printed,
        Err(diagnostic) => panic!("unexpected runtime error:\n{}", render(&diagnostic, source)),
    }
}

pub fn run_err(source: &str) -> Diagnostic {
    match run_with(source, &RunOptions::default()) {
        Ok(output) => panic!("expected a runtime error, script printed:\n{}", output.printed),
        Err(diagnostic) => diagnostic,
    }
}

/// Render a diagnostic the way `rill` does, without colors.
pub fn render(diagnostic: &Diagnostic, source: &str) -> String {
    let mut buffer = Vec::new();
    {
        let mut emitter = TerminalEmitter::with_color_mode(&mut buffer, ColorMode::Never, false)
            .with_source("test.rill", source);
        emitter.emit(diagnostic);
        emitter.flush();
    }
    String::from_utf8(buffer).unwrap()
}
