//! CLI commands. Each one reports its own errors and exits with status 1
//! on failure.

mod check;
mod lex;
mod run;

pub use check::check_file;
pub use lex::lex_file;
pub use run::run_file;

use std::io::{IsTerminal, Stderr};

use rill_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use rill_diagnostic::Diagnostic;

/// Read a source file, or exit with a readable message.
pub(super) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Stderr emitter that renders spans against `source`.
pub(super) fn source_emitter(path: &str, source: &str) -> TerminalEmitter<Stderr> {
    let is_tty = std::io::stderr().is_terminal();
    TerminalEmitter::<Stderr>::stderr(ColorMode::Auto, is_tty).with_source(path, source)
}

/// Emit `diagnostic` and exit with status 1.
pub(super) fn fail(emitter: &mut TerminalEmitter<Stderr>, diagnostic: &Diagnostic) -> ! {
    emitter.emit(diagnostic);
    emitter.flush();
    std::process::exit(1);
}
