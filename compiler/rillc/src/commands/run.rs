//! The `run` command: compile and execute a Rill script.

use rill_eval::stdout_handler;
use rill_parse::ParseOptions;

use super::{fail, read_file, source_emitter};
use crate::pipeline::{compile, execute, RunOptions};

/// Run a script, printing its result (if any) after its own output.
pub fn run_file(path: &str, options: &RunOptions) {
    let source = read_file(path);
    let mut emitter = source_emitter(path, &source);

    let script = match compile(&source, &ParseOptions::default()) {
        Ok(script) => script,
        Err(diagnostic) => fail(&mut emitter, &diagnostic),
    };

    match execute(&script, options, stdout_handler()) {
        Ok(Some(value)) => println!("{value}"),
        Ok(None) => {}
        Err(diagnostic) => fail(&mut emitter, &diagnostic),
    }
}
