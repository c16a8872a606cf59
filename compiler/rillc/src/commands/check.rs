//! The `check` command: compile without running.

use rill_parse::ParseOptions;

use super::{fail, read_file, source_emitter};
use crate::pipeline::compile;

pub fn check_file(path: &str) {
    let source = read_file(path);
    match compile(&source, &ParseOptions::default()) {
        Ok(script) => println!(
            "{path}: ok ({} functions, {} top-level statements)",
            script.functions.len(),
            script.body.len()
        ),
        Err(diagnostic) => fail(&mut source_emitter(path, &source), &diagnostic),
    }
}
