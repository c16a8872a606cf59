//! The `lex` command: dump the token stream.

use rill_ir::StringInterner;

use super::{fail, read_file, source_emitter};

/// Print one token per line as `start..end kind`.
pub fn lex_file(path: &str) {
    let source = read_file(path);
    let interner = StringInterner::new();
    match rill_lexer::lex(&source, &interner) {
        Ok(tokens) => {
            for token in tokens.iter() {
                println!("{}..{} {}", token.span.start, token.span.end, token.kind);
            }
        }
        Err(err) => fail(&mut source_emitter(path, &source), &err.to_diagnostic()),
    }
}
