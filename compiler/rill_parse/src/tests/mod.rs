//! Parser tests, driven from source text through the lexer.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

mod errors;
mod statements;

use rill_ir::ast::{Expr, Script, Stmt};
use rill_ir::SharedInterner;

use crate::{parse, ParseError, ParseErrorKind, ParseOptions};

fn parse_with(source: &str, options: &ParseOptions) -> Result<Script, ParseError> {
    let interner = SharedInterner::new();
    let tokens = rill_lexer::lex(source, &interner).expect("test source should lex");
    parse(&tokens, &interner, options)
}

fn parse_source(source: &str) -> Script {
    match parse_with(source, &ParseOptions::default()) {
        Ok(script) => script,
        Err(err) => panic!("unexpected parse error: {err}"),
    }
}

fn parse_err(source: &str) -> ParseError {
    parse_with(source, &ParseOptions::default()).expect_err("source should not parse")
}

fn err_kind(source: &str) -> ParseErrorKind {
    parse_err(source).kind
}

/// Initializer of the `index`th top-level declaration.
fn initializer(script: &Script, index: usize) -> &Expr {
    match &script.body[index] {
        Stmt::DeclarationAssignment(decl) => &decl.value,
        other => panic!("expected a declaration with initializer, found {other:?}"),
    }
}
