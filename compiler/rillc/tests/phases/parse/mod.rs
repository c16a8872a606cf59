//! Lexing and parsing through the driver.

use pretty_assertions::assert_eq;
use rill_diagnostic::ErrorCode;

use crate::common::{compile_err, compile_ok, render};

#[test]
fn functions_and_statements_compile() {
    let script = compile_ok(
        "int square(int v) { return v * v; }
         int total = 0;
         for (int i = 1; i <= 3; i++) { total += square(i); }",
    );
    assert_eq!(script.functions.len(), 1);
    assert_eq!(script.body.len(), 2);
}

#[test]
fn lexer_errors_become_diagnostics() {
    let diagnostic = compile_err("string s = \"open;");
    assert_eq!(diagnostic.code, ErrorCode::E0001);
}

#[test]
fn parse_errors_render_with_line_and_column() {
    let source = "int x = 1;\nif (x) { }";
    let diagnostic = compile_err(source);
    assert_eq!(diagnostic.code, ErrorCode::E2001);

    let rendered = render(&diagnostic, source);
    assert!(rendered.starts_with("error[E2001]"), "{rendered}");
    assert!(rendered.contains("--> test.rill:2:"), "{rendered}");
    assert!(rendered.contains("if (x) { }"), "{rendered}");
}

#[test]
fn flow_keywords_are_checked_at_compile_time() {
    assert_eq!(compile_err("break;").code, ErrorCode::E1008);
    assert_eq!(
        compile_err("int x = 1; switch (x) { case 1: continue; }").code,
        ErrorCode::E1008
    );
    assert_eq!(
        compile_err("void f() { break; } while (true) { f(); }").code,
        ErrorCode::E1008
    );
}

#[test]
fn shadowing_is_rejected_at_compile_time() {
    assert_eq!(
        compile_err("int x = 1; while (true) { int x = 2; break; }").code,
        ErrorCode::E2006
    );
}

#[test]
fn narrowing_compound_assignment_is_rejected() {
    let diagnostic = compile_err("byte b = 5; b += (int)3;");
    assert_eq!(diagnostic.code, ErrorCode::E2008);
    assert!(diagnostic.message.contains("`+=`"), "{}", diagnostic.message);
    assert_eq!(diagnostic.suggestions.len(), 1);
}

#[test]
fn const_needs_a_constant_initializer() {
    assert_eq!(
        compile_err("int n = 2; const int M = n;").code,
        ErrorCode::E2005
    );
}
