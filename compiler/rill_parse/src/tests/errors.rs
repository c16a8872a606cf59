use pretty_assertions::assert_eq;
use rill_diagnostic::ErrorCode;
use rill_ir::{BinaryOp, HostError, HostObject, HostTypeRegistry, HostValue, Span, Value, ValueType};

use super::{err_kind, parse_err, parse_with};
use crate::{ParseErrorKind, ParseOptions};

#[test]
fn narrowing_an_int_expression_is_rejected() {
    let err = parse_err("byte b = 5; b += (int)3;");
    assert_eq!(err.code(), ErrorCode::E2008);
    assert_eq!(
        err.kind,
        ParseErrorKind::UnsupportedOperator {
            op: "+=".to_string(),
            lhs: "byte".to_string(),
            rhs: Some("int".to_string()),
        }
    );
    assert_eq!(err.help.len(), 1);
}

#[test]
fn char_increments_but_rejects_compound_add() {
    assert!(parse_with("char c = 'a'; c++; c--;", &ParseOptions::default()).is_ok());
    let err = parse_err("char c = 'a'; c += 1;");
    assert_eq!(err.code(), ErrorCode::E2008);
}

#[test]
fn out_of_range_literal() {
    assert_eq!(
        err_kind("byte b = 300;"),
        ParseErrorKind::LiteralOutOfRange {
            literal: "300".to_string(),
            target: "byte".to_string(),
        }
    );
}

#[test]
fn implicit_narrowing_is_a_mismatch() {
    let err = parse_err("long l = 1; int i = l;");
    assert_eq!(err.code(), ErrorCode::E2001);
    assert_eq!(err.span, Span::new(20, 21));
}

#[test]
fn condition_must_be_bool() {
    assert_eq!(
        err_kind("int x = 1; if (x) { }"),
        ParseErrorKind::TypeMismatch {
            expected: "bool".to_string(),
            found: "int".to_string(),
        }
    );
}

#[test]
fn break_outside_loop() {
    let err = parse_err("int x = 0; break;");
    assert_eq!(err.kind, ParseErrorKind::IllegalFlow { keyword: "break" });
    assert_eq!(err.code(), ErrorCode::E1008);
    assert_eq!(err.span, Span::new(11, 16));
}

#[test]
fn continue_in_switch_without_loop() {
    assert_eq!(
        err_kind("int x = 1; switch (x) { case 1: continue; }"),
        ParseErrorKind::IllegalFlow {
            keyword: "continue"
        }
    );
}

#[test]
fn loop_flags_do_not_leak_into_functions() {
    assert_eq!(
        err_kind("void f() { break; } while (true) { f(); }"),
        ParseErrorKind::IllegalFlow { keyword: "break" }
    );
}

#[test]
fn shadowing_is_a_duplicate() {
    assert_eq!(
        err_kind("int x = 1; { int x = 2; }"),
        ParseErrorKind::DuplicateDeclaration {
            name: "x".to_string()
        }
    );
}

#[test]
fn assignment_to_constant() {
    let err = parse_err("const int A = 1; A = 2;");
    assert_eq!(
        err.kind,
        ParseErrorKind::AssignToConstant {
            name: "A".to_string()
        }
    );
    assert_eq!(err.code(), ErrorCode::E2007);
}

#[test]
fn const_needs_literal() {
    assert_eq!(
        err_kind("const int A = 1; const int B = A + 1;"),
        ParseErrorKind::NotConstant {
            context: "constant initializer"
        }
    );
}

#[test]
fn misplaced_keywords() {
    assert_eq!(err_kind("else { }").error_code(), ErrorCode::E1007);
    assert_eq!(err_kind("case 1: break;").error_code(), ErrorCode::E1007);
}

#[test]
fn global_only_at_top_level() {
    assert_eq!(
        err_kind("if (true) { global int g; }"),
        ParseErrorKind::TopLevelOnly { keyword: "global" }
    );
    assert_eq!(
        err_kind("void f() { extern int e; }"),
        ParseErrorKind::TopLevelOnly { keyword: "extern" }
    );
}

#[test]
fn global_type_must_be_persistable() {
    assert_eq!(parse_err("global long g;").code(), ErrorCode::E2001);
}

#[test]
fn unknown_identifier_points_at_name() {
    let err = parse_err("int x = y;");
    assert_eq!(
        err.kind,
        ParseErrorKind::UnknownIdentifier {
            name: "y".to_string()
        }
    );
    assert_eq!(err.span, Span::new(8, 9));
}

#[test]
fn return_must_match_context() {
    assert_eq!(err_kind("return 1;").error_code(), ErrorCode::E2009);
    assert_eq!(err_kind("int f() { return; }").error_code(), ErrorCode::E2009);
    assert_eq!(err_kind("void f() { return 1; }").error_code(), ErrorCode::E2009);
}

#[test]
fn script_return_type_comes_from_options() {
    let options = ParseOptions::default().with_return_type(ValueType::INT);
    assert!(parse_with("return 1;", &options).is_ok());
    assert!(parse_with("return \"no\";", &options).is_err());
}

#[test]
fn duplicate_case_label_and_default() {
    assert_eq!(
        err_kind("int x = 1; switch (x) { case 1: break; case 1: break; }"),
        ParseErrorKind::DuplicateCaseLabel {
            label: "1".to_string()
        }
    );
    assert_eq!(
        err_kind("int x = 1; switch (x) { default: break; default: break; }"),
        ParseErrorKind::DuplicateDefault
    );
}

#[test]
fn case_label_must_be_constant() {
    assert_eq!(
        err_kind("int x = 1; int y = 2; switch (x) { case y: break; }"),
        ParseErrorKind::NotConstant {
            context: "case label"
        }
    );
}

#[test]
fn expression_without_effect() {
    assert_eq!(err_kind("int x = 1; x + 1;"), ParseErrorKind::NotAStatement);
}

#[test]
fn argument_count() {
    assert_eq!(
        err_kind("int f(int a) { return a; } int r = f(1, 2);"),
        ParseErrorKind::ArgumentCount {
            name: "f".to_string(),
            expected: 1,
            found: 2,
        }
    );
}

#[test]
fn nested_function_declaration() {
    assert_eq!(
        err_kind("if (true) { int f() { return 1; } }").error_code(),
        ErrorCode::E1006
    );
}

#[test]
fn unsupported_string_operator() {
    assert_eq!(
        err_kind(r#"string s = "a"; s -= "b";"#).error_code(),
        ErrorCode::E2008
    );
}

#[test]
fn unclosed_block() {
    let err = parse_err("int x = 1; { x = 2;");
    assert_eq!(err.kind, ParseErrorKind::UnclosedDelimiter { delimiter: "{" });
    assert_eq!(err.span, Span::new(11, 12));
}

#[test]
fn missing_semicolon() {
    let err = parse_err("int x = 1 int y = 2;");
    assert_eq!(err.code(), ErrorCode::E1001);
}

#[derive(Debug)]
struct Money(i64);

impl HostObject for Money {
    fn type_name(&self) -> &str {
        "Money"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn render(&self) -> String {
        format!("${}", self.0)
    }
}

fn money_options() -> ParseOptions {
    let mut host = HostTypeRegistry::new();
    let money = host.register_type("Money", || Value::Host(HostValue::new(Money(0))));
    host.register_operator(
        BinaryOp::Add,
        money.clone(),
        money.clone(),
        money,
        |lhs: &Value, rhs: &Value| -> Result<Value, HostError> {
            let cents = |v: &Value| match v {
                Value::Host(h) => h.downcast_ref::<Money>().map(|m| m.0),
                _ => None,
            };
            match (cents(lhs), cents(rhs)) {
                (Some(a), Some(b)) => Ok(Value::Host(HostValue::new(Money(a + b)))),
                _ => Err(HostError::new("expected Money operands")),
            }
        },
    );
    ParseOptions::default().with_host(host)
}

#[test]
fn host_operators_resolve_at_parse_time() {
    let options = money_options();
    assert!(parse_with("Money a; Money b; a += b; Money c = a + b;", &options).is_ok());
    let err = parse_with("Money a; Money b; a -= b;", &options).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2008);
    assert_eq!(err.help.len(), 1);
}

#[test]
fn unknown_host_type() {
    assert_eq!(
        err_kind("int x = 1; Money m;").error_code(),
        ErrorCode::E2003
    );
}
