use pretty_assertions::assert_eq;
use rill_diagnostic::ErrorCode;
use rill_ir::Span;

use super::*;

#[test]
fn factories_set_kind_and_message() {
    let err = division_by_zero();
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    assert_eq!(err.message, "division by zero");
    assert_eq!(err.code(), ErrorCode::E6001);

    let err = arity_mismatch("area", 1, 2);
    assert_eq!(err.message, "`area` takes 1 argument, but 2 were supplied");
    assert_eq!(err.code(), ErrorCode::E6030);
}

#[test]
fn custom_errors_use_the_catch_all_code() {
    let err = EvalError::new("host refused");
    assert_eq!(
        err.kind,
        EvalErrorKind::Custom {
            message: "host refused".to_string()
        }
    );
    assert_eq!(err.code(), ErrorCode::E6099);
}

#[test]
fn first_span_wins() {
    let err = redeclaration("x")
        .with_span(Span::new(4, 5))
        .with_span(Span::new(0, 20));
    assert_eq!(err.span, Some(Span::new(4, 5)));
}

#[test]
fn diagnostic_carries_label_and_backtrace() {
    let err = undefined_variable("total")
        .with_span(Span::new(10, 15))
        .with_backtrace(vec!["inner".to_string(), "outer".to_string()]);
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E6020);
    assert_eq!(diag.message, "undefined variable `total`");
    assert_eq!(diag.primary_span(), Some(Span::new(10, 15)));
    assert_eq!(
        diag.notes,
        vec![
            "in function `inner`".to_string(),
            "in function `outer`".to_string()
        ]
    );
}

#[test]
fn diagnostic_without_span_has_no_labels() {
    let diag = cancelled().to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E6040);
    assert!(diag.labels.is_empty());
}

#[test]
fn flow_and_return_errors_have_distinct_codes() {
    assert_eq!(
        unexpected_flow("break", "function body").code(),
        ErrorCode::E6041
    );
    assert_eq!(missing_return("f").code(), ErrorCode::E6042);
}
