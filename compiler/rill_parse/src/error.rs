//! Parse error types.
//!
//! Translation stops at the first error. Each error carries the span of
//! the offending token or expression and maps to an [`ErrorCode`] for
//! rendering through `rill_diagnostic`.

use std::fmt;

use rill_diagnostic::{Diagnostic, ErrorCode};
use rill_ir::Span;

/// Structured parse error kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    // === Syntax ===
    /// Expected a specific token, found something else.
    UnexpectedToken { expected: String, found: String },
    /// Expected an expression.
    ExpectedExpression { found: String },
    /// Expected an identifier.
    ExpectedIdentifier { found: String },
    /// Expected a type.
    ExpectedType { found: String },
    /// Input ended inside `{ ... }`.
    UnclosedDelimiter { delimiter: &'static str },
    /// Malformed function declaration.
    InvalidFunction { reason: String },
    /// Keyword used where it cannot appear (`else` without `if`).
    MisplacedKeyword {
        keyword: &'static str,
        reason: &'static str,
    },
    /// `break` or `continue` with no enclosing construct to leave.
    IllegalFlow { keyword: &'static str },
    /// `extern`/`global` below the top-level scope.
    TopLevelOnly { keyword: &'static str },
    /// The same case label twice in one switch.
    DuplicateCaseLabel { label: String },
    /// More than one `default` section.
    DuplicateDefault,
    /// Expression that has no effect as a statement.
    NotAStatement,

    // === Types and scoping ===
    TypeMismatch { expected: String, found: String },
    UnknownType { name: String },
    UnknownIdentifier { name: String },
    UnknownFunction { name: String },
    UnknownMember { member: String, ty: String },
    ArgumentCount {
        name: String,
        expected: usize,
        found: usize,
    },
    /// `const` initializer (or case label) that is not a literal.
    NotConstant { context: &'static str },
    /// Name already visible in this or an enclosing scope.
    DuplicateDeclaration { name: String },
    AssignToConstant { name: String },
    UnsupportedOperator {
        op: String,
        lhs: String,
        rhs: Option<String>,
    },
    /// `return` inconsistent with the enclosing return type.
    InvalidReturn { reason: String },
    /// Integer literal that does not fit its target type.
    LiteralOutOfRange { literal: String, target: String },
    NotAssignable,
}

impl ParseErrorKind {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnexpectedToken { .. } | Self::NotAStatement => ErrorCode::E1001,
            Self::ExpectedExpression { .. } => ErrorCode::E1002,
            Self::ExpectedIdentifier { .. } => ErrorCode::E1004,
            Self::UnclosedDelimiter { .. } => ErrorCode::E1003,
            Self::ExpectedType { .. } => ErrorCode::E1005,
            Self::InvalidFunction { .. } => ErrorCode::E1006,
            Self::MisplacedKeyword { .. } => ErrorCode::E1007,
            Self::IllegalFlow { .. } => ErrorCode::E1008,
            Self::TopLevelOnly { .. } => ErrorCode::E1009,
            Self::DuplicateCaseLabel { .. } | Self::DuplicateDefault => ErrorCode::E1010,
            Self::TypeMismatch { .. } => ErrorCode::E2001,
            Self::UnknownType { .. } => ErrorCode::E2002,
            Self::UnknownIdentifier { .. }
            | Self::UnknownFunction { .. }
            | Self::UnknownMember { .. } => ErrorCode::E2003,
            Self::ArgumentCount { .. } => ErrorCode::E2004,
            Self::NotConstant { .. } => ErrorCode::E2005,
            Self::DuplicateDeclaration { .. } => ErrorCode::E2006,
            Self::AssignToConstant { .. } => ErrorCode::E2007,
            Self::UnsupportedOperator { .. } => ErrorCode::E2008,
            Self::InvalidReturn { .. } => ErrorCode::E2009,
            Self::LiteralOutOfRange { .. } => ErrorCode::E2010,
            Self::NotAssignable => ErrorCode::E2011,
        }
    }

    /// Short label for the primary span.
    fn label(&self) -> &'static str {
        match self {
            Self::UnexpectedToken { .. } => "unexpected token",
            Self::ExpectedExpression { .. } => "expected an expression",
            Self::ExpectedIdentifier { .. } => "expected an identifier",
            Self::ExpectedType { .. } => "expected a type",
            Self::UnclosedDelimiter { .. } => "unclosed delimiter",
            Self::InvalidFunction { .. } => "invalid function",
            Self::MisplacedKeyword { .. } => "not allowed here",
            Self::IllegalFlow { .. } => "nothing to leave here",
            Self::TopLevelOnly { .. } => "only allowed at the top level",
            Self::DuplicateCaseLabel { .. } => "duplicate label",
            Self::DuplicateDefault => "second default",
            Self::NotAStatement => "not a statement",
            Self::TypeMismatch { .. } => "mismatched types",
            Self::UnknownType { .. } => "unknown type",
            Self::UnknownIdentifier { .. } => "not found in this scope",
            Self::UnknownFunction { .. } => "function not found",
            Self::UnknownMember { .. } => "no such member",
            Self::ArgumentCount { .. } => "wrong number of arguments",
            Self::NotConstant { .. } => "not a literal",
            Self::DuplicateDeclaration { .. } => "already declared",
            Self::AssignToConstant { .. } => "cannot assign",
            Self::UnsupportedOperator { .. } => "operator not supported",
            Self::InvalidReturn { .. } => "invalid return",
            Self::LiteralOutOfRange { .. } => "out of range",
            Self::NotAssignable => "not assignable",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::ExpectedExpression { found } => write!(f, "expected expression, found {found}"),
            Self::ExpectedIdentifier { found } => write!(f, "expected identifier, found {found}"),
            Self::ExpectedType { found } => write!(f, "expected type, found {found}"),
            Self::UnclosedDelimiter { delimiter } => {
                write!(f, "unclosed `{delimiter}`: input ended before its match")
            }
            Self::InvalidFunction { reason } => write!(f, "invalid function declaration: {reason}"),
            Self::MisplacedKeyword { keyword, reason } => write!(f, "`{keyword}` {reason}"),
            Self::IllegalFlow { keyword } => {
                if *keyword == "continue" {
                    write!(f, "`continue` outside of a loop")
                } else {
                    write!(f, "`{keyword}` outside of a loop or switch")
                }
            }
            Self::TopLevelOnly { keyword } => {
                write!(f, "`{keyword}` declarations are only allowed at the top level")
            }
            Self::DuplicateCaseLabel { label } => write!(f, "duplicate case label `{label}`"),
            Self::DuplicateDefault => write!(f, "switch has more than one `default` section"),
            Self::NotAStatement => write!(
                f,
                "only calls, assignments and increments can be used as statements"
            ),
            Self::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected `{expected}`, found `{found}`")
            }
            Self::UnknownType { name } => write!(f, "unknown type `{name}`"),
            Self::UnknownIdentifier { name } => write!(f, "unknown identifier `{name}`"),
            Self::UnknownFunction { name } => write!(f, "unknown function `{name}`"),
            Self::UnknownMember { member, ty } => write!(f, "`{ty}` has no member `{member}`"),
            Self::ArgumentCount {
                name,
                expected,
                found,
            } => {
                let word = if *expected == 1 { "argument" } else { "arguments" };
                write!(f, "`{name}` takes {expected} {word}, found {found}")
            }
            Self::NotConstant { context } => write!(f, "{context} must be a literal"),
            Self::DuplicateDeclaration { name } => {
                write!(f, "`{name}` is already declared in this or an enclosing scope")
            }
            Self::AssignToConstant { name } => write!(f, "cannot assign to constant `{name}`"),
            Self::UnsupportedOperator { op, lhs, rhs: Some(rhs) } => {
                write!(f, "operator `{op}` cannot be applied to `{lhs}` and `{rhs}`")
            }
            Self::UnsupportedOperator { op, lhs, rhs: None } => {
                write!(f, "operator `{op}` cannot be applied to `{lhs}`")
            }
            Self::InvalidReturn { reason } => write!(f, "invalid return: {reason}"),
            Self::LiteralOutOfRange { literal, target } => {
                write!(f, "literal `{literal}` is out of range for `{target}`")
            }
            Self::NotAssignable => write!(f, "left-hand side is not assignable"),
        }
    }
}

/// A parse error with its location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub help: Vec<String>,
}

impl ParseError {
    #[cold]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError {
            kind,
            span,
            help: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.error_code()
    }

    #[cold]
    pub fn type_mismatch(expected: impl fmt::Display, found: impl fmt::Display, span: Span) -> Self {
        ParseError::new(
            ParseErrorKind::TypeMismatch {
                expected: expected.to_string(),
                found: found.to_string(),
            },
            span,
        )
    }

    #[cold]
    pub fn unexpected(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected: expected.into(),
                found: found.into(),
            },
            span,
        )
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .with_label(self.span, self.kind.label());
        for help in &self.help {
            diag = diag.with_suggestion(help.clone());
        }
        diag
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {:?}", self.kind, self.span)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn codes_by_phase() {
        let flow = ParseErrorKind::IllegalFlow { keyword: "break" };
        assert_eq!(flow.error_code(), ErrorCode::E1008);
        let dup = ParseErrorKind::DuplicateDeclaration {
            name: "x".to_string(),
        };
        assert_eq!(dup.error_code(), ErrorCode::E2006);
    }

    #[test]
    fn messages() {
        assert_eq!(
            ParseErrorKind::IllegalFlow {
                keyword: "continue"
            }
            .to_string(),
            "`continue` outside of a loop"
        );
        assert_eq!(
            ParseErrorKind::UnsupportedOperator {
                op: "+=".to_string(),
                lhs: "byte".to_string(),
                rhs: Some("int".to_string()),
            }
            .to_string(),
            "operator `+=` cannot be applied to `byte` and `int`"
        );
    }

    #[test]
    fn diagnostic_carries_span_and_help() {
        let err = ParseError::type_mismatch("bool", "int", Span::new(3, 4))
            .with_help("compare against zero");
        let diag = err.to_diagnostic();
        assert_eq!(diag.code, ErrorCode::E2001);
        assert_eq!(diag.primary_span(), Some(Span::new(3, 4)));
        assert_eq!(diag.suggestions, vec!["compare against zero".to_string()]);
    }
}
