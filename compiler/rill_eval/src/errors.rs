//! Runtime errors.
//!
//! Every failure the executor can raise is an [`EvalError`] carrying a
//! structured [`EvalErrorKind`]. Factory functions build the common kinds;
//! the message is always the kind's `Display` text, so callers that only
//! need a string can read `message` directly.
//!
//! # Error Code Ranges (E6xxx)
//!
//! - E6001: arithmetic
//! - E6010–E6019: dynamic type and operator failures
//! - E6020–E6029: name and index access
//! - E6030–E6039: calls
//! - E6040–E6049: cancellation and flow invariants
//! - E6099: uncategorised

use std::fmt;

use rill_diagnostic::{Diagnostic, ErrorCode};
use rill_ir::Span;

/// Structured runtime error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// Integer `/` or `%` with a zero divisor.
    DivisionByZero,
    /// A value did not have the type its slot or operation requires.
    TypeMismatch { expected: String, found: String },
    /// Operator has no runtime meaning for the operand.
    InvalidOperation { op: String, operand: String },
    /// A host operator returned an error.
    HostOperatorFailed { op: String, message: String },
    UndefinedVariable { name: String },
    UndefinedFunction { name: String },
    /// Declaring a name already visible in the runtime chain.
    Redeclaration { name: String },
    /// `extern` without a host value or an initializer.
    ExternMissing { name: String },
    IndexOutOfBounds { index: i64, len: usize },
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    StackOverflow { depth: usize },
    Cancelled,
    /// A flow signal reached a construct that cannot consume it.
    UnexpectedFlow { flow: String, context: &'static str },
    /// A non-void function finished without `return`.
    MissingReturn { name: String },
    Custom { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => f.write_str("division by zero"),
            Self::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {expected}, found {found}")
            }
            Self::InvalidOperation { op, operand } => {
                write!(f, "operator `{op}` cannot be applied to {operand}")
            }
            Self::HostOperatorFailed { op, message } => {
                write!(f, "host operator `{op}` failed: {message}")
            }
            Self::UndefinedVariable { name } => write!(f, "undefined variable `{name}`"),
            Self::UndefinedFunction { name } => write!(f, "undefined function `{name}`"),
            Self::Redeclaration { name } => {
                write!(f, "`{name}` is already declared in an enclosing scope")
            }
            Self::ExternMissing { name } => {
                write!(f, "no value supplied for extern `{name}`")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} is out of bounds for length {len}")
            }
            Self::ArityMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "`{name}` takes {expected} argument{}, but {found} were supplied",
                if *expected == 1 { "" } else { "s" }
            ),
            Self::StackOverflow { depth } => {
                write!(f, "maximum call depth of {depth} exceeded")
            }
            Self::Cancelled => f.write_str("execution was cancelled"),
            Self::UnexpectedFlow { flow, context } => {
                write!(f, "unexpected {flow} signal in {context}")
            }
            Self::MissingReturn { name } => {
                write!(f, "function `{name}` ended without returning a value")
            }
            Self::Custom { message } => f.write_str(message),
        }
    }
}

impl EvalErrorKind {
    /// Map this error kind to its `ErrorCode`.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::DivisionByZero => ErrorCode::E6001,
            Self::TypeMismatch { .. } => ErrorCode::E6010,
            Self::InvalidOperation { .. } => ErrorCode::E6011,
            Self::HostOperatorFailed { .. } => ErrorCode::E6012,
            Self::UndefinedVariable { .. } => ErrorCode::E6020,
            Self::UndefinedFunction { .. } => ErrorCode::E6021,
            Self::Redeclaration { .. } => ErrorCode::E6022,
            Self::ExternMissing { .. } => ErrorCode::E6023,
            Self::IndexOutOfBounds { .. } => ErrorCode::E6025,
            Self::ArityMismatch { .. } => ErrorCode::E6030,
            Self::StackOverflow { .. } => ErrorCode::E6031,
            Self::Cancelled => ErrorCode::E6040,
            Self::UnexpectedFlow { .. } => ErrorCode::E6041,
            Self::MissingReturn { .. } => ErrorCode::E6042,
            Self::Custom { .. } => ErrorCode::E6099,
        }
    }

    fn primary_label(&self) -> &'static str {
        match self {
            Self::DivisionByZero => "divisor is zero",
            Self::TypeMismatch { .. } => "value has the wrong type",
            Self::InvalidOperation { .. } | Self::HostOperatorFailed { .. } => {
                "operator failed here"
            }
            Self::UndefinedVariable { .. } | Self::UndefinedFunction { .. } => "not found",
            Self::Redeclaration { .. } => "declared again here",
            Self::ExternMissing { .. } => "extern declared here",
            Self::IndexOutOfBounds { .. } => "index out of range",
            Self::ArityMismatch { .. } => "called here",
            Self::StackOverflow { .. } => "call exceeds the depth limit",
            Self::Cancelled => "cancelled before this point",
            Self::UnexpectedFlow { .. } => "signal raised here",
            Self::MissingReturn { .. } => "function body ends here",
            Self::Custom { .. } => "error occurred here",
        }
    }
}

/// A runtime error.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory-built
    /// errors.
    pub message: String,
    /// Source location where the error occurred, when known.
    pub span: Option<Span>,
    /// Names of the script functions active when the error was raised,
    /// innermost first.
    pub backtrace: Vec<String>,
}

impl EvalError {
    /// Create an uncategorised error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        EvalError {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            span: None,
            backtrace: Vec::new(),
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
            backtrace: Vec::new(),
        }
    }

    /// Attach a source span unless one is already set.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    /// Attach a backtrace unless one is already set.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: Vec<String>) -> Self {
        if self.backtrace.is_empty() {
            self.backtrace = backtrace;
        }
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.error_code()
    }

    /// Convert to a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code()).with_message(self.message.clone());
        if let Some(span) = self.span {
            diag = diag.with_label(span, self.kind.primary_label());
        }
        for frame in &self.backtrace {
            diag = diag.with_note(format!("in function `{frame}`"));
        }
        diag
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

/// Result of evaluating an expression.
pub type EvalResult<T = rill_ir::Value> = Result<T, EvalError>;

// Arithmetic

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

// Types and operators

#[cold]
pub fn type_mismatch(expected: impl fmt::Display, found: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        found: found.to_string(),
    })
}

#[cold]
pub fn invalid_operation(op: &str, operand: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperation {
        op: op.to_string(),
        operand: operand.to_string(),
    })
}

#[cold]
pub fn host_operator_failed(op: &str, message: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::HostOperatorFailed {
        op: op.to_string(),
        message: message.to_string(),
    })
}

// Names and indexing

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn redeclaration(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Redeclaration {
        name: name.to_string(),
    })
}

#[cold]
pub fn extern_missing(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ExternMissing {
        name: name.to_string(),
    })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

// Calls

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, found: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        found,
    })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth: limit })
}

#[cold]
pub fn missing_return(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingReturn {
        name: name.to_string(),
    })
}

// Flow

#[cold]
pub fn cancelled() -> EvalError {
    EvalError::from_kind(EvalErrorKind::Cancelled)
}

#[cold]
pub fn unexpected_flow(flow: impl fmt::Display, context: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnexpectedFlow {
        flow: flow.to_string(),
        context,
    })
}

#[cfg(test)]
mod tests;
