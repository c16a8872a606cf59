//! Lexer error types.

use std::fmt;

use rill_diagnostic::{Diagnostic, ErrorCode};
use rill_ir::Span;

/// A lexer error. Lexing stops at the first one.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// Missing closing `"`.
    UnterminatedString,
    /// Missing closing `'`, or `''`.
    UnterminatedChar,
    /// `/*` without `*/`.
    UnterminatedComment,
    /// Unknown `\x` escape.
    InvalidEscape { escape_char: char },
    /// Integer too large for `ulong`, or an unparsable real.
    InvalidNumber,
    /// Character that starts no token.
    InvalidCharacter { ch: char },
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { span, kind }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::InvalidCharacter { .. } => ErrorCode::E0002,
            LexErrorKind::InvalidNumber => ErrorCode::E0003,
            LexErrorKind::UnterminatedChar => ErrorCode::E0004,
            LexErrorKind::InvalidEscape { .. } => ErrorCode::E0005,
            LexErrorKind::UnterminatedComment => ErrorCode::E0006,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self.kind {
            LexErrorKind::UnterminatedString => "string starts here",
            LexErrorKind::UnterminatedChar => "character literal starts here",
            LexErrorKind::UnterminatedComment => "comment starts here",
            LexErrorKind::InvalidEscape { .. } => "unknown escape",
            LexErrorKind::InvalidNumber => "invalid number",
            LexErrorKind::InvalidCharacter { .. } => "unexpected character",
        };
        let diag = Diagnostic::error(self.error_code())
            .with_message(self.to_string())
            .with_label(self.span, label);
        match self.kind {
            LexErrorKind::InvalidEscape { .. } => {
                diag.with_note("valid escapes are \\n \\r \\t \\\\ \\\" \\' \\0 and \\uXXXX")
            }
            _ => diag,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexErrorKind::UnterminatedChar => write!(f, "unterminated character literal"),
            LexErrorKind::UnterminatedComment => write!(f, "unterminated block comment"),
            LexErrorKind::InvalidEscape { escape_char } => {
                write!(f, "invalid escape sequence `\\{escape_char}`")
            }
            LexErrorKind::InvalidNumber => write!(f, "invalid numeric literal"),
            LexErrorKind::InvalidCharacter { ch } => write!(f, "unexpected character `{ch}`"),
        }
    }
}

impl std::error::Error for LexError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_lexer_range() {
        let err = LexError::new(LexErrorKind::UnterminatedString, Span::new(0, 3));
        assert_eq!(err.error_code(), ErrorCode::E0001);
        let diag = err.to_diagnostic();
        assert_eq!(diag.primary_span(), Some(Span::new(0, 3)));
        assert_eq!(diag.message, "unterminated string literal");
    }

    #[test]
    fn escape_errors_carry_a_note() {
        let err = LexError::new(LexErrorKind::InvalidEscape { escape_char: 'q' }, Span::new(4, 6));
        let diag = err.to_diagnostic();
        assert_eq!(diag.message, "invalid escape sequence `\\q`");
        assert_eq!(diag.notes.len(), 1);
    }
}
