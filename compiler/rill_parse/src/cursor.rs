//! Token cursor for navigating the token stream.
//!
//! Low-level position tracking and token matching. The lexer never combines
//! `>` with a following `>` or `=`; the cursor recognises `>=`, `>>` and
//! `>>=` by checking that the `>` tokens are adjacent in the source.

use rill_ir::{Keyword, Name, Op, Sep, Span, StringInterner, Token, TokenKind, TokenList};

use crate::error::{ParseError, ParseErrorKind};

/// Cursor over a `TokenList`.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    interner: &'a StringInterner,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Cursor {
            tokens,
            interner,
            pos: 0,
        }
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// Resolve an interned name.
    pub fn text(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Jump to a position previously returned by [`Cursor::position`].
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.tokens.len().saturating_sub(1));
    }

    #[inline]
    fn token_at(&self, pos: usize) -> Option<&'a Token> {
        self.tokens.get(pos)
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        self.peek_kind(0)
    }

    /// Kind of the token `n` positions ahead. Past the end is `Eof`.
    pub fn peek_kind(&self, n: usize) -> &'a TokenKind {
        match self.token_at(self.pos + n) {
            Some(token) => &token.kind,
            None => &TokenKind::Eof,
        }
    }

    pub fn peek_span(&self, n: usize) -> Span {
        self.token_at(self.pos + n)
            .or_else(|| self.token_at(self.tokens.len().saturating_sub(1)))
            .map_or(Span::DUMMY, |t| t.span)
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.peek_span(0)
    }

    pub fn previous_span(&self) -> Span {
        if self.pos == 0 {
            return self.current_span();
        }
        self.token_at(self.pos - 1).map_or(Span::DUMMY, |t| t.span)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Advance one token. Never moves past `Eof`.
    pub fn advance(&mut self) -> &'a TokenKind {
        let kind = self.current_kind();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        kind
    }

    /// Advance `n` tokens.
    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    // === Matching ===

    #[inline]
    pub fn check_op(&self, op: Op) -> bool {
        matches!(self.current_kind(), TokenKind::Operator(o) if *o == op)
    }

    #[inline]
    pub fn check_sep(&self, sep: Sep) -> bool {
        matches!(self.current_kind(), TokenKind::Separator(s) if *s == sep)
    }

    #[inline]
    pub fn check_keyword(&self, kw: Keyword) -> bool {
        matches!(self.current_kind(), TokenKind::Keyword(k) if *k == kw)
    }

    pub fn peek_is_sep(&self, n: usize, sep: Sep) -> bool {
        matches!(self.peek_kind(n), TokenKind::Separator(s) if *s == sep)
    }

    pub fn peek_is_op(&self, n: usize, op: Op) -> bool {
        matches!(self.peek_kind(n), TokenKind::Operator(o) if *o == op)
    }

    pub fn eat_op(&mut self, op: Op) -> bool {
        let found = self.check_op(op);
        if found {
            self.advance();
        }
        found
    }

    pub fn eat_sep(&mut self, sep: Sep) -> bool {
        let found = self.check_sep(sep);
        if found {
            self.advance();
        }
        found
    }

    pub fn eat_keyword(&mut self, kw: Keyword) -> bool {
        let found = self.check_keyword(kw);
        if found {
            self.advance();
        }
        found
    }

    /// The identifier at the cursor, without consuming it.
    pub fn current_ident(&self) -> Option<Name> {
        match self.current_kind() {
            TokenKind::Ident(name) => Some(*name),
            _ => None,
        }
    }

    // === Compound `>` operators ===

    /// Whether tokens `n` and `n + 1` ahead touch in the source.
    fn adjacent(&self, n: usize) -> bool {
        self.peek_span(n).end == self.peek_span(n + 1).start
    }

    /// `>` `>` adjacent, not followed by an adjacent `=`.
    pub fn is_shift_right(&self) -> bool {
        self.peek_is_op(0, Op::Gt)
            && self.peek_is_op(1, Op::Gt)
            && self.adjacent(0)
            && !self.is_shift_right_assign()
    }

    /// `>` `>` `=` all adjacent.
    pub fn is_shift_right_assign(&self) -> bool {
        self.peek_is_op(0, Op::Gt)
            && self.peek_is_op(1, Op::Gt)
            && self.peek_is_op(2, Op::Assign)
            && self.adjacent(0)
            && self.adjacent(1)
    }

    /// `>` `=` adjacent.
    pub fn is_greater_equal(&self) -> bool {
        self.peek_is_op(0, Op::Gt) && self.peek_is_op(1, Op::Assign) && self.adjacent(0)
    }

    // === Expectations ===

    pub fn expect_sep(&mut self, sep: Sep) -> Result<Span, ParseError> {
        if self.check_sep(sep) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.unexpected(format!("`{}`", sep.as_str())))
        }
    }

    pub fn expect_op(&mut self, op: Op) -> Result<Span, ParseError> {
        if self.check_op(op) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.unexpected(format!("`{}`", op.as_str())))
        }
    }

    pub fn expect_keyword(&mut self, kw: Keyword) -> Result<Span, ParseError> {
        if self.check_keyword(kw) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.unexpected(format!("`{}`", kw.as_str())))
        }
    }

    pub fn expect_ident(&mut self) -> Result<(Name, Span), ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            let span = self.current_span();
            self.advance();
            Ok((*name, span))
        } else {
            Err(self.expected_ident_error())
        }
    }

    /// "expected X, found <current token>" at the cursor.
    #[cold]
    #[inline(never)]
    pub fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::unexpected(expected, self.current_kind().describe(), self.current_span())
    }

    #[cold]
    #[inline(never)]
    fn expected_ident_error(&self) -> ParseError {
        ParseError::new(
            ParseErrorKind::ExpectedIdentifier {
                found: self.current_kind().describe(),
            },
            self.current_span(),
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "tests")]

    use super::*;
    use rill_ir::Token;

    fn tokens(kinds: &[(TokenKind, u32, u32)]) -> TokenList {
        let mut list = TokenList::new();
        for (kind, start, end) in kinds {
            list.push(Token::new(kind.clone(), Span::new(*start, *end)));
        }
        let end = kinds.last().map_or(0, |k| k.2);
        list.finish(end);
        list
    }

    #[test]
    fn adjacent_gt_tokens_compose() {
        let interner = StringInterner::new();
        let list = tokens(&[
            (TokenKind::Operator(Op::Gt), 0, 1),
            (TokenKind::Operator(Op::Gt), 1, 2),
            (TokenKind::Operator(Op::Assign), 2, 3),
        ]);
        let cursor = Cursor::new(&list, &interner);
        assert!(cursor.is_shift_right_assign());
        assert!(!cursor.is_shift_right());
        assert!(!cursor.is_greater_equal());
    }

    #[test]
    fn separated_gt_tokens_do_not_compose() {
        let interner = StringInterner::new();
        let list = tokens(&[
            (TokenKind::Operator(Op::Gt), 0, 1),
            (TokenKind::Operator(Op::Gt), 2, 3),
        ]);
        let cursor = Cursor::new(&list, &interner);
        assert!(!cursor.is_shift_right());
    }

    #[test]
    fn advance_stops_at_eof() {
        let interner = StringInterner::new();
        let list = tokens(&[(TokenKind::Separator(Sep::Semicolon), 0, 1)]);
        let mut cursor = Cursor::new(&list, &interner);
        cursor.advance();
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.current_span(), Span::point(1));
    }

    #[test]
    fn expect_reports_found_token() {
        let interner = StringInterner::new();
        let list = tokens(&[(TokenKind::Separator(Sep::Comma), 4, 5)]);
        let mut cursor = Cursor::new(&list, &interner);
        let err = cursor.expect_sep(Sep::Semicolon).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnexpectedToken {
                expected: "`;`".to_string(),
                found: "`,`".to_string(),
            }
        );
        assert_eq!(err.span, Span::new(4, 5));
    }
}
