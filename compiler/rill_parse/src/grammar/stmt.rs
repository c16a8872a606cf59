//! Statement dispatch and blocks.

use rill_ir::ast::{Block, ExprKind, ExpressionStatement, Stmt};
use rill_ir::{Keyword, Op, Sep, Span, TokenKind, TypeKeyword};
use rill_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::error::{ParseError, ParseErrorKind};
use crate::{Parser, ScopeFlags};

impl Parser<'_> {
    /// Parse one statement.
    ///
    /// Returns `None` for statements that produce no runtime node: the
    /// empty statement `;` and `const` declarations.
    pub fn parse_statement(&mut self) -> Result<Option<Stmt>, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<Option<Stmt>, ParseError> {
        trace!(pos = self.cursor.position(), "statement");
        let stmt = match self.cursor.current_kind() {
            TokenKind::Separator(Sep::Semicolon) => {
                self.cursor.advance();
                return Ok(None);
            }
            TokenKind::Separator(Sep::LBrace) => Stmt::Block(self.parse_block()?),
            TokenKind::Keyword(kw) => match kw {
                Keyword::If => self.parse_if()?,
                Keyword::While => self.parse_while()?,
                Keyword::For => self.parse_for()?,
                Keyword::Foreach => self.parse_foreach()?,
                Keyword::Switch => self.parse_switch()?,
                Keyword::Break | Keyword::Continue => self.parse_control()?,
                Keyword::Return => self.parse_return()?,
                Keyword::Const => {
                    self.parse_const()?;
                    return Ok(None);
                }
                Keyword::Extern | Keyword::Global => self.parse_top_level_declaration()?,
                Keyword::Else => {
                    return Err(self.misplaced("else", "without a matching `if`"));
                }
                Keyword::Case | Keyword::Default => {
                    return Err(self.misplaced(kw.as_str(), "outside of a switch"));
                }
                Keyword::In => return Err(self.misplaced("in", "outside of a foreach header")),
                Keyword::New | Keyword::True | Keyword::False => self.parse_simple_terminated()?,
            },
            TokenKind::Eof => return Err(self.cursor.unexpected("statement")),
            _ if self.at_declaration_start() => {
                let stmt = self.parse_local_declaration()?;
                self.cursor.expect_sep(Sep::Semicolon)?;
                stmt
            }
            _ => self.parse_simple_terminated()?,
        };
        Ok(Some(stmt))
    }

    /// `{ statements }` in a new scope.
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let open = self.cursor.expect_sep(Sep::LBrace)?;
        self.in_scope(ScopeFlags::empty(), |p| {
            let mut statements = Vec::new();
            while !p.cursor.check_sep(Sep::RBrace) {
                if p.cursor.is_at_end() {
                    return Err(ParseError::new(
                        ParseErrorKind::UnclosedDelimiter { delimiter: "{" },
                        open,
                    ));
                }
                if let Some(stmt) = p.parse_statement()? {
                    statements.push(stmt);
                }
            }
            let close = p.cursor.expect_sep(Sep::RBrace)?;
            Ok(Block::new(statements, open.merge(close)))
        })
    }

    /// Body of `if`, `else` or a loop: a block, or one statement in its own
    /// scope.
    pub(crate) fn parse_embedded(&mut self) -> Result<Block, ParseError> {
        if self.cursor.check_sep(Sep::LBrace) {
            return self.parse_block();
        }
        let span = self.cursor.current_span();
        self.in_scope(ScopeFlags::empty(), |p| {
            Ok(match p.parse_statement()? {
                Some(stmt) => Block::single(stmt),
                None => Block::new(Vec::new(), span),
            })
        })
    }

    /// Expression, assignment or increment statement followed by `;`.
    fn parse_simple_terminated(&mut self) -> Result<Stmt, ParseError> {
        let stmt = self.parse_simple_statement()?;
        self.cursor.expect_sep(Sep::Semicolon)?;
        Ok(stmt)
    }

    /// Whether the cursor is at `T name`.
    pub(crate) fn at_declaration_start(&self) -> bool {
        match self.cursor.current_kind() {
            TokenKind::Type(TypeKeyword::Math) => false,
            // `int.MaxValue`, `string.Empty`
            TokenKind::Type(_) => !self.cursor.peek_is_sep(1, Sep::Dot),
            TokenKind::Ident(name) => {
                matches!(self.cursor.peek_kind(1), TokenKind::Ident(_))
                    && self.host.lookup_type(self.text(*name)).is_some()
            }
            _ => false,
        }
    }

    /// Wrap an expression evaluated for its effect.
    pub(crate) fn expression_statement(
        &self,
        expr: rill_ir::ast::Expr,
    ) -> Result<Stmt, ParseError> {
        match expr.kind {
            ExprKind::Call { .. } | ExprKind::Print(_) | ExprKind::ListMethod { .. } => {
                let span = expr.span;
                Ok(Stmt::Expression(ExpressionStatement { expr, span }))
            }
            _ => Err(ParseError::new(ParseErrorKind::NotAStatement, expr.span)),
        }
    }

    #[cold]
    pub(crate) fn misplaced(&self, keyword: &'static str, reason: &'static str) -> ParseError {
        ParseError::new(
            ParseErrorKind::MisplacedKeyword { keyword, reason },
            self.cursor.current_span(),
        )
    }

    /// `++` or `--` at the cursor.
    pub(crate) fn at_increment(&self) -> bool {
        self.cursor.check_op(Op::PlusPlus) || self.cursor.check_op(Op::MinusMinus)
    }

    pub(crate) fn span_from(&self, start: Span) -> Span {
        start.merge(self.cursor.previous_span())
    }
}
