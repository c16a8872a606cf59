//! Control flow: `if`, loops, `switch`, `break`, `continue`, `return`.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use rill_ir::ast::{
    Block, ConditionalBranch, Conversion, ControlKind, ControlStatement, Expr, ForEachLoop,
    ForLoop, IfStatement, ReturnStatement, Stmt, SwitchStatement, WhileLoop,
};
use rill_ir::{Keyword, Literal, PrimitiveKind, Sep, Span, ValueType};

use super::decl::constant_value;
use crate::error::{ParseError, ParseErrorKind};
use crate::{Parser, ScopeFlags};

impl Parser<'_> {
    /// `( bool-expr )`
    fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        self.cursor.expect_sep(Sep::LParen)?;
        let cond = self.parse_expr()?;
        let cond = self.coerce_expr(cond, &ValueType::BOOL)?;
        self.cursor.expect_sep(Sep::RParen)?;
        Ok(cond)
    }

    /// `if (c) s [else if (c) s]* [else s]`, flattened into branches.
    pub(crate) fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span();
        let mut branches = Vec::new();
        let mut otherwise = None;
        loop {
            self.cursor.expect_keyword(Keyword::If)?;
            let condition = self.parse_condition()?;
            let body = self.parse_embedded()?;
            branches.push(ConditionalBranch { condition, body });
            if !self.cursor.eat_keyword(Keyword::Else) {
                break;
            }
            if !self.cursor.check_keyword(Keyword::If) {
                otherwise = Some(self.parse_embedded()?);
                break;
            }
        }
        Ok(Stmt::If(IfStatement {
            branches,
            otherwise,
            span: self.span_from(start),
        }))
    }

    pub(crate) fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect_keyword(Keyword::While)?;
        let condition = self.parse_condition()?;
        let body = self.in_scope(ScopeFlags::LOOP, Self::parse_embedded)?;
        Ok(Stmt::While(WhileLoop {
            condition,
            body,
            span: self.span_from(start),
        }))
    }

    /// `for (init; cond; incr) body`. Initializer variables live in a loop
    /// scope that encloses the body.
    pub(crate) fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect_keyword(Keyword::For)?;
        self.cursor.expect_sep(Sep::LParen)?;
        self.in_scope(ScopeFlags::LOOP, |p| {
            let mut initializers = Vec::new();
            if !p.cursor.check_sep(Sep::Semicolon) {
                if p.at_declaration_start() {
                    initializers.push(p.parse_local_declaration()?);
                } else {
                    initializers = p.parse_statement_list()?;
                }
            }
            p.cursor.expect_sep(Sep::Semicolon)?;

            let condition = if p.cursor.check_sep(Sep::Semicolon) {
                None
            } else {
                let cond = p.parse_expr()?;
                Some(p.coerce_expr(cond, &ValueType::BOOL)?)
            };
            p.cursor.expect_sep(Sep::Semicolon)?;

            let increments = if p.cursor.check_sep(Sep::RParen) {
                Vec::new()
            } else {
                p.parse_statement_list()?
            };
            p.cursor.expect_sep(Sep::RParen)?;

            let body = p.parse_embedded()?;
            Ok(Stmt::For(ForLoop {
                initializers,
                condition,
                increments,
                body,
                span: p.span_from(start),
            }))
        })
    }

    /// Comma-separated simple statements in a `for` header.
    fn parse_statement_list(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = vec![self.parse_simple_statement()?];
        while self.cursor.eat_sep(Sep::Comma) {
            statements.push(self.parse_simple_statement()?);
        }
        Ok(statements)
    }

    /// `foreach (T x in container) body`
    pub(crate) fn parse_foreach(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect_keyword(Keyword::Foreach)?;
        self.cursor.expect_sep(Sep::LParen)?;
        let ty_span = self.cursor.current_span();
        let variable_ty = self.parse_type()?;
        let (variable, variable_span) = self.cursor.expect_ident()?;
        self.cursor.expect_keyword(Keyword::In)?;
        let container = self.parse_expr()?;
        self.cursor.expect_sep(Sep::RParen)?;

        let Some(element) = container.ty.enumerable_element() else {
            return Err(ParseError::new(
                ParseErrorKind::UnsupportedOperator {
                    op: "foreach".to_string(),
                    lhs: container.ty.to_string(),
                    rhs: None,
                },
                container.span,
            )
            .with_help("only lists and strings can be enumerated"));
        };
        if !variable_ty.is_assignable_from(&element) {
            return Err(ParseError::type_mismatch(&variable_ty, &element, ty_span));
        }
        let conversion = Conversion::between(&element, &variable_ty);

        let body = self.in_scope(ScopeFlags::LOOP, |p| {
            p.declare_variable(variable, variable_ty.clone(), variable_span)?;
            p.parse_embedded()
        })?;
        Ok(Stmt::ForEach(ForEachLoop {
            variable,
            variable_ty,
            conversion,
            container,
            body,
            span: self.span_from(start),
        }))
    }

    /// `switch (subject) { (case L: | default:)+ statements ... }`
    ///
    /// Labels are literals of exactly the subject's type. There is no
    /// fallthrough: a section ends where the next label list starts.
    pub(crate) fn parse_switch(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect_keyword(Keyword::Switch)?;
        self.cursor.expect_sep(Sep::LParen)?;
        let subject = self.parse_expr()?;
        self.cursor.expect_sep(Sep::RParen)?;
        if !is_switchable(&subject.ty) {
            return Err(ParseError::type_mismatch(
                "an integral, char, bool or string value",
                &subject.ty,
                subject.span,
            ));
        }
        let open = self.cursor.expect_sep(Sep::LBrace)?;

        let (cases, sections, default) = self.in_scope(ScopeFlags::SWITCH, |p| {
            let mut cases: FxHashMap<Literal, usize> = FxHashMap::default();
            let mut sections: Vec<Block> = Vec::new();
            let mut default: Option<usize> = None;

            while !p.cursor.check_sep(Sep::RBrace) {
                let index = sections.len();
                let section_start = p.cursor.current_span();
                let mut labels: SmallVec<[(Literal, Span); 4]> = SmallVec::new();
                let mut has_default = false;
                loop {
                    if p.cursor.eat_keyword(Keyword::Case) {
                        labels.push(p.parse_case_label(&subject.ty)?);
                    } else if p.cursor.check_keyword(Keyword::Default) {
                        let span = p.cursor.current_span();
                        p.cursor.advance();
                        p.cursor.expect_sep(Sep::Colon)?;
                        if has_default || default.is_some() {
                            return Err(ParseError::new(ParseErrorKind::DuplicateDefault, span));
                        }
                        has_default = true;
                    } else {
                        break;
                    }
                }
                if labels.is_empty() && !has_default {
                    return Err(p.cursor.unexpected("`case`, `default` or `}`"));
                }

                let body = p.in_scope(ScopeFlags::empty(), |p| {
                    let mut statements = Vec::new();
                    while !p.cursor.check_keyword(Keyword::Case)
                        && !p.cursor.check_keyword(Keyword::Default)
                        && !p.cursor.check_sep(Sep::RBrace)
                    {
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
                    Ok(statements)
                })?;

                for (label, span) in labels {
                    if cases.contains_key(&label) {
                        return Err(ParseError::new(
                            ParseErrorKind::DuplicateCaseLabel {
                                label: label.to_string(),
                            },
                            span,
                        ));
                    }
                    cases.insert(label, index);
                }
                if has_default {
                    default = Some(index);
                }
                sections.push(Block::new(body, p.span_from(section_start)));
            }
            Ok((cases, sections, default))
        })?;
        self.cursor.expect_sep(Sep::RBrace)?;

        Ok(Stmt::Switch(SwitchStatement {
            subject,
            cases,
            sections,
            default,
            span: self.span_from(start),
        }))
    }

    /// Label after `case`, brought to the subject type and folded.
    fn parse_case_label(&mut self, subject: &ValueType) -> Result<(Literal, Span), ParseError> {
        let label = self.parse_expr()?;
        let span = label.span;
        let label = self.coerce_expr(label, subject)?;
        let Some(literal) = constant_value(&label) else {
            return Err(ParseError::new(
                ParseErrorKind::NotConstant {
                    context: "case label",
                },
                span,
            ));
        };
        self.cursor.expect_sep(Sep::Colon)?;
        Ok((literal, span))
    }

    /// `break;` or `continue;`
    pub(crate) fn parse_control(&mut self) -> Result<Stmt, ParseError> {
        let span = self.cursor.current_span();
        let kind = if self.cursor.eat_keyword(Keyword::Break) {
            if !self.ctx.in_breakable() {
                return Err(ParseError::new(
                    ParseErrorKind::IllegalFlow { keyword: "break" },
                    span,
                ));
            }
            ControlKind::Break
        } else {
            self.cursor.expect_keyword(Keyword::Continue)?;
            if !self.ctx.in_loop() {
                return Err(ParseError::new(
                    ParseErrorKind::IllegalFlow {
                        keyword: "continue",
                    },
                    span,
                ));
            }
            ControlKind::Continue
        };
        self.cursor.expect_sep(Sep::Semicolon)?;
        Ok(Stmt::Control(ControlStatement { kind, span }))
    }

    /// `return;` or `return value;`, checked against the enclosing
    /// function's (or the script's) return type.
    pub(crate) fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect_keyword(Keyword::Return)?;
        let expected = self.ctx.return_type().clone();
        if self.cursor.eat_sep(Sep::Semicolon) {
            if !expected.is_void() {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidReturn {
                        reason: format!("expected a value of type `{expected}`"),
                    },
                    start,
                ));
            }
            return Ok(Stmt::Return(ReturnStatement {
                value: None,
                conversion: Conversion::Identity,
                span: start,
            }));
        }

        let value = self.parse_expr()?;
        if expected.is_void() {
            return Err(ParseError::new(
                ParseErrorKind::InvalidReturn {
                    reason: "cannot return a value from a `void` context".to_string(),
                },
                value.span,
            ));
        }
        let (value, conversion) = self.coerce(value, &expected)?;
        self.cursor.expect_sep(Sep::Semicolon)?;
        Ok(Stmt::Return(ReturnStatement {
            value: Some(value),
            conversion,
            span: self.span_from(start),
        }))
    }
}

fn is_switchable(ty: &ValueType) -> bool {
    match ty {
        ValueType::String => true,
        ValueType::Primitive(kind) => {
            kind.is_integral() || matches!(kind, PrimitiveKind::Bool | PrimitiveKind::Char)
        }
        _ => false,
    }
}
