//! Script driver and function declarations.

use rustc_hash::FxHashMap;
use tracing::debug;

use rill_ir::ast::{Block, FunctionDecl, Param, Stmt};
use rill_ir::{Name, Sep, Span, TokenKind, TypeKeyword};

use crate::error::{ParseError, ParseErrorKind};
use crate::{FunctionSignature, Parser};

/// A function found by the signature pass, body not yet translated.
struct FunctionStub {
    name: Name,
    /// Token position of the return type.
    start: usize,
    /// Token position of the body's `{`.
    body: usize,
    /// Token position just past the body's `}`.
    end: usize,
}

type Translated = (FxHashMap<Name, FunctionDecl>, Vec<Stmt>);

impl Parser<'_> {
    /// Translate the whole token list.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(crate) fn parse_script(&mut self) -> Result<Translated, ParseError> {
        let stubs = self.collect_functions()?;
        let skip: FxHashMap<usize, usize> = stubs.iter().map(|s| (s.start, s.end)).collect();

        self.cursor.set_position(0);
        let mut body = Vec::new();
        while !self.cursor.is_at_end() {
            if let Some(&end) = skip.get(&self.cursor.position()) {
                self.cursor.set_position(end);
                continue;
            }
            if let Some(stmt) = self.parse_statement()? {
                body.push(stmt);
            }
        }
        debug!(statements = body.len(), "translated top level");

        let mut functions = FxHashMap::default();
        for stub in &stubs {
            let decl = self.parse_function_body(stub)?;
            functions.insert(stub.name, decl);
        }
        Ok((functions, body))
    }

    /// Signature pass: record every top-level function and skip its body.
    ///
    /// Only statement starts at brace and paren depth zero are candidates,
    /// so a function nested in a block is left for the statement pass to
    /// reject.
    fn collect_functions(&mut self) -> Result<Vec<FunctionStub>, ParseError> {
        let mut stubs = Vec::new();
        let mut braces = 0usize;
        let mut parens = 0usize;
        let mut at_statement_start = true;

        self.cursor.set_position(0);
        while !self.cursor.is_at_end() {
            if at_statement_start && braces == 0 && parens == 0 {
                if let Some(stub) = self.try_function_header()? {
                    self.cursor.set_position(stub.end);
                    stubs.push(stub);
                    continue;
                }
            }
            at_statement_start = false;
            match self.cursor.advance() {
                TokenKind::Separator(Sep::LBrace) => braces += 1,
                TokenKind::Separator(Sep::RBrace) => {
                    braces = braces.saturating_sub(1);
                    at_statement_start = braces == 0 && parens == 0;
                }
                TokenKind::Separator(Sep::LParen) => parens += 1,
                TokenKind::Separator(Sep::RParen) => parens = parens.saturating_sub(1),
                TokenKind::Separator(Sep::Semicolon) => {
                    at_statement_start = braces == 0 && parens == 0;
                }
                _ => {}
            }
        }
        Ok(stubs)
    }

    /// Whether the cursor could start a return type.
    fn at_type_token(&self) -> bool {
        match self.cursor.current_kind() {
            TokenKind::Type(TypeKeyword::Math) => false,
            TokenKind::Type(_) => !self.cursor.peek_is_sep(1, Sep::Dot),
            TokenKind::Ident(name) => self.host.lookup_type(self.text(*name)).is_some(),
            _ => false,
        }
    }

    /// `T name(params) {` at the cursor. Rewinds and returns `None` when
    /// the tokens are not a function header.
    fn try_function_header(&mut self) -> Result<Option<FunctionStub>, ParseError> {
        let start = self.cursor.position();
        let start_span = self.cursor.current_span();
        if !self.at_type_token() {
            return Ok(None);
        }
        let Ok(return_type) = self.parse_type() else {
            self.cursor.set_position(start);
            return Ok(None);
        };
        let is_header = matches!(self.cursor.current_kind(), TokenKind::Ident(_))
            && self.cursor.peek_is_sep(1, Sep::LParen);
        if !is_header {
            self.cursor.set_position(start);
            return Ok(None);
        }
        let (name, name_span) = self.cursor.expect_ident()?;
        let text = self.text(name);
        if text == "print" {
            return Err(ParseError::new(
                ParseErrorKind::InvalidFunction {
                    reason: "`print` is a built-in function".to_string(),
                },
                name_span,
            ));
        }
        if self.functions.contains_key(&name) {
            return Err(self.duplicate(name, name_span));
        }

        let params = self.parse_params()?;
        if !self.cursor.check_sep(Sep::LBrace) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidFunction {
                    reason: format!("expected a body for `{text}`"),
                },
                self.cursor.current_span(),
            ));
        }
        let body = self.cursor.position();
        self.skip_braced()?;
        let end = self.cursor.position();

        debug!(function = text, params = params.len(), "collected function signature");
        self.functions.insert(
            name,
            FunctionSignature {
                params,
                return_type,
                span: start_span.merge(name_span),
            },
        );
        Ok(Some(FunctionStub {
            name,
            start,
            body,
            end,
        }))
    }

    /// `( T a, T b )`
    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.cursor.expect_sep(Sep::LParen)?;
        let mut params: Vec<Param> = Vec::new();
        if !self.cursor.check_sep(Sep::RParen) {
            loop {
                let ty_span = self.cursor.current_span();
                let ty = self.parse_type()?;
                if ty.is_void() {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidFunction {
                            reason: "parameters cannot have type `void`".to_string(),
                        },
                        ty_span,
                    ));
                }
                let (name, span) = self.cursor.expect_ident()?;
                if params.iter().any(|p| p.name == name) {
                    return Err(self.duplicate(name, span));
                }
                params.push(Param { name, ty, span });
                if !self.cursor.eat_sep(Sep::Comma) {
                    break;
                }
            }
        }
        self.cursor.expect_sep(Sep::RParen)?;
        Ok(params)
    }

    /// Skip a `{ ... }` group, nested groups included.
    fn skip_braced(&mut self) -> Result<(), ParseError> {
        let open = self.cursor.current_span();
        let mut depth = 0usize;
        loop {
            match self.cursor.current_kind() {
                TokenKind::Separator(Sep::LBrace) => depth += 1,
                TokenKind::Separator(Sep::RBrace) => {
                    depth -= 1;
                    if depth == 0 {
                        self.cursor.advance();
                        return Ok(());
                    }
                }
                TokenKind::Eof => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnclosedDelimiter { delimiter: "{" },
                        open,
                    ))
                }
                _ => {}
            }
            self.cursor.advance();
        }
    }

    /// Body pass: translate one function with the top-level scope complete.
    fn parse_function_body(&mut self, stub: &FunctionStub) -> Result<FunctionDecl, ParseError> {
        let Some(signature) = self.functions.get(&stub.name).cloned() else {
            return Err(ParseError::new(
                ParseErrorKind::UnknownFunction {
                    name: self.text(stub.name).to_string(),
                },
                Span::DUMMY,
            ));
        };
        self.cursor.set_position(stub.body);
        self.ctx.push_function(signature.return_type.clone());
        let body = self.parse_function_scope(&signature.params);
        self.ctx.pop();
        let body = body?;

        Ok(FunctionDecl {
            name: stub.name,
            span: signature.span.merge(body.span),
            params: signature.params,
            return_type: signature.return_type,
            body,
        })
    }

    fn parse_function_scope(&mut self, params: &[Param]) -> Result<Block, ParseError> {
        for param in params {
            self.declare_variable(param.name, param.ty.clone(), param.span)?;
        }
        self.parse_block()
    }
}
