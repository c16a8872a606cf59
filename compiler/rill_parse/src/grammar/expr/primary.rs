//! Primary expressions: literals, names, calls, `new`, static members.

use rill_ir::ast::{Expr, ExprKind, MathFn};
use rill_ir::{
    Keyword, Literal, Name, PrimitiveKind, Sep, Span, TokenKind, TypeKeyword, Value,
    ValueType,
};

use crate::error::{ParseError, ParseErrorKind};
use crate::{Parser, Symbol};

impl Parser<'_> {
    pub(super) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let span = self.cursor.current_span();
        match self.cursor.current_kind() {
            TokenKind::Literal(literal) => {
                self.cursor.advance();
                Ok(Expr::literal(literal.clone(), span))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.cursor.advance();
                Ok(Expr::literal(Literal::Bool(true), span))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.cursor.advance();
                Ok(Expr::literal(Literal::Bool(false), span))
            }
            TokenKind::Keyword(Keyword::New) => self.parse_new(),
            TokenKind::Ident(name) => {
                let name = *name;
                self.cursor.advance();
                if self.cursor.check_sep(Sep::LParen) {
                    self.parse_call(name, span)
                } else {
                    self.resolve_name(name, span)
                }
            }
            TokenKind::Separator(Sep::LParen) => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                let close = self.cursor.expect_sep(Sep::RParen)?;
                Ok(Expr {
                    span: span.merge(close),
                    ..inner
                })
            }
            TokenKind::Type(TypeKeyword::Math) => self.parse_math(),
            TokenKind::Type(ty) if self.cursor.peek_is_sep(1, Sep::Dot) => {
                let ty = *ty;
                self.parse_static_constant(ty)
            }
            other => Err(ParseError::new(
                ParseErrorKind::ExpectedExpression {
                    found: other.describe(),
                },
                span,
            )),
        }
    }

    /// Variable read, or the literal a constant stands for.
    fn resolve_name(&self, name: Name, span: Span) -> Result<Expr, ParseError> {
        match self.ctx.lookup(name) {
            Some(Symbol::Variable(ty)) => Ok(Expr::local(name, ty.clone(), span)),
            Some(Symbol::Constant(literal)) => Ok(Expr::literal(literal.clone(), span)),
            None => {
                let text = self.text(name);
                let mut err = ParseError::new(
                    ParseErrorKind::UnknownIdentifier {
                        name: text.to_string(),
                    },
                    span,
                );
                if self.functions.contains_key(&name) {
                    err = err.with_help(format!("`{text}` is a function; call it with `{text}(...)`"));
                }
                Err(err)
            }
        }
    }

    /// `( args )` after a callee, returning the arguments and the span of
    /// the closing parenthesis.
    pub(super) fn parse_arguments(&mut self) -> Result<(Vec<Expr>, Span), ParseError> {
        self.cursor.expect_sep(Sep::LParen)?;
        let mut args = Vec::new();
        if !self.cursor.check_sep(Sep::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.cursor.eat_sep(Sep::Comma) {
                    break;
                }
            }
        }
        let close = self.cursor.expect_sep(Sep::RParen)?;
        Ok((args, close))
    }

    /// `print(e)` or a call of a script function.
    fn parse_call(&mut self, name: Name, start: Span) -> Result<Expr, ParseError> {
        let (args, close) = self.parse_arguments()?;
        let span = start.merge(close);
        let text = self.text(name);

        if text == "print" {
            let found = args.len();
            let mut args = args.into_iter();
            let (Some(arg), None) = (args.next(), args.next()) else {
                return Err(arg_count("print", 1, found, span));
            };
            if arg.ty.is_void() {
                return Err(ParseError::type_mismatch("a value", &arg.ty, arg.span));
            }
            return Ok(Expr::new(ExprKind::Print(Box::new(arg)), ValueType::Void, span));
        }

        let Some(signature) = self.functions.get(&name) else {
            return Err(ParseError::new(
                ParseErrorKind::UnknownFunction {
                    name: text.to_string(),
                },
                start,
            ));
        };
        if signature.params.len() != args.len() {
            return Err(arg_count(text, signature.params.len(), args.len(), span));
        }
        let return_type = signature.return_type.clone();
        let param_types: Vec<ValueType> = signature.params.iter().map(|p| p.ty.clone()).collect();
        let args = args
            .into_iter()
            .zip(&param_types)
            .map(|(arg, ty)| self.coerce_expr(arg, ty))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Expr::new(
            ExprKind::Call {
                function: name,
                args,
            },
            return_type,
            span,
        ))
    }

    /// `new List<T>()` with an optional `{ items }` initializer.
    fn parse_new(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.expect_keyword(Keyword::New)?;
        let ty_span = self.cursor.current_span();
        let ty = self.parse_type()?;
        let ValueType::List(element) = &ty else {
            return Err(ParseError::unexpected("`List<T>`", format!("type `{ty}`"), ty_span)
                .with_help("only lists can be constructed with `new`"));
        };
        let element = (**element).clone();
        if self.cursor.eat_sep(Sep::LParen) {
            self.cursor.expect_sep(Sep::RParen)?;
        }
        let mut items = Vec::new();
        if self.cursor.eat_sep(Sep::LBrace) {
            while !self.cursor.check_sep(Sep::RBrace) {
                let item = self.parse_expr()?;
                items.push(self.coerce_expr(item, &element)?);
                if !self.cursor.eat_sep(Sep::Comma) {
                    break;
                }
            }
            self.cursor.expect_sep(Sep::RBrace)?;
        }
        Ok(Expr::new(
            ExprKind::NewList { items },
            ty,
            self.span_from(start),
        ))
    }

    /// `Math.PI`, `Math.E` and `Math.F(args)`.
    fn parse_math(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        self.cursor.advance();
        self.cursor.expect_sep(Sep::Dot)?;
        let (member, member_span) = self.cursor.expect_ident()?;
        let text = self.text(member);
        match text {
            "PI" => {
                let pi = Literal::Double(std::f64::consts::PI);
                return Ok(Expr::literal(pi, start.merge(member_span)));
            }
            "E" => {
                let e = Literal::Double(std::f64::consts::E);
                return Ok(Expr::literal(e, start.merge(member_span)));
            }
            _ => {}
        }
        let Some(func) = MathFn::from_name(text) else {
            return Err(ParseError::new(
                ParseErrorKind::UnknownMember {
                    member: text.to_string(),
                    ty: "Math".to_string(),
                },
                member_span,
            ));
        };
        let (args, close) = self.parse_arguments()?;
        let span = start.merge(close);
        if args.len() != func.arity() {
            return Err(arg_count(&format!("Math.{text}"), func.arity(), args.len(), span));
        }

        let mut kinds = Vec::with_capacity(args.len());
        for arg in &args {
            match arg.ty.as_primitive() {
                Some(kind) if kind != PrimitiveKind::Bool => kinds.push(kind),
                _ => return Err(ParseError::type_mismatch("a number", &arg.ty, arg.span)),
            }
        }
        let result = match func {
            MathFn::Abs => kinds[0].promote_unary(),
            MathFn::Min | MathFn::Max => PrimitiveKind::promote(kinds[0], kinds[1]).ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::UnsupportedOperator {
                        op: format!("Math.{text}"),
                        lhs: kinds[0].to_string(),
                        rhs: Some(kinds[1].to_string()),
                    },
                    span,
                )
            })?,
            MathFn::Pow | MathFn::Sqrt | MathFn::Floor | MathFn::Ceiling => PrimitiveKind::Double,
        };
        let args = args.into_iter().map(|arg| arg.convert_to(result)).collect();
        Ok(Expr::new(
            ExprKind::Math { func, args },
            ValueType::Primitive(result),
            span,
        ))
    }

    /// `int.MaxValue`, `double.MinValue`, `string.Empty` and friends.
    fn parse_static_constant(&mut self, ty: TypeKeyword) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        self.cursor.advance();
        self.cursor.expect_sep(Sep::Dot)?;
        let (member, member_span) = self.cursor.expect_ident()?;
        let span = start.merge(member_span);
        let text = self.text(member);
        let literal = match (ty, text) {
            (TypeKeyword::String, "Empty") => Some(Literal::string("")),
            (TypeKeyword::Primitive(kind), "MaxValue") => extreme(kind, true),
            (TypeKeyword::Primitive(kind), "MinValue") => extreme(kind, false),
            _ => None,
        };
        literal.map(|l| Expr::literal(l, span)).ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::UnknownMember {
                    member: text.to_string(),
                    ty: ty.as_str().to_string(),
                },
                member_span,
            )
        })
    }
}

/// `MaxValue` / `MinValue` of a primitive kind.
fn extreme(kind: PrimitiveKind, max: bool) -> Option<Literal> {
    let literal = match kind {
        PrimitiveKind::Bool => return None,
        PrimitiveKind::Float => Literal::Float(if max { f32::MAX } else { f32::MIN }),
        PrimitiveKind::Double => Literal::Double(if max { f64::MAX } else { f64::MIN }),
        integral => {
            let (min, max_value) = integral.integral_range()?;
            Literal::from_value(&Value::from_i128(integral, if max { max_value } else { min }))?
        }
    };
    Some(literal)
}

#[cold]
fn arg_count(name: &str, expected: usize, found: usize, span: Span) -> ParseError {
    ParseError::new(
        ParseErrorKind::ArgumentCount {
            name: name.to_string(),
            expected,
            found,
        },
        span,
    )
}
