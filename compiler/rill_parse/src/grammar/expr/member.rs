//! Postfix member access and indexing.

use rill_ir::ast::{Expr, ExprKind, ListMethod};
use rill_ir::{Sep, ValueType};

use crate::error::{ParseError, ParseErrorKind};
use crate::Parser;

impl Parser<'_> {
    /// Primary expression followed by any number of `.member` and `[index]`.
    pub(super) fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.cursor.eat_sep(Sep::Dot) {
                expr = self.parse_member(expr)?;
            } else if self.cursor.eat_sep(Sep::LBracket) {
                let index = self.parse_expr()?;
                let close = self.cursor.expect_sep(Sep::RBracket)?;
                expr = self.index(expr, index, close)?;
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_member(&mut self, receiver: Expr) -> Result<Expr, ParseError> {
        let (member, member_span) = self.cursor.expect_ident()?;
        let text = self.text(member);
        let span = receiver.span.merge(member_span);
        let unknown = |receiver: &Expr| {
            ParseError::new(
                ParseErrorKind::UnknownMember {
                    member: text.to_string(),
                    ty: receiver.ty.to_string(),
                },
                member_span,
            )
        };

        let receiver_ty = receiver.ty.clone();
        match (&receiver_ty, text) {
            (ValueType::List(_), "Count") | (ValueType::String, "Length") => Ok(Expr::new(
                ExprKind::Length(Box::new(receiver)),
                ValueType::INT,
                span,
            )),
            (ValueType::List(element), _) => {
                let Some(method) = ListMethod::from_name(text) else {
                    return Err(unknown(&receiver));
                };
                let (args, close) = self.parse_arguments()?;
                let span = receiver.span.merge(close);
                if args.len() != method.arity() {
                    return Err(ParseError::new(
                        ParseErrorKind::ArgumentCount {
                            name: format!("List.{text}"),
                            expected: method.arity(),
                            found: args.len(),
                        },
                        span,
                    ));
                }
                let args = args
                    .into_iter()
                    .map(|arg| self.coerce_expr(arg, element))
                    .collect::<Result<Vec<_>, _>>()?;
                let ty = match method {
                    ListMethod::Contains => ValueType::BOOL,
                    ListMethod::Add | ListMethod::Clear => ValueType::Void,
                };
                Ok(Expr::new(
                    ExprKind::ListMethod {
                        receiver: Box::new(receiver),
                        method,
                        args,
                    },
                    ty,
                    span,
                ))
            }
            _ => Err(unknown(&receiver)),
        }
    }

    /// `list[i]` reads an element, `text[i]` a `char`.
    fn index(&self, target: Expr, index: Expr, close: rill_ir::Span) -> Result<Expr, ParseError> {
        let ty = match &target.ty {
            ValueType::List(element) => (**element).clone(),
            ValueType::String => ValueType::CHAR,
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::UnsupportedOperator {
                        op: "[]".to_string(),
                        lhs: other.to_string(),
                        rhs: None,
                    },
                    target.span,
                ))
            }
        };
        let index = self.coerce_expr(index, &ValueType::INT)?;
        let span = target.span.merge(close);
        Ok(Expr::new(
            ExprKind::Index {
                target: Box::new(target),
                index: Box::new(index),
            },
            ty,
            span,
        ))
    }
}
