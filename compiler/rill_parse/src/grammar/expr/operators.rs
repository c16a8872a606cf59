//! Binary and unary operators.
//!
//! Binding power, loosest first:
//!
//! | level | operators |
//! |-------|-----------|
//! | 1 | `\|\|` |
//! | 2 | `&&` |
//! | 3 | `\|` |
//! | 4 | `^` |
//! | 5 | `&` |
//! | 6 | `==` `!=` |
//! | 7 | `<` `>` `<=` `>=` |
//! | 8 | `<<` `>>` |
//! | 9 | `+` `-` |
//! | 10 | `*` `/` `%` |

use rill_ir::ast::{Expr, ExprKind};
use rill_ir::{BinaryOp, Literal, Op, PrimitiveKind, Sep, Span, TokenKind, TypeKeyword, UnaryOp, Value, ValueType};
use rill_stack::ensure_sufficient_stack;

use crate::error::{ParseError, ParseErrorKind};
use crate::Parser;

impl Parser<'_> {
    /// Binary operator at the cursor: operator, level and token count.
    fn binary_operator(&self) -> Option<(BinaryOp, u8, usize)> {
        if self.cursor.check_op(Op::Gt) {
            if self.cursor.is_shift_right_assign() {
                return None;
            }
            if self.cursor.is_shift_right() {
                return Some((BinaryOp::Shr, 8, 2));
            }
            if self.cursor.is_greater_equal() {
                return Some((BinaryOp::GtEq, 7, 2));
            }
            return Some((BinaryOp::Gt, 7, 1));
        }
        let TokenKind::Operator(op) = self.cursor.current_kind() else {
            return None;
        };
        let (op, level) = match op {
            Op::PipePipe => (BinaryOp::Or, 1),
            Op::AmpAmp => (BinaryOp::And, 2),
            Op::Pipe => (BinaryOp::BitOr, 3),
            Op::Caret => (BinaryOp::BitXor, 4),
            Op::Amp => (BinaryOp::BitAnd, 5),
            Op::EqEq => (BinaryOp::Eq, 6),
            Op::BangEq => (BinaryOp::NotEq, 6),
            Op::Lt => (BinaryOp::Lt, 7),
            Op::LtEq => (BinaryOp::LtEq, 7),
            Op::Shl => (BinaryOp::Shl, 8),
            Op::Plus => (BinaryOp::Add, 9),
            Op::Minus => (BinaryOp::Sub, 9),
            Op::Star => (BinaryOp::Mul, 10),
            Op::Slash => (BinaryOp::Div, 10),
            Op::Percent => (BinaryOp::Rem, 10),
            _ => return None,
        };
        Some((op, level, 1))
    }

    /// Left-associative precedence climbing from `min_level` up.
    pub(super) fn parse_binary(&mut self, min_level: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary()?;
        while let Some((op, level, width)) = self.binary_operator() {
            if level < min_level {
                break;
            }
            let op_span = self.cursor.current_span();
            self.cursor.advance_by(width);
            let rhs = self.parse_binary(level + 1)?;
            lhs = self.binary(op, lhs, rhs, op_span)?;
        }
        Ok(lhs)
    }

    /// Prefix operators and casts.
    pub(crate) fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let start = self.cursor.current_span();
            let op = match self.cursor.current_kind() {
                TokenKind::Operator(Op::Minus) => Some(UnaryOp::Neg),
                TokenKind::Operator(Op::Bang) => Some(UnaryOp::Not),
                TokenKind::Operator(Op::Tilde) => Some(UnaryOp::BitNot),
                TokenKind::Operator(Op::Plus) => {
                    self.cursor.advance();
                    let operand = self.parse_unary()?;
                    return self.unary_plus(operand, start);
                }
                TokenKind::Separator(Sep::LParen) if self.at_cast() => {
                    return self.parse_cast();
                }
                _ => None,
            };
            match op {
                Some(op) => {
                    self.cursor.advance();
                    let operand = self.parse_unary()?;
                    let span = start.merge(operand.span);
                    self.unary(op, operand, span)
                }
                None => self.parse_postfix(),
            }
        })
    }

    /// `( primitive-type )` at the cursor.
    fn at_cast(&self) -> bool {
        matches!(
            self.cursor.peek_kind(1),
            TokenKind::Type(TypeKeyword::Primitive(_))
        ) && self.cursor.peek_is_sep(2, Sep::RParen)
    }

    /// `(T) operand`: explicit conversion between primitive kinds.
    fn parse_cast(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.expect_sep(Sep::LParen)?;
        let &TokenKind::Type(TypeKeyword::Primitive(to)) = self.cursor.current_kind() else {
            return Err(self.cursor.unexpected("a primitive type"));
        };
        self.cursor.advance();
        self.cursor.expect_sep(Sep::RParen)?;
        let operand = self.parse_unary()?;
        let span = start.merge(operand.span);
        let Some(from) = operand.ty.as_primitive() else {
            return Err(ParseError::type_mismatch("a primitive value", &operand.ty, operand.span));
        };
        if (from == PrimitiveKind::Bool) != (to == PrimitiveKind::Bool) {
            return Err(ParseError::new(
                ParseErrorKind::UnsupportedOperator {
                    op: format!("({to})"),
                    lhs: from.to_string(),
                    rhs: None,
                },
                span,
            ));
        }
        // Kept even when `from == to`: a cast result is never a literal,
        // so `(int)3` does not narrow like `3` does.
        Ok(Expr::new(
            ExprKind::Convert {
                to,
                operand: Box::new(operand),
            },
            ValueType::Primitive(to),
            span,
        ))
    }

    fn unary_plus(&self, operand: Expr, start: Span) -> Result<Expr, ParseError> {
        let span = start.merge(operand.span);
        match operand.ty.as_primitive() {
            Some(kind) if kind != PrimitiveKind::Bool => {
                Ok(Expr { span, ..operand.convert_to(kind.promote_unary()) })
            }
            _ => Err(unsupported_unary("+", &operand.ty, span)),
        }
    }

    fn unary(&self, op: UnaryOp, operand: Expr, span: Span) -> Result<Expr, ParseError> {
        let kind = operand.ty.as_primitive();
        let result = match (op, kind) {
            (UnaryOp::Not, Some(PrimitiveKind::Bool)) => PrimitiveKind::Bool,
            (UnaryOp::Neg, Some(kind)) if kind != PrimitiveKind::Bool => {
                if let Some(folded) = fold_negation(&operand, span) {
                    return folded;
                }
                match kind.promote_unary() {
                    PrimitiveKind::UInt => PrimitiveKind::Long,
                    PrimitiveKind::ULong => {
                        return Err(unsupported_unary(op.as_symbol(), &operand.ty, span))
                    }
                    promoted => promoted,
                }
            }
            (UnaryOp::BitNot, Some(kind)) if kind.is_integral() || kind == PrimitiveKind::Char => {
                kind.promote_unary()
            }
            _ => return Err(unsupported_unary(op.as_symbol(), &operand.ty, span)),
        };
        let operand = operand.convert_to(result);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            ValueType::Primitive(result),
            span,
        ))
    }

    /// Type a binary operation, inserting promotions.
    fn binary(&self, op: BinaryOp, lhs: Expr, rhs: Expr, op_span: Span) -> Result<Expr, ParseError> {
        let span = lhs.span.merge(rhs.span);

        if matches!(lhs.ty, ValueType::Host(_)) || matches!(rhs.ty, ValueType::Host(_)) {
            return self.host_binary(op, lhs, rhs, span, op_span);
        }

        if op == BinaryOp::Add && (lhs.ty == ValueType::String || rhs.ty == ValueType::String) {
            if lhs.ty.is_void() || rhs.ty.is_void() {
                return Err(unsupported_binary(op, &lhs.ty, &rhs.ty, op_span));
            }
            return Ok(Expr::new(
                ExprKind::Concat {
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                ValueType::String,
                span,
            ));
        }

        let (Some(l), Some(r)) = (lhs.ty.as_primitive(), rhs.ty.as_primitive()) else {
            if matches!(op, BinaryOp::Eq | BinaryOp::NotEq)
                && lhs.ty == rhs.ty
                && !lhs.ty.is_void()
            {
                return Ok(Expr::new(
                    ExprKind::Equality {
                        negated: op == BinaryOp::NotEq,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                    },
                    ValueType::BOOL,
                    span,
                ));
            }
            return Err(unsupported_binary(op, &lhs.ty, &rhs.ty, op_span));
        };

        let bools = l == PrimitiveKind::Bool && r == PrimitiveKind::Bool;
        let (operand_kind, result) = match op {
            BinaryOp::And | BinaryOp::Or if bools => (PrimitiveKind::Bool, PrimitiveKind::Bool),
            BinaryOp::Eq | BinaryOp::NotEq if bools => (PrimitiveKind::Bool, PrimitiveKind::Bool),
            BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor if bools => {
                (PrimitiveKind::Bool, PrimitiveKind::Bool)
            }
            BinaryOp::Shl | BinaryOp::Shr => {
                let left = l.promote_unary();
                if !left.is_integral() || !r.promote_unary().assignable_to(PrimitiveKind::Int) {
                    return Err(unsupported_binary(op, &lhs.ty, &rhs.ty, op_span));
                }
                let lhs = lhs.convert_to(left);
                let rhs = rhs.convert_to(PrimitiveKind::Int);
                return Ok(primitive_binary(op, lhs, rhs, left, span));
            }
            _ => {
                let Some(common) = PrimitiveKind::promote(l, r) else {
                    return Err(unsupported_binary(op, &lhs.ty, &rhs.ty, op_span));
                };
                let bitwise = matches!(op, BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor);
                let logical = matches!(op, BinaryOp::And | BinaryOp::Or);
                if logical || (bitwise && !common.is_integral()) {
                    return Err(unsupported_binary(op, &lhs.ty, &rhs.ty, op_span));
                }
                let result = if op.is_comparison() {
                    PrimitiveKind::Bool
                } else {
                    common
                };
                (common, result)
            }
        };
        let lhs = lhs.convert_to(operand_kind);
        let rhs = rhs.convert_to(operand_kind);
        Ok(primitive_binary(op, lhs, rhs, result, span))
    }

    fn host_binary(
        &self,
        op: BinaryOp,
        lhs: Expr,
        rhs: Expr,
        span: Span,
        op_span: Span,
    ) -> Result<Expr, ParseError> {
        if let Some(resolved) = self.host.resolve_operator(op, &lhs.ty, &rhs.ty) {
            return Ok(Expr::new(
                ExprKind::HostBinary {
                    op,
                    operator: resolved.clone(),
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                resolved.result.clone(),
                span,
            ));
        }
        if matches!(op, BinaryOp::Eq | BinaryOp::NotEq) && lhs.ty == rhs.ty {
            return Ok(Expr::new(
                ExprKind::Equality {
                    negated: op == BinaryOp::NotEq,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                ValueType::BOOL,
                span,
            ));
        }
        Err(unsupported_binary(op, &lhs.ty, &rhs.ty, op_span).with_help(format!(
            "no host operator `{}` is registered for these types",
            op.method_name()
        )))
    }
}

fn primitive_binary(op: BinaryOp, lhs: Expr, rhs: Expr, result: PrimitiveKind, span: Span) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        ValueType::Primitive(result),
        span,
    )
}

/// `-literal` folds to a literal, so `-2147483648` is an `int` and
/// `-9223372036854775808` a `long`.
fn fold_negation(operand: &Expr, span: Span) -> Option<Result<Expr, ParseError>> {
    let literal = operand.as_literal()?;
    let folded = match literal {
        Literal::Float(v) => Literal::Float(-v),
        Literal::Double(v) => Literal::Double(-v),
        Literal::Int(_) | Literal::UInt(_) | Literal::Long(_) | Literal::ULong(_) => {
            let negated = -literal.to_value().as_i128()?;
            let kind = if matches!(literal, Literal::Int(_) | Literal::UInt(_))
                && i32::try_from(negated).is_ok()
            {
                PrimitiveKind::Int
            } else if i64::try_from(negated).is_ok() {
                PrimitiveKind::Long
            } else {
                return Some(Err(ParseError::new(
                    ParseErrorKind::LiteralOutOfRange {
                        literal: format!("-{literal}"),
                        target: "long".to_string(),
                    },
                    span,
                )));
            };
            Literal::from_value(&Value::from_i128(kind, negated))?
        }
        _ => return None,
    };
    Some(Ok(Expr::literal(folded, span)))
}

#[cold]
fn unsupported_unary(op: &str, ty: &ValueType, span: Span) -> ParseError {
    ParseError::new(
        ParseErrorKind::UnsupportedOperator {
            op: op.to_string(),
            lhs: ty.to_string(),
            rhs: None,
        },
        span,
    )
}

#[cold]
fn unsupported_binary(op: BinaryOp, lhs: &ValueType, rhs: &ValueType, span: Span) -> ParseError {
    ParseError::new(
        ParseErrorKind::UnsupportedOperator {
            op: op.as_symbol().to_string(),
            lhs: lhs.to_string(),
            rhs: Some(rhs.to_string()),
        },
        span,
    )
}
