//! Assignments and in-place operations.
//!
//! Every in-place operator is resolved here, once: primitive operands go
//! through the coercion table, host operands through the host registry.
//! Execution never has to decide whether an operation is allowed.

use rill_ir::ast::{
    Assignment, BooleanInPlaceOperation, Expr, ExprKind, InPlacePlan, NumericInPlaceOperation,
    Place, Stmt, StringConcatAssignment,
};
use rill_ir::{
    ArithOp, CoercionRule, CoercionTable, CompoundOp, Literal, LogicalAssignOp, Name, Op,
    PrimitiveKind, PrimitivePlan, Span, TokenKind, ValueType,
};

use crate::error::{ParseError, ParseErrorKind};
use crate::{Parser, Symbol};

/// Assignment operator at the cursor.
#[derive(Copy, Clone, Debug)]
enum AssignOp {
    Plain,
    Numeric(CompoundOp),
    Logical(LogicalAssignOp),
}

impl AssignOp {
    fn symbol(self) -> &'static str {
        match self {
            AssignOp::Plain => "=",
            AssignOp::Numeric(op) => op.as_symbol(),
            AssignOp::Logical(op) => op.as_symbol(),
        }
    }
}

impl Parser<'_> {
    /// Assignment, in-place operation, increment or call, without the
    /// terminating `;`.
    pub(crate) fn parse_simple_statement(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span();

        if self.at_increment() {
            let op = self.increment_op();
            self.cursor.advance();
            let leading = self.cursor.current_ident();
            let target = self.parse_unary()?;
            let (place, ty) = self.to_place(target, leading)?;
            return self.increment(place, &ty, op, self.span_from(start));
        }

        let leading = self.cursor.current_ident();
        let expr = self.parse_expr()?;

        if let Some((op, width)) = self.assignment_operator() {
            self.cursor.advance_by(width);
            let (place, ty) = self.to_place(expr, leading)?;
            let value = self.parse_expr()?;
            let span = self.span_from(start);
            return match op {
                AssignOp::Plain => {
                    let (value, conversion) = self.coerce(value, &ty)?;
                    Ok(Stmt::Assignment(Assignment {
                        target: place,
                        value,
                        conversion,
                        span,
                    }))
                }
                AssignOp::Numeric(op) => self.numeric_in_place(place, &ty, op, value, span),
                AssignOp::Logical(op) => {
                    if !ty.is_bool() {
                        return Err(unsupported(AssignOp::Logical(op), &ty, &value.ty, span));
                    }
                    let operand = self.coerce_expr(value, &ValueType::BOOL)?;
                    Ok(Stmt::BooleanInPlace(BooleanInPlaceOperation {
                        target: place,
                        op,
                        operand,
                        span,
                    }))
                }
            };
        }

        if self.at_increment() {
            let op = self.increment_op();
            self.cursor.advance();
            let (place, ty) = self.to_place(expr, leading)?;
            return self.increment(place, &ty, op, self.span_from(start));
        }

        self.expression_statement(expr)
    }

    fn increment_op(&self) -> CompoundOp {
        if self.cursor.check_op(Op::PlusPlus) {
            CompoundOp::Add
        } else {
            CompoundOp::Sub
        }
    }

    /// Assignment operator at the cursor and how many tokens it spans.
    fn assignment_operator(&self) -> Option<(AssignOp, usize)> {
        if self.cursor.is_shift_right_assign() {
            return Some((AssignOp::Numeric(CompoundOp::Shr), 3));
        }
        let TokenKind::Operator(op) = self.cursor.current_kind() else {
            return None;
        };
        let op = match op {
            Op::Assign => AssignOp::Plain,
            Op::PlusEq => AssignOp::Numeric(CompoundOp::Add),
            Op::MinusEq => AssignOp::Numeric(CompoundOp::Sub),
            Op::StarEq => AssignOp::Numeric(CompoundOp::Mul),
            Op::SlashEq => AssignOp::Numeric(CompoundOp::Div),
            Op::PercentEq => AssignOp::Numeric(CompoundOp::Rem),
            Op::ShlEq => AssignOp::Numeric(CompoundOp::Shl),
            Op::CaretEq => AssignOp::Numeric(CompoundOp::Xor),
            Op::AmpEq => AssignOp::Numeric(CompoundOp::And),
            Op::PipeEq => AssignOp::Numeric(CompoundOp::Or),
            Op::AmpAmpEq => AssignOp::Logical(LogicalAssignOp::AndAlso),
            Op::PipePipeEq => AssignOp::Logical(LogicalAssignOp::OrElse),
            _ => return None,
        };
        Some((op, 1))
    }

    /// Turn the left-hand side of an assignment into a place.
    ///
    /// `leading` is the identifier the expression started with; constants
    /// are already folded to literals, so it is how assignment to one is
    /// reported by name.
    fn to_place(
        &self,
        expr: Expr,
        leading: Option<Name>,
    ) -> Result<(Place, ValueType), ParseError> {
        let ty = expr.ty;
        match expr.kind {
            ExprKind::Local(name) => Ok((Place::Local(name), ty)),
            ExprKind::Index { target, index } if matches!(target.ty, ValueType::List(_)) => {
                Ok((
                    Place::Index {
                        list: target,
                        index,
                    },
                    ty,
                ))
            }
            ExprKind::Literal(_) => match leading {
                Some(name) if matches!(self.ctx.lookup(name), Some(Symbol::Constant(_))) => {
                    Err(ParseError::new(
                        ParseErrorKind::AssignToConstant {
                            name: self.text(name).to_string(),
                        },
                        expr.span,
                    ))
                }
                _ => Err(ParseError::new(ParseErrorKind::NotAssignable, expr.span)),
            },
            _ => Err(ParseError::new(ParseErrorKind::NotAssignable, expr.span)),
        }
    }

    /// `place++` / `place--`: an in-place add or subtract of literal 1.
    ///
    /// `char` steps by one code unit, although `c += 1` is rejected.
    fn increment(
        &self,
        place: Place,
        ty: &ValueType,
        op: CompoundOp,
        span: Span,
    ) -> Result<Stmt, ParseError> {
        let one = Expr::literal(Literal::Int(1), span);
        if ty.as_primitive() == Some(PrimitiveKind::Char) {
            return Ok(Stmt::NumericInPlace(NumericInPlaceOperation {
                target: place,
                op,
                operand: one,
                plan: InPlacePlan::Primitive(PrimitivePlan {
                    target: PrimitiveKind::Char,
                    operand: PrimitiveKind::Int,
                    widen: false,
                    op: ArithOp::for_compound(op, PrimitiveKind::Char),
                }),
                span,
            }));
        }
        self.numeric_in_place(place, ty, op, one, span)
    }

    /// Resolve `place op= operand`.
    fn numeric_in_place(
        &self,
        place: Place,
        ty: &ValueType,
        op: CompoundOp,
        operand: Expr,
        span: Span,
    ) -> Result<Stmt, ParseError> {
        if op == CompoundOp::Add && *ty == ValueType::String {
            if operand.ty.is_void() {
                return Err(unsupported(AssignOp::Numeric(op), ty, &operand.ty, span));
            }
            return Ok(Stmt::StringConcat(StringConcatAssignment {
                target: place,
                operand,
                span,
            }));
        }

        let plan = match (ty.as_primitive(), operand.ty.as_primitive()) {
            (Some(left), Some(_)) => {
                let operand_target = if op.class() == rill_ir::CompoundClass::Shift {
                    ValueType::INT
                } else {
                    ty.clone()
                };
                let operand = self.narrow_literal(&operand, &operand_target).unwrap_or(operand);
                let Some(right) = operand.ty.as_primitive() else {
                    return Err(unsupported(AssignOp::Numeric(op), ty, &operand.ty, span));
                };
                let table = CoercionTable::global();
                let Some(plan) = table.resolve(op, left, right) else {
                    let mut err = unsupported(AssignOp::Numeric(op), ty, &operand.ty, span);
                    if table.rule(op, left, left) != CoercionRule::Reject {
                        err = err.with_help(format!(
                            "`{right}` does not implicitly convert to `{operand_target}`; \
                             cast the right-hand side"
                        ));
                    }
                    return Err(err);
                };
                return Ok(Stmt::NumericInPlace(NumericInPlaceOperation {
                    target: place,
                    op,
                    operand,
                    plan: InPlacePlan::Primitive(plan),
                    span,
                }));
            }
            _ => match self.host.resolve_operator(op.binary_op(), ty, &operand.ty) {
                Some(resolved) if resolved.result == *ty => InPlacePlan::Host(resolved.clone()),
                Some(resolved) => {
                    return Err(ParseError::type_mismatch(ty, &resolved.result, span)
                        .with_help(format!(
                            "`{}` on these operands produces `{}`",
                            op.binary_op().method_name(),
                            resolved.result
                        )));
                }
                None => {
                    return Err(unsupported(AssignOp::Numeric(op), ty, &operand.ty, span)
                        .with_help(format!(
                            "no host operator `{}` is registered for these types",
                            op.binary_op().method_name()
                        )));
                }
            },
        };
        Ok(Stmt::NumericInPlace(NumericInPlaceOperation {
            target: place,
            op,
            operand,
            plan,
            span,
        }))
    }
}

#[cold]
fn unsupported(op: AssignOp, lhs: &ValueType, rhs: &ValueType, span: Span) -> ParseError {
    ParseError::new(
        ParseErrorKind::UnsupportedOperator {
            op: op.symbol().to_string(),
            lhs: lhs.to_string(),
            rhs: Some(rhs.to_string()),
        },
        span,
    )
}
