//! Typed expression parsing.
//!
//! Precedence climbing over C#'s binary operator levels, with unary,
//! postfix and primary expressions below. Every node is typed as it is
//! built; implicit promotions become explicit `Convert` nodes.

mod member;
mod operators;
mod primary;

use rill_ir::ast::{Conversion, Expr, ExprKind};
use rill_ir::{Literal, Op, PrimitiveKind, Sep, ValueType};
use rill_stack::ensure_sufficient_stack;

use crate::error::{ParseError, ParseErrorKind};
use crate::Parser;

impl Parser<'_> {
    /// Parse a full expression.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_conditional())
    }

    /// `cond ? then : otherwise`, right associative.
    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        let cond = self.parse_binary(1)?;
        if !self.cursor.eat_op(Op::Question) {
            return Ok(cond);
        }
        let cond = self.coerce_expr(cond, &ValueType::BOOL)?;
        let then = self.parse_expr()?;
        self.cursor.expect_sep(Sep::Colon)?;
        let otherwise = self.parse_expr()?;
        let (then, otherwise) = self.unify_branches(then, otherwise)?;
        let span = cond.span.merge(otherwise.span);
        let ty = then.ty.clone();
        Ok(Expr::new(
            ExprKind::Conditional {
                cond: Box::new(cond),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            },
            ty,
            span,
        ))
    }

    /// Bring both arms of a conditional to one type.
    fn unify_branches(&self, then: Expr, otherwise: Expr) -> Result<(Expr, Expr), ParseError> {
        if then.ty == otherwise.ty {
            return Ok((then, otherwise));
        }
        if let (Some(a), Some(b)) = (then.ty.as_primitive(), otherwise.ty.as_primitive()) {
            if let Some(common) = PrimitiveKind::promote(a, b) {
                if a.assignable_to(common) && b.assignable_to(common) {
                    return Ok((then.convert_to(common), otherwise.convert_to(common)));
                }
            }
        }
        if then.ty.is_assignable_from(&otherwise.ty) {
            let ty = then.ty.clone();
            return Ok((then, self.coerce_expr(otherwise, &ty)?));
        }
        if otherwise.ty.is_assignable_from(&then.ty) {
            let ty = otherwise.ty.clone();
            return Ok((self.coerce_expr(then, &ty)?, otherwise));
        }
        Err(ParseError::type_mismatch(&then.ty, &otherwise.ty, otherwise.span))
    }

    /// Check that `expr` can be stored into a `target` slot.
    ///
    /// Returns the expression (an integer literal re-typed when it fits a
    /// narrower integral target) and the conversion to apply on store.
    pub(crate) fn coerce(
        &self,
        expr: Expr,
        target: &ValueType,
    ) -> Result<(Expr, Conversion), ParseError> {
        if target.is_assignable_from(&expr.ty) {
            let conversion = Conversion::between(&expr.ty, target);
            return Ok((expr, conversion));
        }
        if let Some(narrowed) = self.narrow_literal(&expr, target) {
            return Ok((narrowed, Conversion::Identity));
        }
        if let (Some(to), Some(Literal::Int(value))) = (target.as_primitive(), expr.as_literal()) {
            if to.is_integral() {
                return Err(ParseError::new(
                    ParseErrorKind::LiteralOutOfRange {
                        literal: value.to_string(),
                        target: to.to_string(),
                    },
                    expr.span,
                ));
            }
        }
        let mut err = ParseError::type_mismatch(target, &expr.ty, expr.span);
        if let (Some(to), Some(from)) = (target.as_primitive(), expr.ty.as_primitive()) {
            if from != PrimitiveKind::Bool && to != PrimitiveKind::Bool {
                err = err.with_help(format!("use an explicit conversion: `({to})`"));
            }
        }
        Err(err)
    }

    /// Like [`Parser::coerce`], with the conversion folded into the
    /// expression.
    pub(crate) fn coerce_expr(&self, expr: Expr, target: &ValueType) -> Result<Expr, ParseError> {
        let (expr, conversion) = self.coerce(expr, target)?;
        Ok(match conversion {
            Conversion::Identity => expr,
            Conversion::Numeric(kind) => expr.convert_to(kind),
        })
    }

    /// An `int` literal re-typed to a narrower (or unsigned) integral
    /// `target` when its value is in range. Only literal tokens qualify:
    /// `(int)3` is an expression, not a literal.
    pub(crate) fn narrow_literal(&self, expr: &Expr, target: &ValueType) -> Option<Expr> {
        let target = target.as_primitive()?;
        let literal = expr.as_literal()?;
        if !matches!(literal, Literal::Int(_)) {
            return None;
        }
        let narrowed = literal.narrow_to(target)?;
        Some(Expr::literal(narrowed, expr.span))
    }
}
