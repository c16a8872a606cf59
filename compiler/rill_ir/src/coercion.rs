//! Compound-assignment coercion table.
//!
//! Every `(operator, left kind, right kind)` triple maps to one
//! [`CoercionRule`]. The table is derived once from three facts:
//!
//! - which left kinds an operator accepts ([`CompoundClass`]),
//! - which kind the right operand is brought to (the left kind, or `int`
//!   for shift counts),
//! - the widening relation ([`PrimitiveKind::widens_to`]).
//!
//! The widening direction is the contract: `int += byte` widens the byte and
//! applies, `byte += int` is rejected even though the value might fit.

use std::sync::OnceLock;

use crate::{CompoundClass, CompoundOp, PrimitiveKind};

/// Outcome of looking up an operand pair.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CoercionRule {
    /// Right operand already has the operating kind.
    Apply,
    /// Right operand is widened to the operating kind first.
    WidenThenApply,
    Reject,
}

/// The primitive operation a compound assignment or binary expression
/// performs once both operands share a kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    /// `^` on floating point.
    Pow,
    Xor,
    And,
    Or,
}

impl ArithOp {
    /// The operation `op` performs on a left operand of `kind`.
    pub fn for_compound(op: CompoundOp, kind: PrimitiveKind) -> ArithOp {
        match op {
            CompoundOp::Add => ArithOp::Add,
            CompoundOp::Sub => ArithOp::Sub,
            CompoundOp::Mul => ArithOp::Mul,
            CompoundOp::Div => ArithOp::Div,
            CompoundOp::Rem => ArithOp::Rem,
            CompoundOp::Shl => ArithOp::Shl,
            CompoundOp::Shr => ArithOp::Shr,
            CompoundOp::Xor if kind.is_float() => ArithOp::Pow,
            CompoundOp::Xor => ArithOp::Xor,
            CompoundOp::And => ArithOp::And,
            CompoundOp::Or => ArithOp::Or,
        }
    }
}

/// A resolved primitive compound assignment.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct PrimitivePlan {
    /// Kind of the assignee; the result is stored as this kind.
    pub target: PrimitiveKind,
    /// Kind the right operand is converted to before applying.
    pub operand: PrimitiveKind,
    /// Whether the right operand needs that conversion.
    pub widen: bool,
    pub op: ArithOp,
}

const OPS: usize = CompoundOp::ALL.len();
const KINDS: usize = PrimitiveKind::COUNT;

/// Dense `(operator, left, right)` lookup table.
pub struct CoercionTable {
    rules: Box<[[[CoercionRule; KINDS]; KINDS]; OPS]>,
}

impl CoercionTable {
    /// The process-wide table, built on first use.
    pub fn global() -> &'static CoercionTable {
        static TABLE: OnceLock<CoercionTable> = OnceLock::new();
        TABLE.get_or_init(CoercionTable::build)
    }

    fn build() -> Self {
        let mut rules = Box::new([[[CoercionRule::Reject; KINDS]; KINDS]; OPS]);
        for op in CompoundOp::ALL {
            for left in PrimitiveKind::ALL {
                for right in PrimitiveKind::ALL {
                    rules[op.index()][left.index()][right.index()] = derive_rule(op, left, right);
                }
            }
        }
        CoercionTable { rules }
    }

    #[inline]
    pub fn rule(&self, op: CompoundOp, left: PrimitiveKind, right: PrimitiveKind) -> CoercionRule {
        self.rules[op.index()][left.index()][right.index()]
    }

    /// Resolve `left op= right`, or `None` when the table rejects it.
    pub fn resolve(
        &self,
        op: CompoundOp,
        left: PrimitiveKind,
        right: PrimitiveKind,
    ) -> Option<PrimitivePlan> {
        let widen = match self.rule(op, left, right) {
            CoercionRule::Apply => false,
            CoercionRule::WidenThenApply => true,
            CoercionRule::Reject => return None,
        };
        Some(PrimitivePlan {
            target: left,
            operand: operand_kind(op, left),
            widen,
            op: ArithOp::for_compound(op, left),
        })
    }
}

/// Kind the right operand must have when applying `op` to `left`.
fn operand_kind(op: CompoundOp, left: PrimitiveKind) -> PrimitiveKind {
    match op.class() {
        CompoundClass::Shift => PrimitiveKind::Int,
        _ => left,
    }
}

fn accepts_left(op: CompoundOp, left: PrimitiveKind) -> bool {
    match op.class() {
        CompoundClass::Arithmetic => left.is_numeric(),
        CompoundClass::Shift => left.is_integral(),
        CompoundClass::Xor => left.is_numeric() || left == PrimitiveKind::Bool,
        CompoundClass::Bitwise => left.is_integral() || left == PrimitiveKind::Bool,
    }
}

fn derive_rule(op: CompoundOp, left: PrimitiveKind, right: PrimitiveKind) -> CoercionRule {
    if !accepts_left(op, left) {
        return CoercionRule::Reject;
    }
    let operand = operand_kind(op, left);
    if right == operand {
        CoercionRule::Apply
    } else if right.widens_to(operand) {
        CoercionRule::WidenThenApply
    } else {
        CoercionRule::Reject
    }
}

#[cfg(test)]
mod tests;
