//! Operator enums shared by the lexer, parser and evaluator.

use std::fmt;

/// Binary expression operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    BitAnd,
    BitOr,
    BitXor,
    And,
    Or,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
        }
    }

    /// `==`, `!=` and the four orderings: result is `bool`.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
        )
    }

    /// Name of the host operator method this maps to, used in diagnostics.
    pub fn method_name(self) -> &'static str {
        match self {
            BinaryOp::Add => "op_Addition",
            BinaryOp::Sub => "op_Subtraction",
            BinaryOp::Mul => "op_Multiply",
            BinaryOp::Div => "op_Division",
            BinaryOp::Rem => "op_Modulus",
            BinaryOp::Shl => "op_LeftShift",
            BinaryOp::Shr => "op_RightShift",
            BinaryOp::BitAnd => "op_BitwiseAnd",
            BinaryOp::BitOr => "op_BitwiseOr",
            BinaryOp::BitXor => "op_ExclusiveOr",
            BinaryOp::And => "op_LogicalAnd",
            BinaryOp::Or => "op_LogicalOr",
            BinaryOp::Eq => "op_Equality",
            BinaryOp::NotEq => "op_Inequality",
            BinaryOp::Lt => "op_LessThan",
            BinaryOp::LtEq => "op_LessThanOrEqual",
            BinaryOp::Gt => "op_GreaterThan",
            BinaryOp::GtEq => "op_GreaterThanOrEqual",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Prefix operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Not,
    BitNot,
}

impl UnaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
        }
    }
}

/// Numeric and bitwise in-place operators (`+=` through `|=`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CompoundOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    Xor,
    And,
    Or,
}

/// How a compound operator treats its operands.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CompoundClass {
    /// `+= -= *= /= %=`: numeric kinds.
    Arithmetic,
    /// `<<= >>=`: integral left, `int`-compatible count.
    Shift,
    /// `^=`: power on floating point, XOR on integral and `bool`.
    Xor,
    /// `&= |=`: integral and `bool`.
    Bitwise,
}

impl CompoundOp {
    pub const ALL: [CompoundOp; 10] = [
        CompoundOp::Add,
        CompoundOp::Sub,
        CompoundOp::Mul,
        CompoundOp::Div,
        CompoundOp::Rem,
        CompoundOp::Shl,
        CompoundOp::Shr,
        CompoundOp::Xor,
        CompoundOp::And,
        CompoundOp::Or,
    ];

    pub fn as_symbol(self) -> &'static str {
        match self {
            CompoundOp::Add => "+=",
            CompoundOp::Sub => "-=",
            CompoundOp::Mul => "*=",
            CompoundOp::Div => "/=",
            CompoundOp::Rem => "%=",
            CompoundOp::Shl => "<<=",
            CompoundOp::Shr => ">>=",
            CompoundOp::Xor => "^=",
            CompoundOp::And => "&=",
            CompoundOp::Or => "|=",
        }
    }

    pub fn class(self) -> CompoundClass {
        match self {
            CompoundOp::Add
            | CompoundOp::Sub
            | CompoundOp::Mul
            | CompoundOp::Div
            | CompoundOp::Rem => CompoundClass::Arithmetic,
            CompoundOp::Shl | CompoundOp::Shr => CompoundClass::Shift,
            CompoundOp::Xor => CompoundClass::Xor,
            CompoundOp::And | CompoundOp::Or => CompoundClass::Bitwise,
        }
    }

    /// The binary operator this applies in place.
    pub fn binary_op(self) -> BinaryOp {
        match self {
            CompoundOp::Add => BinaryOp::Add,
            CompoundOp::Sub => BinaryOp::Sub,
            CompoundOp::Mul => BinaryOp::Mul,
            CompoundOp::Div => BinaryOp::Div,
            CompoundOp::Rem => BinaryOp::Rem,
            CompoundOp::Shl => BinaryOp::Shl,
            CompoundOp::Shr => BinaryOp::Shr,
            CompoundOp::Xor => BinaryOp::BitXor,
            CompoundOp::And => BinaryOp::BitAnd,
            CompoundOp::Or => BinaryOp::BitOr,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CompoundOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Short-circuit in-place operators `&&=` and `||=`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LogicalAssignOp {
    AndAlso,
    OrElse,
}

impl LogicalAssignOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            LogicalAssignOp::AndAlso => "&&=",
            LogicalAssignOp::OrElse => "||=",
        }
    }
}
