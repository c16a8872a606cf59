//! Typed expression nodes.
//!
//! The expression parser resolves every expression to its static type and
//! makes numeric promotion explicit with [`ExprKind::Convert`] nodes, so the
//! evaluator never has to re-derive types.

use std::fmt;

use crate::{BinaryOp, Literal, Name, PrimitiveKind, ResolvedOperator, Span, Spanned, UnaryOp, ValueType};

/// A typed expression.
#[derive(Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: ValueType,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, ty: ValueType, span: Span) -> Self {
        Expr { kind, ty, span }
    }

    pub fn literal(literal: Literal, span: Span) -> Self {
        let ty = literal.value_type();
        Expr::new(ExprKind::Literal(literal), ty, span)
    }

    pub fn local(name: Name, ty: ValueType, span: Span) -> Self {
        Expr::new(ExprKind::Local(name), ty, span)
    }

    /// The literal this expression is, if any. Folded constants and static
    /// constants are literals by the time they reach here.
    pub fn as_literal(&self) -> Option<&Literal> {
        match &self.kind {
            ExprKind::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// Wrap in a numeric conversion to `to`; identity when already there.
    pub fn convert_to(self, to: PrimitiveKind) -> Expr {
        if self.ty == ValueType::Primitive(to) {
            return self;
        }
        let span = self.span;
        Expr::new(
            ExprKind::Convert {
                to,
                operand: Box::new(self),
            },
            ValueType::Primitive(to),
            span,
        )
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {} @ {:?}", self.kind, self.ty, self.span)
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

/// Expression variants.
#[derive(Clone, Debug)]
pub enum ExprKind {
    Literal(Literal),

    /// Variable read.
    Local(Name),

    /// Operand is already promoted to the result kind.
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Primitive binary operation. Operands share one kind (after
    /// promotion); `&&` and `||` short-circuit.
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// Binary operation on host types, resolved against the registry.
    HostBinary {
        op: BinaryOp,
        operator: ResolvedOperator,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// `+` with at least one string operand.
    Concat { lhs: Box<Expr>, rhs: Box<Expr> },

    /// Equality on non-primitive operands (strings, lists, host values).
    Equality {
        negated: bool,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// `cond ? a : b`.
    Conditional {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },

    /// Explicit cast or implicit promotion.
    Convert { to: PrimitiveKind, operand: Box<Expr> },

    /// Call of a script function.
    Call { function: Name, args: Vec<Expr> },

    /// Built-in `print(e)`.
    Print(Box<Expr>),

    /// `Math.Abs(x)` and friends.
    Math { func: MathFn, args: Vec<Expr> },

    /// `new List<T>()` with optional initializer items.
    NewList { items: Vec<Expr> },

    /// `list[i]` or `text[i]`.
    Index { target: Box<Expr>, index: Box<Expr> },

    /// `list.Count` or `text.Length`.
    Length(Box<Expr>),

    /// `list.Add(x)`, `list.Clear()`, `list.Contains(x)`.
    ListMethod {
        receiver: Box<Expr>,
        method: ListMethod,
        args: Vec<Expr>,
    },
}

/// Functions of the static `Math` class.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MathFn {
    Abs,
    Min,
    Max,
    Pow,
    Sqrt,
    Floor,
    Ceiling,
}

impl MathFn {
    pub fn from_name(name: &str) -> Option<MathFn> {
        let func = match name {
            "Abs" => MathFn::Abs,
            "Min" => MathFn::Min,
            "Max" => MathFn::Max,
            "Pow" => MathFn::Pow,
            "Sqrt" => MathFn::Sqrt,
            "Floor" => MathFn::Floor,
            "Ceiling" => MathFn::Ceiling,
            _ => return None,
        };
        Some(func)
    }

    pub fn arity(self) -> usize {
        match self {
            MathFn::Min | MathFn::Max | MathFn::Pow => 2,
            MathFn::Abs | MathFn::Sqrt | MathFn::Floor | MathFn::Ceiling => 1,
        }
    }
}

/// Methods of `List<T>`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ListMethod {
    Add,
    Clear,
    Contains,
}

impl ListMethod {
    pub fn from_name(name: &str) -> Option<ListMethod> {
        match name {
            "Add" => Some(ListMethod::Add),
            "Clear" => Some(ListMethod::Clear),
            "Contains" => Some(ListMethod::Contains),
            _ => None,
        }
    }

    pub fn arity(self) -> usize {
        match self {
            ListMethod::Clear => 0,
            ListMethod::Add | ListMethod::Contains => 1,
        }
    }
}

/// An assignable location.
#[derive(Clone, Debug)]
pub enum Place {
    Local(Name),
    /// `list[i]`. Target and index are evaluated once per assignment.
    Index { list: Box<Expr>, index: Box<Expr> },
}

/// Conversion applied when storing a value into a slot of another type.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Conversion {
    Identity,
    Numeric(PrimitiveKind),
}

impl Conversion {
    /// Conversion storing a `from` value into a `to` slot. The caller has
    /// already checked assignability.
    pub fn between(from: &ValueType, to: &ValueType) -> Conversion {
        match (from, to) {
            (ValueType::Primitive(from), ValueType::Primitive(to)) if from != to => {
                Conversion::Numeric(*to)
            }
            _ => Conversion::Identity,
        }
    }
}
