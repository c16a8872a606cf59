//! Statement nodes.
//!
//! Each statement kind is its own struct so the evaluator can implement
//! execution per node type. Nodes are immutable once built; every piece of
//! runtime state lives in the runtime context chain.

use rustc_hash::FxHashMap;

use super::expr::{Conversion, Expr, Place};
use crate::{CompoundOp, Literal, LogicalAssignOp, Name, PrimitivePlan, ResolvedOperator, Span, Spanned, ValueType};

/// A statement.
#[derive(Clone, Debug)]
pub enum Stmt {
    Block(Block),
    If(IfStatement),
    While(WhileLoop),
    For(ForLoop),
    ForEach(ForEachLoop),
    Switch(SwitchStatement),
    Declaration(Declaration),
    DeclarationAssignment(DeclarationAssignment),
    Assignment(Assignment),
    NumericInPlace(NumericInPlaceOperation),
    BooleanInPlace(BooleanInPlaceOperation),
    StringConcat(StringConcatAssignment),
    Control(ControlStatement),
    Return(ReturnStatement),
    Multi(MultiStatement),
    Expression(ExpressionStatement),
    Global(GlobalDeclaration),
    Extern(ExternDeclaration),
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        match self {
            Stmt::Block(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::ForEach(s) => s.span,
            Stmt::Switch(s) => s.span,
            Stmt::Declaration(s) => s.span,
            Stmt::DeclarationAssignment(s) => s.span,
            Stmt::Assignment(s) => s.span,
            Stmt::NumericInPlace(s) => s.span,
            Stmt::BooleanInPlace(s) => s.span,
            Stmt::StringConcat(s) => s.span,
            Stmt::Control(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::Multi(s) => s.span,
            Stmt::Expression(s) => s.span,
            Stmt::Global(s) => s.span,
            Stmt::Extern(s) => s.span,
        }
    }
}

/// `{ ... }`, or the body of a switch section.
#[derive(Clone, Debug, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(statements: Vec<Stmt>, span: Span) -> Self {
        Block { statements, span }
    }

    /// Wrap a single embedded statement (`if (c) x = 1;`).
    pub fn single(stmt: Stmt) -> Self {
        let span = stmt.span();
        Block {
            statements: vec![stmt],
            span,
        }
    }
}

/// One `if`/`else if` arm.
#[derive(Clone, Debug)]
pub struct ConditionalBranch {
    pub condition: Expr,
    pub body: Block,
}

/// `if (a) ... else if (b) ... else ...`.
#[derive(Clone, Debug)]
pub struct IfStatement {
    pub branches: Vec<ConditionalBranch>,
    pub otherwise: Option<Block>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct WhileLoop {
    pub condition: Expr,
    pub body: Block,
    pub span: Span,
}

/// `for (init; cond; incr) body`. A missing condition is `true`.
#[derive(Clone, Debug)]
pub struct ForLoop {
    pub initializers: Vec<Stmt>,
    pub condition: Option<Expr>,
    pub increments: Vec<Stmt>,
    pub body: Block,
    pub span: Span,
}

/// `foreach (T x in container) body`.
#[derive(Clone, Debug)]
pub struct ForEachLoop {
    pub variable: Name,
    pub variable_ty: ValueType,
    /// Element to loop variable.
    pub conversion: Conversion,
    pub container: Expr,
    pub body: Block,
    pub span: Span,
}

/// `switch (subject) { case ...: ... default: ... }`.
///
/// Labels map to an index into `sections`; consecutive labels share one
/// section.
#[derive(Clone, Debug)]
pub struct SwitchStatement {
    pub subject: Expr,
    pub cases: FxHashMap<Literal, usize>,
    pub sections: Vec<Block>,
    pub default: Option<usize>,
    pub span: Span,
}

impl SwitchStatement {
    /// Section to run for `value`, falling back to `default`.
    pub fn section_for(&self, value: &Literal) -> Option<&Block> {
        self.cases
            .get(value)
            .copied()
            .or(self.default)
            .and_then(|index| self.sections.get(index))
    }
}

/// `T x;`
#[derive(Clone, Debug)]
pub struct Declaration {
    pub name: Name,
    pub ty: ValueType,
    pub span: Span,
}

/// `T x = value;`
#[derive(Clone, Debug)]
pub struct DeclarationAssignment {
    pub name: Name,
    pub ty: ValueType,
    pub value: Expr,
    pub conversion: Conversion,
    pub span: Span,
}

/// `place = value;`
#[derive(Clone, Debug)]
pub struct Assignment {
    pub target: Place,
    pub value: Expr,
    pub conversion: Conversion,
    pub span: Span,
}

/// How a numeric in-place operation computes its result.
#[derive(Clone, Debug)]
pub enum InPlacePlan {
    /// Resolved from the coercion table.
    Primitive(PrimitivePlan),
    /// Resolved from the host operator registry.
    Host(ResolvedOperator),
}

/// `place op= operand;`, plus `place++` and `place--`.
#[derive(Clone, Debug)]
pub struct NumericInPlaceOperation {
    pub target: Place,
    pub op: CompoundOp,
    pub operand: Expr,
    pub plan: InPlacePlan,
    pub span: Span,
}

/// `place &&= operand;` and `place ||= operand;`
#[derive(Clone, Debug)]
pub struct BooleanInPlaceOperation {
    pub target: Place,
    pub op: LogicalAssignOp,
    pub operand: Expr,
    pub span: Span,
}

/// `text += operand;`
#[derive(Clone, Debug)]
pub struct StringConcatAssignment {
    pub target: Place,
    pub operand: Expr,
    pub span: Span,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ControlKind {
    Break,
    Continue,
}

#[derive(Clone, Debug)]
pub struct ControlStatement {
    pub kind: ControlKind,
    pub span: Span,
}

/// `return;` or `return value;`
#[derive(Clone, Debug)]
pub struct ReturnStatement {
    pub value: Option<Expr>,
    pub conversion: Conversion,
    pub span: Span,
}

/// `T a = 1, b, c = 3;`
#[derive(Clone, Debug)]
pub struct MultiStatement {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

/// An expression evaluated for its effect (`print(x);`, `list.Add(1);`).
#[derive(Clone, Debug)]
pub struct ExpressionStatement {
    pub expr: Expr,
    pub span: Span,
}

/// `global T name [= default];`
#[derive(Clone, Debug)]
pub struct GlobalDeclaration {
    pub name: Name,
    pub ty: ValueType,
    pub default: Option<Expr>,
    pub conversion: Conversion,
    pub span: Span,
}

/// `extern T name [= default];`
#[derive(Clone, Debug)]
pub struct ExternDeclaration {
    pub name: Name,
    pub ty: ValueType,
    pub default: Option<Expr>,
    pub conversion: Conversion,
    pub span: Span,
}
