//! Statement and expression tree.
//!
//! - `expr`: typed expressions, places and conversions
//! - `stmt`: one struct per statement kind, wrapped by [`Stmt`]
//! - `items`: functions and [`Script`]

mod expr;
mod items;
mod stmt;

pub use expr::{Conversion, Expr, ExprKind, ListMethod, MathFn, Place};
pub use items::{FunctionDecl, Param, Script};
pub use stmt::{
    Assignment, Block, BooleanInPlaceOperation, ConditionalBranch, ControlKind, ControlStatement,
    Declaration, DeclarationAssignment, ExpressionStatement, ExternDeclaration, ForEachLoop,
    ForLoop, GlobalDeclaration, IfStatement, InPlacePlan, MultiStatement,
    NumericInPlaceOperation, ReturnStatement, Stmt, StringConcatAssignment, SwitchStatement,
    WhileLoop,
};

#[cfg(test)]
mod tests;
