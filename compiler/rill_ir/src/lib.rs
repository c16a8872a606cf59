//! Rill IR - shared data structures for the Rill scripting engine.
//!
//! This crate holds everything the lexer, parser and evaluator agree on:
//! - spans and interned names
//! - tokens and `TokenList`
//! - static types, values and compile-time literals
//! - the compound-assignment coercion table
//! - the host type and operator registry
//! - the statement/expression AST

pub mod ast;
mod coercion;
mod host;
mod interner;
mod literal;
mod name;
mod ops;
mod span;
mod token;
mod traits;
mod types;
mod value;

pub use coercion::{ArithOp, CoercionRule, CoercionTable, PrimitivePlan};
pub use host::{HostError, HostObject, HostOperator, HostTypeRegistry, HostValue, ResolvedOperator};
pub use interner::{SharedInterner, StringInterner};
pub use literal::Literal;
pub use name::Name;
pub use ops::{BinaryOp, CompoundClass, CompoundOp, LogicalAssignOp, UnaryOp};
pub use span::Span;
pub use token::{Keyword, Op, Sep, Token, TokenKind, TokenList, TypeKeyword};
pub use traits::Spanned;
pub use types::{HostType, PrimitiveKind, ValueType};
pub use value::{ListValue, Value};
