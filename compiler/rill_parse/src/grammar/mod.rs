//! Grammar productions, split by construct.
//!
//! - `stmt`: statement dispatch, blocks and embedded statements
//! - `control`: `if`, loops, `switch`, `break`/`continue`/`return`
//! - `decl`: types, local declarations, `const`, `extern`, `global`
//! - `assign`: assignments and in-place operations
//! - `item`: function collection and the script driver
//! - `expr`: typed expressions

mod assign;
mod control;
mod decl;
mod expr;
mod item;
mod stmt;
