#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

//! Phase-based pipeline tests.
//!
//! - `parse/` - lexing and parsing through the driver, diagnostics rendering
//! - `eval/` - whole programs executed through `rillc::execute`
//! - `common/` - shared helpers
//!
//! ```bash
//! cargo test -p rillc --test phases
//! cargo test -p rillc --test phases eval
//! ```

#[path = "phases/common/mod.rs"]
mod common;

#[path = "phases/parse/mod.rs"]
mod parse;

#[path = "phases/eval/mod.rs"]
mod eval;
