//! Diagnostic system for Rill errors.
//!
//! Every failure the engine reports (lexing, parsing, execution) converts
//! into a [`Diagnostic`]:
//! - an error code for searchability
//! - a message saying what went wrong
//! - a primary span saying where
//! - optional notes and suggestions
//!
//! [`span_utils::LineOffsetTable`] maps spans to line/column, and
//! [`emitter::TerminalEmitter`] renders diagnostics against the source.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
