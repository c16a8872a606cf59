//! Stack growth for deeply nested scripts.
//!
//! Statement parsing, expression parsing and tree-walking execution are all
//! direct recursion over the source nesting. A script with a few thousand
//! nested blocks or a deeply recursive script function would otherwise blow
//! the native stack before the interpreter's own call-depth limit trips.
//!
//! Wrap each recursive entry point with [`ensure_sufficient_stack`]:
//!
//! ```text
//! fn execute_block(&self, block: &Block, scope: &RuntimeScope) -> ExecResult {
//!     ensure_sufficient_stack(|| {
//!         // ... recurse into child statements ...
//!     })
//! }
//! ```
//!
//! On wasm32 this is a passthrough.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// wasm32 manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
