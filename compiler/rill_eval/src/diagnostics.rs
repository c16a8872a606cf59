//! Call frame tracking.
//!
//! - `CallStack`: live frames with an integrated depth limit
//! - `CallFrame`: function name, call site and return slot
//!
//! A `return` stores its value in the innermost frame; the caller takes it
//! back out when the body finishes with `FlowState::Return`.

use rill_ir::{Name, Span, StringInterner, Value};

use crate::errors::{recursion_limit_exceeded, EvalError};

/// Default maximum call depth.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// One active function call.
#[derive(Clone, Debug)]
pub struct CallFrame {
    pub name: Name,
    /// Where the call was made, not where the function is declared.
    pub call_span: Option<Span>,
    pub return_value: Option<Value>,
}

impl CallFrame {
    pub fn new(name: Name, call_span: Option<Span>) -> Self {
        CallFrame {
            name,
            call_span,
            return_value: None,
        }
    }
}

/// Live call stack for the interpreter.
///
/// The depth check lives in [`CallStack::push`]; a frame is never pushed
/// past the limit.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, or fail with `StackOverflow` at the depth limit.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(recursion_limit_exceeded(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pop the innermost frame, returning it.
    pub fn pop(&mut self) -> Option<CallFrame> {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop on empty stack");
        self.frames.pop()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    pub fn current_frame_mut(&mut self) -> Option<&mut CallFrame> {
        self.frames.last_mut()
    }

    /// Function names, innermost first.
    pub fn capture(&self, interner: &StringInterner) -> Vec<String> {
        self.frames
            .iter()
            .rev()
            .map(|frame| interner.lookup(frame.name).to_string())
            .collect()
    }
}

impl Default for CallStack {
    fn default() -> Self {
        CallStack::new(DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests;
