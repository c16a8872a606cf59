//! Flow signals and cooperative cancellation.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::{cancelled, EvalError};

/// Outcome of executing one statement.
///
/// Loops consume `LoopBreak` and `LoopContinue` and re-propagate `Return`;
/// a switch consumes `LoopBreak` only.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FlowState {
    Nominal,
    LoopContinue,
    LoopBreak,
    Return,
}

impl FlowState {
    #[inline]
    pub fn is_nominal(self) -> bool {
        matches!(self, FlowState::Nominal)
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FlowState::Nominal => "nominal",
            FlowState::LoopContinue => "continue",
            FlowState::LoopBreak => "break",
            FlowState::Return => "return",
        })
    }
}

/// Shared cancellation flag.
///
/// The host keeps a clone and calls [`CancellationToken::cancel`] from any
/// thread; the executor polls it at block entry, at every loop iteration
/// and between the parts of a multi-declaration.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// `Err(Cancelled)` once cancellation was requested.
    #[inline]
    pub fn check(&self) -> Result<(), EvalError> {
        if self.is_cancelled() {
            Err(cancelled())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;

    #[test]
    fn cancel_is_visible_through_clones() {
        let token = CancellationToken::new();
        let host = token.clone();
        assert!(token.check().is_ok());
        host.cancel();
        assert!(token.is_cancelled());
        assert!(matches!(
            token.check().map_err(|e| e.kind),
            Err(EvalErrorKind::Cancelled)
        ));
    }

    #[test]
    fn cancel_from_another_thread() {
        let token = CancellationToken::new();
        let remote = token.clone();
        let handle = std::thread::spawn(move || remote.cancel());
        assert!(handle.join().is_ok());
        assert!(token.is_cancelled());
    }
}
