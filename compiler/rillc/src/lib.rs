//! Rill driver.
//!
//! The `rill` binary is a thin argument parser over [`commands`]; the
//! pipeline itself (lex, parse, execute, each failure as a
//! [`rill_diagnostic::Diagnostic`]) lives in [`pipeline`] so tests can drive
//! it without a process.

pub mod commands;
pub mod pipeline;

use std::sync::Once;

pub use pipeline::{compile, execute, RunOptions};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing from `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=rill_eval=debug`.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
