//! Framework error type.
//!
//! Sub-crates define their own error enums (`GoalError`, `SimError`) and wrap
//! lower-level errors as variants where a call path crosses crates.

use thiserror::Error;

/// Errors raised by `mob-core` primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("tick rate must be at least one tick per second")]
    ZeroTickRate,
}

/// Shorthand result type for `mob-core`.
pub type CoreResult<T> = Result<T, CoreError>;
