#![forbid(unsafe_code)]

//! Engine error model.
//!
//! Every failure is a synchronous, local validation error returned to the
//! immediate caller. Failed operations are atomic: when an `Err` comes
//! back, no state has changed. There are no deferred, retryable, or
//! partial-failure conditions — everything the engine does is a
//! deterministic in-memory computation.

use std::fmt;

/// Errors returned by the engine's mutating operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// A range update that does not fit the active array size.
    ///
    /// Rejected when `l > r` or `r >= size`. Negative indices are
    /// unrepresentable (`usize`), so these are the only two arms.
    InvalidRange { l: usize, r: usize, size: usize },
    /// A size change to zero. The array domain must stay non-empty.
    InvalidSize { requested: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { l, r, size } => {
                write!(f, "invalid range [{l}, {r}]: expected l <= r < {size}")
            }
            Self::InvalidSize { requested } => {
                write!(f, "invalid array size {requested}: must be at least 1")
            }
        }
    }
}

impl std::error::Error for EngineError {}
