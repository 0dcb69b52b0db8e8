//! Typed error taxonomy shared by every core component.

use thiserror::Error;

/// Errors produced by the core library.
///
/// This is the taxonomy of §7: malformed input, solver timeouts, internal
/// solver failures, and ranking invariant violations. The CLI layer wraps
/// these in `anyhow::Error` with additional context; library code never
/// does that itself.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A malformed `.af` file, a missing file, or an unparseable header.
    #[error("input error: {0}")]
    InputError(String),

    /// A solver exceeded its wall-clock deadline.
    #[error("solver timed out after {elapsed_secs:.3}s")]
    TimeoutError {
        /// Wall-clock time elapsed before the deadline was hit.
        elapsed_secs: f64,
    },

    /// An internal solver failure (SAT backend unavailable, integer
    /// overflow beyond the documented policy, etc).
    #[error("solver error: {0}")]
    SolverError(String),

    /// The ranking returned by a solver does not partition the argument set.
    ///
    /// This is always a logic bug in a solver, never a user-facing
    /// condition; it is raised so that a corrupted ranking is never
    /// silently returned.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience alias for fallible core operations.
pub type CoreResult<T> = Result<T, CoreError>;
