//! The timeout/worker harness (C8): runs a solver with a wall-clock bound,
//! isolating it in its own thread so that a deadline expiry cannot leave
//! the caller observing a torn computation. The core is a pure, `Send`-safe
//! computational library with no shared mutable state to corrupt on
//! abandonment, so a dedicated OS thread plus a channel recv with a
//! deadline is sufficient isolation — no process boundary is needed.

use crate::error::{CoreError, CoreResult};
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// The outcome of running a solver under [`run_with_timeout`].
#[derive(Debug)]
pub enum TimeoutOutcome<T> {
    /// The solver finished before the deadline.
    Completed {
        /// The solver's own result.
        result: T,
        /// Wall-clock time the solver took.
        elapsed: Duration,
    },
    /// The solver exceeded the deadline. Per §4.7, any partial result is
    /// discarded; the spawned thread is left to finish (or not) on its own
    /// and its eventual result, if any, is dropped.
    Timeout,
    /// The solver panicked or otherwise failed internally.
    Error(String),
}

impl<T> TimeoutOutcome<T> {
    /// `true` iff the solver completed within the deadline.
    pub fn is_completed(&self) -> bool {
        matches!(self, TimeoutOutcome::Completed { .. })
    }
}

/// Runs `solver` with a wall-clock bound of `timeout`, per §4.7/§5.
///
/// `solver` must be `Send + 'static` since it executes on a freshly spawned
/// thread; its own cancellation points (between matrix multiplications, SAT
/// queries, or sample batches — §5) are its own concern, this harness only
/// bounds total wall-clock time.
pub fn run_with_timeout<F, T>(solver: F, timeout: Duration) -> TimeoutOutcome<T>
where
    F: FnOnce() -> CoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let start = Instant::now();
    std::thread::spawn(move || {
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(solver));
        // The receiver may already have moved on past the deadline; a
        // failed send here just means the result is discarded, which is
        // exactly the documented timeout behaviour.
        let _ = tx.send(outcome);
    });

    match rx.recv_timeout(timeout) {
        Ok(Ok(Ok(result))) => TimeoutOutcome::Completed {
            result,
            elapsed: start.elapsed(),
        },
        Ok(Ok(Err(core_error))) => TimeoutOutcome::Error(core_error.to_string()),
        Ok(Err(panic_payload)) => {
            let message = panic_message(panic_payload);
            TimeoutOutcome::Error(format!("solver panicked: {message}"))
        }
        Err(mpsc::RecvTimeoutError::Timeout) => TimeoutOutcome::Timeout,
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            TimeoutOutcome::Error("solver thread disconnected without a result".to_string())
        }
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_completes_within_deadline() {
        let outcome = run_with_timeout(|| Ok::<_, CoreError>(42), Duration::from_secs(5));
        match outcome {
            TimeoutOutcome::Completed { result, .. } => assert_eq!(result, 42),
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[test]
    fn test_times_out() {
        let outcome = run_with_timeout(
            || {
                sleep(Duration::from_secs(5));
                Ok::<_, CoreError>(())
            },
            Duration::from_millis(20),
        );
        assert!(matches!(outcome, TimeoutOutcome::Timeout));
    }

    #[test]
    fn test_propagates_solver_error() {
        let outcome = run_with_timeout(
            || Err::<(), CoreError>(CoreError::SolverError("boom".to_string())),
            Duration::from_secs(5),
        );
        match outcome {
            TimeoutOutcome::Error(message) => assert!(message.contains("boom")),
            other => panic!("expected Error, got {other:?}"),
        }
    }
}
