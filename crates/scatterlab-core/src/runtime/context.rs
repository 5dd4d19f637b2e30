//! Shared run bookkeeping.
//!
//! The iteration counter and run flags used to be process-wide statics in
//! the system this replaces; here they are an explicit, injectable value
//! owned by whichever component starts runs, so independent test runs never
//! interfere. Cloning a context shares the underlying state.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Shared counters and flags for a family of runs.
///
/// Mutated by at most one worker at a time, read concurrently by the
/// controller; all access is atomic.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    inner: Arc<ContextInner>,
}

#[derive(Debug, Default)]
struct ContextInner {
    /// Monotonic iteration counter shared across all runs on this context.
    /// Drives reporting cadence only; never reset.
    iterations: AtomicU64,
    /// Whether a worker is currently iterating (false while paused).
    run_in_progress: AtomicBool,
    /// Whether any run was ever started on this context.
    run_started: AtomicBool,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the shared counter and returns the new value (starts at 1).
    pub fn next_iteration(&self) -> u64 {
        self.inner.iterations.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Current value of the shared counter.
    pub fn iterations(&self) -> u64 {
        self.inner.iterations.load(Ordering::SeqCst)
    }

    pub fn run_in_progress(&self) -> bool {
        self.inner.run_in_progress.load(Ordering::SeqCst)
    }

    pub fn set_run_in_progress(&self, value: bool) {
        self.inner.run_in_progress.store(value, Ordering::SeqCst);
    }

    /// Marks the context as having hosted a run.
    pub fn mark_started(&self) {
        self.inner.run_started.store(true, Ordering::SeqCst);
    }

    pub fn run_started(&self) -> bool {
        self.inner.run_started.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_is_monotonic_and_shared_between_clones() {
        let ctx = RunContext::new();
        let other = ctx.clone();
        assert_eq!(ctx.next_iteration(), 1);
        assert_eq!(other.next_iteration(), 2);
        assert_eq!(ctx.iterations(), 2);
    }

    #[test]
    fn independent_contexts_do_not_interfere() {
        let a = RunContext::new();
        let b = RunContext::new();
        a.next_iteration();
        assert_eq!(b.iterations(), 0);
    }

    #[test]
    fn flags_round_trip() {
        let ctx = RunContext::new();
        assert!(!ctx.run_in_progress());
        ctx.set_run_in_progress(true);
        assert!(ctx.run_in_progress());
        assert!(!ctx.run_started());
        ctx.mark_started();
        assert!(ctx.run_started());
    }
}
