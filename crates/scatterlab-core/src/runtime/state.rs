//! Run state machine.

use serde::{Deserialize, Serialize};

/// State of one algorithm run.
///
/// Exactly one state is active per runner at a time:
///
/// - `Idle → Running` on start
/// - `Running → AwaitingResume` when the continuation predicate is false
///   at a reporting boundary
/// - `AwaitingResume → Running` on an external resume signal
/// - `Running → Completed` on iteration exhaustion, convergence, or
///   cancellation
/// - `Running`/`AwaitingResume` `→ Failed` on an unrecoverable step error
///
/// `Completed` and `Failed` are terminal; a finished runtime is replaced by
/// a new instance, never reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Configured but not yet started.
    #[default]
    Idle,
    /// Worker is iterating.
    Running,
    /// Worker is blocked on a resume signal at a reporting boundary.
    AwaitingResume,
    /// Run finished normally (exhaustion, convergence, or cancellation).
    Completed,
    /// Run terminated on an internal error.
    Failed,
}

impl RunState {
    /// Whether this state can never be left.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed | RunState::Failed)
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::AwaitingResume => "awaiting_resume",
            RunState::Completed => "completed",
            RunState::Failed => "failed",
        }
    }
}
