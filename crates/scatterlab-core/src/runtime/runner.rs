//! Algorithm execution: the worker loop, pause/resume, and cancellation.
//!
//! One run executes on exactly one spawned worker task. The consumer never
//! touches the live dataset: updates are delivered as owned snapshots over
//! an unbounded channel, so the worker never blocks on presentation-layer
//! work. The only blocking point inside the worker is the awaiting-resume
//! wait, implemented as a [`Notify`] handshake rather than a poll loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::dataset::{Dataset, DatasetSummary};
use crate::error::{ConfigError, CoreResult, RunError};

use super::config::AlgorithmConfig;
use super::context::RunContext;
use super::events::{RunOutcome, RuntimeEvent, UpdateEvent};
use super::kind::AlgorithmKind;
use super::state::RunState;

/// One iterative analysis algorithm, as seen by the runtime.
///
/// The runtime owns the loop, the reporting cadence, pause/resume, and
/// failure handling; an implementation only supplies the per-iteration
/// work and its two stopping signals.
pub trait Algorithm: Send {
    /// Stable identifier, matching [`AlgorithmKind::id`] for built-ins.
    fn name(&self) -> &'static str;

    /// One-time setup before the first iteration (e.g. centroid seeding).
    fn initialize(&mut self, _dataset: &mut Dataset) -> CoreResult<()> {
        Ok(())
    }

    /// One iteration of work. May reassign dataset labels and mutate
    /// internal state; must not touch locations or the key set.
    fn step(&mut self, dataset: &mut Dataset, iteration: u64) -> CoreResult<()>;

    /// Internal stopping condition (e.g. convergence). Checked after every
    /// step; a `true` completes the run.
    fn converged(&self) -> bool {
        false
    }

    /// Continuation predicate evaluated at reporting boundaries. A `false`
    /// sends the run into `AwaitingResume` until the controller resumes it.
    fn continue_past_boundary(&self) -> bool;

    /// Owned snapshot for one reporting boundary.
    fn snapshot(&self, dataset: &Dataset, iteration: u64) -> UpdateEvent;
}

/// State shared between the worker task and the controller-side handle.
#[derive(Debug)]
struct Shared {
    state: RwLock<RunState>,
    resume: Notify,
    cancelled: AtomicBool,
    ctx: RunContext,
}

/// A configured, not-yet-started run.
///
/// Validation happens here, synchronously, so a worker is only ever
/// spawned for a config the dataset can actually satisfy. A runner hosts
/// at most one run; finished runtimes are replaced, not reused.
pub struct AlgorithmRunner {
    config: AlgorithmConfig,
    algorithm: Mutex<Option<Box<dyn Algorithm>>>,
    shared: Arc<Shared>,
}

impl AlgorithmRunner {
    /// Validates `config` for `kind` against the dataset summary and
    /// builds the runner.
    pub fn configure(
        kind: AlgorithmKind,
        config: AlgorithmConfig,
        summary: &DatasetSummary,
        ctx: RunContext,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        kind.validate(&config, summary)?;
        let algorithm = kind.build(&config, seed)?;
        debug!(algorithm = kind.id(), ?config, "run configured");
        Ok(Self::with_algorithm(config, ctx, algorithm))
    }

    /// Wraps an already-built algorithm. Range-checks the config but skips
    /// kind-specific validation; intended for custom [`Algorithm`]
    /// implementations hosted behind the same contract.
    pub fn with_algorithm(
        config: AlgorithmConfig,
        ctx: RunContext,
        algorithm: Box<dyn Algorithm>,
    ) -> Self {
        Self {
            config,
            algorithm: Mutex::new(Some(algorithm)),
            shared: Arc::new(Shared {
                state: RwLock::new(RunState::Idle),
                resume: Notify::new(),
                cancelled: AtomicBool::new(false),
                ctx,
            }),
        }
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        *self.shared.state.read()
    }

    /// Moves the dataset into a dedicated worker task and begins iterating.
    ///
    /// Fails with [`RunError::RunAlreadyActive`] if this runner's run was
    /// already started. The returned handle is the only way to observe the
    /// run and to get the dataset back.
    pub fn start(&self, dataset: Dataset) -> Result<RunHandle, RunError> {
        let algorithm = self
            .algorithm
            .lock()
            .take()
            .ok_or(RunError::RunAlreadyActive)?;

        let (tx, rx) = mpsc::unbounded_channel();
        let shared = Arc::clone(&self.shared);
        let config = self.config.clone();

        info!(algorithm = algorithm.name(), "starting run worker");
        tokio::spawn(run_worker(algorithm, config, shared, tx, dataset));

        Ok(RunHandle {
            shared: Arc::clone(&self.shared),
            events: rx,
        })
    }
}

/// Controller-side handle to a started run.
pub struct RunHandle {
    shared: Arc<Shared>,
    events: mpsc::UnboundedReceiver<RuntimeEvent>,
}

impl RunHandle {
    /// Current run state.
    pub fn state(&self) -> RunState {
        *self.shared.state.read()
    }

    /// Releases a worker blocked in `AwaitingResume`.
    ///
    /// Errors with [`RunError::RunNotPaused`] if the worker is not
    /// currently paused.
    pub fn resume(&self) -> Result<(), RunError> {
        let mut state = self.shared.state.write();
        if *state != RunState::AwaitingResume {
            return Err(RunError::RunNotPaused);
        }
        *state = RunState::Running;
        self.shared.ctx.set_run_in_progress(true);
        self.shared.resume.notify_one();
        debug!("resume signalled");
        Ok(())
    }

    /// Requests termination. Observed at the top of the next iteration (or
    /// immediately if the worker is paused); the run then finishes
    /// deterministically with `cancelled` set on its outcome.
    pub fn cancel(&self) {
        self.shared.cancelled.store(true, Ordering::SeqCst);
        self.shared.resume.notify_one();
        debug!("cancellation requested");
    }

    /// Next event from the run, in order. `None` after `Finished` has been
    /// consumed.
    pub async fn next_event(&mut self) -> Option<RuntimeEvent> {
        self.events.recv().await
    }

    /// Non-blocking variant of [`next_event`](Self::next_event).
    pub fn try_next_event(&mut self) -> Option<RuntimeEvent> {
        self.events.try_recv().ok()
    }

    /// Drains events until the terminal notification and returns it.
    ///
    /// Intermediate updates are discarded; use [`next_event`](Self::next_event)
    /// to observe them.
    pub async fn join(mut self) -> Result<RunOutcome, RunError> {
        while let Some(event) = self.events.recv().await {
            if let RuntimeEvent::Finished(outcome) = event {
                return Ok(outcome);
            }
        }
        Err(RunError::WorkerLost)
    }
}

/// The worker loop: one run from start to terminal state.
async fn run_worker(
    mut algorithm: Box<dyn Algorithm>,
    config: AlgorithmConfig,
    shared: Arc<Shared>,
    events: mpsc::UnboundedSender<RuntimeEvent>,
    mut dataset: Dataset,
) {
    *shared.state.write() = RunState::Running;
    shared.ctx.mark_started();
    shared.ctx.set_run_in_progress(true);

    let mut iterations_run: u64 = 0;
    let mut cancelled = false;
    let mut error: Option<RunError> = None;

    if let Err(e) = algorithm.initialize(&mut dataset) {
        error = Some(RunError::AlgorithmInternal(e.to_string()));
    } else {
        while iterations_run < u64::from(config.max_iterations) {
            // Cancellation is observed only here and while paused, so a
            // cancelled run always ends on a completed iteration.
            if shared.cancelled.load(Ordering::SeqCst) {
                cancelled = true;
                break;
            }

            let shared_count = shared.ctx.next_iteration();
            iterations_run += 1;

            if let Err(e) = algorithm.step(&mut dataset, iterations_run) {
                warn!(
                    algorithm = algorithm.name(),
                    iteration = iterations_run,
                    error = %e,
                    "iteration step failed"
                );
                error = Some(RunError::AlgorithmInternal(e.to_string()));
                break;
            }

            if shared_count % u64::from(config.update_interval) == 0 {
                let update = algorithm.snapshot(&dataset, iterations_run);
                if events.send(RuntimeEvent::Update(update)).is_err() {
                    debug!("consumer gone; run continues without updates");
                }

                if algorithm.converged() {
                    debug!(iteration = iterations_run, "converged at boundary");
                    break;
                }

                if !algorithm.continue_past_boundary() {
                    *shared.state.write() = RunState::AwaitingResume;
                    shared.ctx.set_run_in_progress(false);
                    debug!(iteration = iterations_run, "awaiting resume");
                    shared.resume.notified().await;
                    if shared.cancelled.load(Ordering::SeqCst) {
                        cancelled = true;
                        break;
                    }
                }
            } else if algorithm.converged() {
                debug!(iteration = iterations_run, "converged");
                break;
            }

            if !config.iteration_delay.is_zero() {
                tokio::time::sleep(config.iteration_delay).await;
            }
        }
    }

    let state = if error.is_some() {
        RunState::Failed
    } else {
        RunState::Completed
    };
    *shared.state.write() = state;
    shared.ctx.set_run_in_progress(false);
    info!(
        algorithm = algorithm.name(),
        state = state.name(),
        iterations = iterations_run,
        cancelled,
        "run finished"
    );

    let _ = events.send(RuntimeEvent::Finished(RunOutcome {
        state,
        iterations: iterations_run,
        cancelled,
        error,
        dataset,
    }));
}
