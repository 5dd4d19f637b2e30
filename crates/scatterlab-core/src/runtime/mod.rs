//! The algorithm execution contract.
//!
//! Configuration, state machine, iteration loop, reporting cadence, and
//! the pause/resume protocol shared by every algorithm. Algorithms
//! implement [`Algorithm`]; everything else — the worker task, boundary
//! reporting, blocking on resume, failure propagation — lives in the
//! runtime and is identical across algorithm families.

mod config;
mod context;
mod events;
mod kind;
mod runner;
mod state;

pub use config::{AlgorithmConfig, DEFAULT_ITERATION_DELAY};
pub use context::RunContext;
pub use events::{RunOutcome, RuntimeEvent, UpdateEvent, UpdatePayload};
pub use kind::AlgorithmKind;
pub use runner::{Algorithm, AlgorithmRunner, RunHandle};
pub use state::RunState;
