//! scatterlab-core
//!
//! Ingests tab-separated labeled 2-D point data, validates and parses it
//! into an in-memory [`Dataset`], and runs interchangeable iterative
//! analysis algorithms against it on a background worker.
//!
//! # Architecture
//!
//! - [`tsd`]: the line format — per-line parsing, duplicate-name
//!   validation, aggregated error reporting, file round-trips
//! - [`dataset`]: the committed collection of named, labeled, located
//!   points, plus the read-only summary used for configuration checks
//! - [`runtime`]: the execution contract shared by all algorithms —
//!   configuration, the run state machine, reporting cadence,
//!   pause/resume, cancellation
//! - [`algorithms`]: the hosted algorithms (random baselines, k-means)
//! - [`error`]: typed errors and the [`CoreResult`] alias
//!
//! # Example
//!
//! ```
//! use scatterlab_core::tsd;
//!
//! let dataset = tsd::parse_dataset("@a\tred\t0,0\n@b\tblue\t10,10\n").unwrap();
//! let summary = dataset.summary();
//! assert_eq!(summary.instances, 2);
//! assert_eq!(summary.label_count, 2);
//! ```

pub mod algorithms;
pub mod dataset;
pub mod error;
pub mod runtime;
pub mod tsd;
pub mod types;

// Re-exports for convenience
pub use dataset::{Dataset, DatasetSummary};
pub use error::{CoreError, CoreResult};
pub use runtime::{
    Algorithm, AlgorithmConfig, AlgorithmKind, AlgorithmRunner, RunContext, RunHandle,
    RunOutcome, RunState, RuntimeEvent, UpdateEvent, UpdatePayload,
};
pub use types::{Point, Record};
