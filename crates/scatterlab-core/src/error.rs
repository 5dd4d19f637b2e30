//! Error types for scatterlab-core.
//!
//! Each sub-error covers one concern:
//!
//! - [`ParseError`]: per-line failures in the tab-separated data format
//! - [`DatasetError`]: operations against records that do not exist
//! - [`ConfigError`]: out-of-range algorithm configuration
//! - [`RunError`]: runtime protocol misuse and in-run failures
//!
//! [`CoreError`] unifies them; library code returns [`CoreResult`] and
//! propagates with `?`. Parse errors are never raised one line at a time:
//! they are accumulated into a [`ParseReport`](crate::tsd::ParseReport) and
//! surfaced once per input.

use thiserror::Error;

use crate::tsd::ParseReport;

/// A single line of input failed to parse.
///
/// These are expected, recoverable conditions modeled as values, not
/// panics. They carry enough detail for the aggregated report to point a
/// user at the offending line.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum ParseError {
    /// Wrong field count, or the coordinate pair did not parse.
    #[error("malformed record: {reason}")]
    MalformedRecord {
        /// What exactly was wrong with the line
        reason: String,
    },

    /// Record name does not start with the reserved `@` sentinel.
    #[error("invalid name {name:?}: record names must start with '@'")]
    InvalidName {
        /// The name field as it appeared in the input
        name: String,
    },

    /// The same record name appeared earlier in the input.
    ///
    /// Reported against the line of the *second* occurrence.
    #[error("duplicate name {name:?}: first seen on an earlier line")]
    DuplicateName {
        /// The repeated name
        name: String,
    },
}

/// Dataset-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// A label update referenced a name that is not in the dataset.
    #[error("unknown record {name:?}")]
    UnknownRecord {
        /// The missing record name
        name: String,
    },
}

/// Algorithm configuration errors.
///
/// Raised synchronously at configure time, before any worker is spawned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `max_iterations` must be at least 1.
    #[error("max_iterations must be >= 1, got {0}")]
    InvalidMaxIterations(u32),

    /// `update_interval` must be at least 1.
    #[error("update_interval must be >= 1, got {0}")]
    InvalidUpdateInterval(u32),

    /// A clustering algorithm was configured without a cluster count.
    #[error("clustering requires a cluster count")]
    MissingClusterCount,

    /// Cluster count outside `1..=instances`.
    #[error("cluster count {requested} out of range for {instances} instances")]
    InvalidClusterCount {
        /// Requested number of clusters
        requested: u32,
        /// Number of records in the dataset
        instances: usize,
    },

    /// Classification needs at least two distinct labels in the dataset.
    #[error("classification requires >= 2 distinct labels, dataset has {found}")]
    NotEnoughLabels {
        /// Distinct labels present
        found: usize,
    },

    /// No algorithm registered under this identifier.
    #[error("unknown algorithm {0:?}")]
    UnknownAlgorithm(String),
}

/// Runtime protocol and in-run errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// `start` was called on a runner whose worker was already started.
    #[error("a run is already active for this runner")]
    RunAlreadyActive,

    /// `resume` was called while the worker was not awaiting resume.
    #[error("run is not paused")]
    RunNotPaused,

    /// An iteration step failed. Terminates the run in the `Failed` state;
    /// never retried, never swallowed.
    #[error("algorithm internal error: {0}")]
    AlgorithmInternal(String),

    /// The worker task disappeared without delivering an outcome.
    #[error("worker terminated without reporting an outcome")]
    WorkerLost,
}

/// Unified error type for scatterlab-core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Aggregated per-line parse failures for one input.
    #[error("parse failed: {0}")]
    Parse(#[from] ParseReport),

    /// Dataset operation failure.
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Configuration rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Runtime protocol misuse or in-run failure.
    #[error("run error: {0}")]
    Run(#[from] RunError),

    /// Underlying file I/O failure when loading or saving `.tsd` data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type CoreResult<T> = Result<T, CoreError>;
