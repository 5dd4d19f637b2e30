//! Events emitted by a running algorithm worker.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::RunError;
use crate::types::Point;

use super::state::RunState;

/// A read-only, point-in-time snapshot emitted at a reporting boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEvent {
    /// Run-local iteration number the snapshot was taken at (1-based).
    pub iteration: u64,
    /// Algorithm-specific payload.
    pub payload: UpdatePayload,
}

/// What a reporting boundary has to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UpdatePayload {
    /// Classification: one linear boundary described by two endpoints.
    DecisionBoundary {
        start: Point,
        end: Point,
        /// The raw `[a, b, c]` coefficients the line was derived from.
        coefficients: [i64; 3],
    },
    /// Clustering: record names grouped by current label, each member
    /// resolved to its point coordinates.
    ClusterAssignment {
        clusters: BTreeMap<String, Vec<(String, Point)>>,
    },
}

impl UpdatePayload {
    /// Builds a cluster grouping from the dataset's current labels.
    pub fn clusters_from(dataset: &Dataset) -> Self {
        let mut clusters: BTreeMap<String, Vec<(String, Point)>> = BTreeMap::new();
        for (name, label) in dataset.labels_view() {
            // Invariant: every labeled record has a location.
            let point = dataset.locations_view()[name];
            clusters
                .entry(label.clone())
                .or_default()
                .push((name.clone(), point));
        }
        Self::ClusterAssignment { clusters }
    }
}

/// Everything a consumer can receive from one run, in order.
///
/// Updates arrive in strictly increasing iteration order; the terminal
/// `Finished` arrives exactly once, after the last update.
#[derive(Debug)]
pub enum RuntimeEvent {
    /// Ordinary reporting-boundary snapshot.
    Update(UpdateEvent),
    /// The run is over; carries the outcome and the dataset back.
    Finished(RunOutcome),
}

/// Terminal notification for one run.
///
/// Distinct from ordinary updates so the consumer can re-enable whatever
/// it disabled for the duration of the run. Returns the dataset (moved
/// into the worker at start) in whatever state the last completed
/// iteration produced.
#[derive(Debug)]
pub struct RunOutcome {
    /// `Completed` or `Failed`.
    pub state: RunState,
    /// Run-local iterations actually executed.
    pub iterations: u64,
    /// Whether the run was cut short by an explicit cancellation.
    pub cancelled: bool,
    /// The error that failed the run, when `state == Failed`.
    pub error: Option<RunError>,
    /// The dataset, returned to the caller.
    pub dataset: Dataset,
}
