//! Validated in-memory collection of labeled 2-D points.
//!
//! A [`Dataset`] owns two parallel maps keyed by record name: one for
//! labels, one for locations. Both maps always have identical key sets;
//! every insert and update maintains that invariant. Ordered maps are used
//! so iteration order, snapshots, and serialized output are deterministic.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;
use crate::types::{Point, Record};

/// The committed collection of records for one loaded input.
///
/// Created empty, populated by the parser, mutated in place by algorithms
/// (label reassignment only: locations and the key set are fixed once
/// loaded), and cleared on a new load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    labels: BTreeMap<String, String>,
    locations: BTreeMap<String, Point>,
}

/// Read-only summary used for configuration validation.
///
/// Classification is only applicable when `label_count >= 2`; clustering
/// requires `1 <= cluster_count <= instances`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Number of records.
    pub instances: usize,
    /// Number of distinct label values.
    pub label_count: usize,
    /// The distinct label values themselves.
    pub distinct_labels: BTreeSet<String>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Adds a record to both maps.
    ///
    /// Uniqueness must already have been established by the duplicate-name
    /// validation pass; a repeated name here is an internal invariant
    /// violation, not a user-facing error.
    pub fn insert(&mut self, record: Record) {
        debug_assert!(
            !self.labels.contains_key(&record.name),
            "insert of duplicate name {:?} (validation must run first)",
            record.name
        );
        self.labels.insert(record.name.clone(), record.label);
        self.locations.insert(record.name, record.location);
    }

    /// Reassigns the label of an existing record.
    pub fn update_label(
        &mut self,
        name: &str,
        new_label: impl Into<String>,
    ) -> Result<(), DatasetError> {
        match self.labels.get_mut(name) {
            Some(label) => {
                *label = new_label.into();
                Ok(())
            }
            None => Err(DatasetError::UnknownRecord { name: name.into() }),
        }
    }

    /// Read-only view of the name → label map.
    pub fn labels_view(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    /// Read-only view of the name → location map.
    pub fn locations_view(&self) -> &BTreeMap<String, Point> {
        &self.locations
    }

    /// Location of a single record.
    pub fn location_of(&self, name: &str) -> Option<Point> {
        self.locations.get(name).copied()
    }

    /// Empties both maps.
    pub fn clear(&mut self) {
        self.labels.clear();
        self.locations.clear();
    }

    /// Distinct label values currently assigned.
    pub fn distinct_labels(&self) -> BTreeSet<String> {
        self.labels.values().cloned().collect()
    }

    /// Number of distinct label values.
    pub fn label_count(&self) -> usize {
        self.distinct_labels().len()
    }

    /// Read-only summary for configuration validation.
    pub fn summary(&self) -> DatasetSummary {
        let distinct_labels = self.distinct_labels();
        DatasetSummary {
            instances: self.len(),
            label_count: distinct_labels.len(),
            distinct_labels,
        }
    }

    /// Serializes back to the tab-separated line format.
    pub fn to_tsd_string(&self) -> String {
        let mut out = String::new();
        for (name, label) in &self.labels {
            // Invariant: key sets are identical, so the location exists.
            let point = &self.locations[name];
            out.push_str(name);
            out.push('\t');
            out.push_str(label);
            out.push('\t');
            out.push_str(&format!("{},{}\n", point.x, point.y));
        }
        out
    }
}
