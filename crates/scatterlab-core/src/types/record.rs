//! A single named, labeled, located data point.

use serde::{Deserialize, Serialize};

use super::Point;

/// Sentinel character every record name must start with.
pub const NAME_SENTINEL: char = '@';

/// One parsed line of the tab-separated data format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Globally unique name, always starting with [`NAME_SENTINEL`].
    pub name: String,
    /// Current label; mutated by clustering algorithms after load.
    pub label: String,
    /// Fixed location; never changes once loaded.
    pub location: Point,
}

impl Record {
    pub fn new(name: impl Into<String>, label: impl Into<String>, location: Point) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            location,
        }
    }
}
