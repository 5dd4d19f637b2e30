//! Algorithm run configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default courtesy delay between iterations.
///
/// Keeps the worker from starving the consumer's event handling. Purely a
/// scheduling courtesy, not a correctness requirement; tests set it to zero.
pub const DEFAULT_ITERATION_DELAY: Duration = Duration::from_millis(10);

/// Immutable configuration for one algorithm run.
///
/// A new run requires a new config; nothing here changes once the worker
/// starts. Collapses the original parameter hierarchy into a single value
/// type: the clustering-only field is an `Option` validated at configure
/// time rather than a subclass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmConfig {
    /// Upper bound on iterations for this run. Must be >= 1.
    pub max_iterations: u32,
    /// Iterations between emitted update events. Must be >= 1.
    pub update_interval: u32,
    /// Whether the run continues past reporting boundaries without pausing.
    pub continuous: bool,
    /// Number of clusters; required by clustering algorithms only.
    pub cluster_count: Option<u32>,
    /// Courtesy delay between iterations.
    #[serde(default = "default_iteration_delay", with = "duration_millis")]
    pub iteration_delay: Duration,
}

fn default_iteration_delay() -> Duration {
    DEFAULT_ITERATION_DELAY
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1,
            update_interval: 1,
            continuous: true,
            cluster_count: None,
            iteration_delay: DEFAULT_ITERATION_DELAY,
        }
    }
}

impl AlgorithmConfig {
    /// Range checks shared by every algorithm kind.
    ///
    /// Kind-specific checks (cluster count against the dataset, label
    /// requirements for classification) live on
    /// [`AlgorithmKind::validate`](super::AlgorithmKind::validate).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations < 1 {
            return Err(ConfigError::InvalidMaxIterations(self.max_iterations));
        }
        if self.update_interval < 1 {
            return Err(ConfigError::InvalidUpdateInterval(self.update_interval));
        }
        Ok(())
    }
}
