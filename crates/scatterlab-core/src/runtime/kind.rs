//! Algorithm registry and factory.
//!
//! A tagged variant over the available algorithms plus a small registry
//! keyed by a stable string identifier, decoupled from any presentation
//! concept. Adding an algorithm means adding a variant here and an
//! implementation under `algorithms/`.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::algorithms::{KMeans, RandomClassifier, RandomClusterer};
use crate::dataset::DatasetSummary;
use crate::error::ConfigError;

use super::config::AlgorithmConfig;
use super::runner::Algorithm;

/// The available algorithm families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    /// Baseline classifier emitting a random decision boundary.
    RandomClassifier,
    /// Baseline clusterer assigning uniformly random labels.
    RandomClusterer,
    /// Lloyd's-algorithm k-means clustering.
    KMeans,
}

impl AlgorithmKind {
    /// Every registered kind, in registry order.
    pub fn all() -> &'static [AlgorithmKind] {
        &[
            AlgorithmKind::RandomClassifier,
            AlgorithmKind::RandomClusterer,
            AlgorithmKind::KMeans,
        ]
    }

    /// Stable identifier used by configuration and the CLI.
    pub fn id(&self) -> &'static str {
        match self {
            AlgorithmKind::RandomClassifier => "random-classifier",
            AlgorithmKind::RandomClusterer => "random-clusterer",
            AlgorithmKind::KMeans => "kmeans",
        }
    }

    /// Looks up a kind by its stable identifier.
    pub fn from_id(id: &str) -> Result<Self, ConfigError> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.id() == id)
            .ok_or_else(|| ConfigError::UnknownAlgorithm(id.into()))
    }

    /// Whether this kind partitions records into clusters (and therefore
    /// needs a cluster count).
    pub fn is_clustering(&self) -> bool {
        matches!(
            self,
            AlgorithmKind::RandomClusterer | AlgorithmKind::KMeans
        )
    }

    /// Validates a config against this kind and the dataset it will run on.
    pub fn validate(
        &self,
        config: &AlgorithmConfig,
        summary: &DatasetSummary,
    ) -> Result<(), ConfigError> {
        config.validate()?;
        if self.is_clustering() {
            let requested = config.cluster_count.ok_or(ConfigError::MissingClusterCount)?;
            if requested < 1 || requested as usize > summary.instances {
                return Err(ConfigError::InvalidClusterCount {
                    requested,
                    instances: summary.instances,
                });
            }
        } else if summary.label_count < 2 {
            return Err(ConfigError::NotEnoughLabels {
                found: summary.label_count,
            });
        }
        Ok(())
    }

    /// Builds a fresh algorithm instance for one run.
    ///
    /// `seed` pins the random source for deterministic runs; `None` seeds
    /// from entropy.
    pub fn build(
        &self,
        config: &AlgorithmConfig,
        seed: Option<u64>,
    ) -> Result<Box<dyn Algorithm>, ConfigError> {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(match self {
            AlgorithmKind::RandomClassifier => {
                Box::new(RandomClassifier::new(config.continuous, rng))
            }
            AlgorithmKind::RandomClusterer => {
                let clusters = config.cluster_count.ok_or(ConfigError::MissingClusterCount)?;
                Box::new(RandomClusterer::new(clusters, config.continuous, rng))
            }
            AlgorithmKind::KMeans => {
                let clusters = config.cluster_count.ok_or(ConfigError::MissingClusterCount)?;
                Box::new(KMeans::new(clusters, config.continuous, rng))
            }
        })
    }
}

impl std::fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
