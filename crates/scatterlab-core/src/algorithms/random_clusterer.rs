//! Random baseline clusterer.
//!
//! Every iteration reassigns every record a uniformly random cluster label,
//! independent of the previous assignment. It never converges; termination
//! is entirely up to `max_iterations` and the continuous flag.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::dataset::Dataset;
use crate::error::CoreResult;
use crate::runtime::{Algorithm, UpdateEvent, UpdatePayload};

pub struct RandomClusterer {
    clusters: u32,
    continuous: bool,
    rng: ChaCha8Rng,
}

impl RandomClusterer {
    pub fn new(clusters: u32, continuous: bool, rng: ChaCha8Rng) -> Self {
        Self {
            clusters,
            continuous,
            rng,
        }
    }
}

impl Algorithm for RandomClusterer {
    fn name(&self) -> &'static str {
        "random-clusterer"
    }

    fn step(&mut self, dataset: &mut Dataset, _iteration: u64) -> CoreResult<()> {
        let names: Vec<String> = dataset.labels_view().keys().cloned().collect();
        for name in names {
            let label = self.rng.gen_range(0..self.clusters).to_string();
            dataset.update_label(&name, label)?;
        }
        Ok(())
    }

    fn continue_past_boundary(&self) -> bool {
        self.continuous
    }

    fn snapshot(&self, dataset: &Dataset, iteration: u64) -> UpdateEvent {
        UpdateEvent {
            iteration,
            payload: UpdatePayload::clusters_from(dataset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, Record};
    use rand::SeedableRng;

    fn dataset(n: usize) -> Dataset {
        let mut ds = Dataset::new();
        for i in 0..n {
            ds.insert(Record::new(
                format!("@p{i}"),
                "unlabeled",
                Point::new(i as f64, i as f64),
            ));
        }
        ds
    }

    #[test]
    fn every_record_gets_a_cluster_index_label() {
        let mut ds = dataset(20);
        let mut algo = RandomClusterer::new(3, true, ChaCha8Rng::seed_from_u64(9));
        algo.step(&mut ds, 1).unwrap();

        for label in ds.labels_view().values() {
            let index: u32 = label.parse().unwrap();
            assert!(index < 3);
        }
        // Key set untouched.
        assert_eq!(ds.len(), 20);
    }

    #[test]
    fn never_converges() {
        let algo = RandomClusterer::new(2, true, ChaCha8Rng::seed_from_u64(0));
        assert!(!algo.converged());
    }

    #[test]
    fn assignments_are_independent_of_previous_iteration() {
        // With 20 records and 4 clusters, two seeded iterations producing
        // identical assignments would be a (1/4)^20 coincidence.
        let mut ds = dataset(20);
        let mut algo = RandomClusterer::new(4, true, ChaCha8Rng::seed_from_u64(5));
        algo.step(&mut ds, 1).unwrap();
        let first: Vec<String> = ds.labels_view().values().cloned().collect();
        algo.step(&mut ds, 2).unwrap();
        let second: Vec<String> = ds.labels_view().values().cloned().collect();
        assert_ne!(first, second);
    }
}
