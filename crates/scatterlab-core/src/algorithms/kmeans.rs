//! K-means clustering (Lloyd's algorithm).
//!
//! Initial centroids are the locations of `cluster_count` distinct records
//! chosen uniformly at random without replacement. Each iteration assigns
//! every record to its nearest centroid (ties to the lowest index), then
//! recomputes each centroid as the mean of its members; a cluster with no
//! members keeps its previous centroid. Convergence means no centroid
//! moved at all in the update step.

use rand::seq::index::sample;
use rand_chacha::ChaCha8Rng;

use crate::dataset::Dataset;
use crate::error::{ConfigError, CoreResult};
use crate::runtime::{Algorithm, UpdateEvent, UpdatePayload};
use crate::types::Point;

pub struct KMeans {
    clusters: u32,
    continuous: bool,
    rng: ChaCha8Rng,
    centroids: Vec<Point>,
    moved: bool,
}

impl KMeans {
    pub fn new(clusters: u32, continuous: bool, rng: ChaCha8Rng) -> Self {
        Self {
            clusters,
            continuous,
            rng,
            centroids: Vec::new(),
            // No update step has run yet, so nothing has settled.
            moved: true,
        }
    }

    /// Current centroids, in cluster-index order.
    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }

    /// Index of the nearest centroid; ties break to the lowest index.
    fn nearest_centroid(&self, location: &Point) -> usize {
        let mut best = 0usize;
        let mut best_distance = f64::MAX;
        for (i, centroid) in self.centroids.iter().enumerate() {
            let distance = centroid.distance_to(location);
            if distance < best_distance {
                best_distance = distance;
                best = i;
            }
        }
        best
    }
}

impl Algorithm for KMeans {
    fn name(&self) -> &'static str {
        "kmeans"
    }

    fn initialize(&mut self, dataset: &mut Dataset) -> CoreResult<()> {
        let names: Vec<&String> = dataset.locations_view().keys().collect();
        let k = self.clusters as usize;
        if k < 1 || k > names.len() {
            return Err(ConfigError::InvalidClusterCount {
                requested: self.clusters,
                instances: names.len(),
            }
            .into());
        }

        self.centroids = sample(&mut self.rng, names.len(), k)
            .into_iter()
            .map(|i| dataset.locations_view()[names[i]])
            .collect();
        Ok(())
    }

    fn step(&mut self, dataset: &mut Dataset, _iteration: u64) -> CoreResult<()> {
        // Assign: nearest centroid per record.
        let assignments: Vec<(String, usize)> = dataset
            .locations_view()
            .iter()
            .map(|(name, location)| (name.clone(), self.nearest_centroid(location)))
            .collect();
        for (name, cluster) in &assignments {
            dataset.update_label(name, cluster.to_string())?;
        }

        // Update: mean of assigned locations per cluster.
        let k = self.centroids.len();
        let mut sums = vec![Point::ORIGIN; k];
        let mut counts = vec![0usize; k];
        for (name, cluster) in &assignments {
            // Invariant: assignment names came straight off the key set.
            let location = dataset.locations_view()[name];
            sums[*cluster].x += location.x;
            sums[*cluster].y += location.y;
            counts[*cluster] += 1;
        }

        self.moved = false;
        for i in 0..k {
            if counts[i] == 0 {
                // Empty cluster keeps its previous centroid.
                continue;
            }
            let mean = Point::new(sums[i].x / counts[i] as f64, sums[i].y / counts[i] as f64);
            if mean != self.centroids[i] {
                self.centroids[i] = mean;
                self.moved = true;
            }
        }
        Ok(())
    }

    fn converged(&self) -> bool {
        !self.moved
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
    use crate::types::Record;
    use rand::SeedableRng;

    fn two_blob_dataset() -> Dataset {
        let mut ds = Dataset::new();
        for i in 0..5 {
            ds.insert(Record::new(
                format!("@near{i}"),
                "unlabeled",
                Point::new(i as f64 * 0.5, i as f64 * 0.25),
            ));
            ds.insert(Record::new(
                format!("@far{i}"),
                "unlabeled",
                Point::new(100.0 + i as f64 * 0.5, 100.0 - i as f64 * 0.25),
            ));
        }
        ds
    }

    fn run_to_convergence(seed: u64, ds: &mut Dataset) -> KMeans {
        let mut algo = KMeans::new(2, true, ChaCha8Rng::seed_from_u64(seed));
        algo.initialize(ds).unwrap();
        for i in 1..=100 {
            algo.step(ds, i).unwrap();
            if algo.converged() {
                break;
            }
        }
        assert!(algo.converged(), "did not converge in 100 iterations");
        algo
    }

    #[test]
    fn initialize_picks_distinct_record_locations() {
        let mut ds = two_blob_dataset();
        let mut algo = KMeans::new(2, true, ChaCha8Rng::seed_from_u64(0));
        algo.initialize(&mut ds).unwrap();

        let centroids = algo.centroids();
        assert_eq!(centroids.len(), 2);
        assert_ne!(centroids[0], centroids[1]);
        for c in centroids {
            assert!(ds.locations_view().values().any(|p| p == c));
        }
    }

    #[test]
    fn initialize_rejects_oversized_cluster_count() {
        let mut ds = two_blob_dataset();
        let mut algo = KMeans::new(11, true, ChaCha8Rng::seed_from_u64(0));
        assert!(algo.initialize(&mut ds).is_err());
    }

    #[test]
    fn separated_blobs_split_cleanly_for_any_seed() {
        for seed in 0..10 {
            let mut ds = two_blob_dataset();
            run_to_convergence(seed, &mut ds);

            let near_label = &ds.labels_view()["@near0"];
            let far_label = &ds.labels_view()["@far0"];
            assert_ne!(near_label, far_label, "seed {seed}");
            for (name, label) in ds.labels_view() {
                let expected = if name.starts_with("@near") {
                    near_label
                } else {
                    far_label
                };
                assert_eq!(label, expected, "seed {seed}, record {name}");
            }
        }
    }

    #[test]
    fn converged_run_has_centroids_at_blob_means() {
        // The mean of each blob is fixed by construction.
        let mut ds = two_blob_dataset();
        let algo = run_to_convergence(3, &mut ds);

        let near_mean = Point::new(1.0, 0.5);
        let far_mean = Point::new(101.0, 99.5);
        let mut found_near = false;
        let mut found_far = false;
        for c in algo.centroids() {
            if *c == near_mean {
                found_near = true;
            }
            if *c == far_mean {
                found_far = true;
            }
        }
        assert!(found_near && found_far);
    }

    #[test]
    fn tie_breaks_to_lowest_index() {
        let mut ds = Dataset::new();
        ds.insert(Record::new("@l", "u", Point::new(0.0, 0.0)));
        ds.insert(Record::new("@r", "u", Point::new(2.0, 0.0)));
        ds.insert(Record::new("@mid", "u", Point::new(1.0, 0.0)));

        let mut algo = KMeans::new(2, true, ChaCha8Rng::seed_from_u64(0));
        algo.centroids = vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)];
        algo.step(&mut ds, 1).unwrap();

        // "@mid" is equidistant from both centroids; lowest index wins.
        assert_eq!(ds.labels_view()["@mid"], "0");
    }

    #[test]
    fn empty_cluster_keeps_its_centroid() {
        let mut ds = Dataset::new();
        ds.insert(Record::new("@a", "u", Point::new(0.0, 0.0)));
        ds.insert(Record::new("@b", "u", Point::new(1.0, 0.0)));

        let mut algo = KMeans::new(2, true, ChaCha8Rng::seed_from_u64(0));
        let far = Point::new(1000.0, 1000.0);
        algo.centroids = vec![Point::new(0.5, 0.0), far];
        algo.step(&mut ds, 1).unwrap();

        // Everything lands in cluster 0; cluster 1 must keep its centroid.
        assert_eq!(algo.centroids()[1], far);
    }
}
