//! Random baseline classifier.
//!
//! Performs no learning: every iteration draws fresh integer coefficients
//! and derives a two-point line description from them. Exists to exercise
//! the runtime contract end to end with a classification-shaped output.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::dataset::Dataset;
use crate::error::CoreResult;
use crate::runtime::{Algorithm, UpdateEvent, UpdatePayload};
use crate::types::Point;

pub struct RandomClassifier {
    continuous: bool,
    rng: ChaCha8Rng,
    coefficients: [i64; 3],
}

impl RandomClassifier {
    pub fn new(continuous: bool, rng: ChaCha8Rng) -> Self {
        Self {
            continuous,
            rng,
            coefficients: [0, 1, 0],
        }
    }

    /// The `[a, b, c]` coefficients drawn by the latest iteration.
    pub fn coefficients(&self) -> [i64; 3] {
        self.coefficients
    }

    /// Two endpoints of the line `ax + by + c = 0` in the drawn scale:
    /// `(0, c)` and `(10a, (-10a - c) / b)`.
    fn line(&self) -> (Point, Point) {
        let [a, b, c] = self.coefficients;
        let start = Point::new(0.0, c as f64);
        let end_x = (a * 10) as f64;
        let end = Point::new(end_x, (-end_x - c as f64) / b as f64);
        (start, end)
    }
}

impl Algorithm for RandomClassifier {
    fn name(&self) -> &'static str {
        "random-classifier"
    }

    fn step(&mut self, _dataset: &mut Dataset, _iteration: u64) -> CoreResult<()> {
        // b is drawn from [1, 100) so the slope division is always defined.
        self.coefficients = [
            self.rng.gen_range(0..100),
            self.rng.gen_range(1..100),
            self.rng.gen_range(0..100),
        ];
        Ok(())
    }

    fn continue_past_boundary(&self) -> bool {
        self.continuous
    }

    fn snapshot(&self, _dataset: &Dataset, iteration: u64) -> UpdateEvent {
        let (start, end) = self.line();
        UpdateEvent {
            iteration,
            payload: UpdatePayload::DecisionBoundary {
                start,
                end,
                coefficients: self.coefficients,
            },
        }
    }
}
