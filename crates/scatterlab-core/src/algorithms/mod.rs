//! Algorithm implementations hosted by the runtime.

mod kmeans;
mod random_classifier;
mod random_clusterer;

pub use kmeans::KMeans;
pub use random_classifier::RandomClassifier;
pub use random_clusterer::RandomClusterer;
