/// Configuration for the MedoidKMeans algorithm
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Maximum number of refinement passes. The algorithm stops earlier as
    /// soon as a reassignment pass moves no point.
    pub max_iters: usize,

    /// Random seed for the initial membership assignment
    pub seed: u64,

    /// Dataset indices used as the initial centroids, one per cluster.
    /// When set and of length `k`, every point starts in the cluster of its
    /// nearest listed centroid and `seed` is ignored. A list of any other
    /// length is ignored and random initialization is used instead.
    pub initial_centroids: Option<Vec<usize>>,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 8,
            max_iters: 100,
            seed: 0,
            initial_centroids: None,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the initial centroid indices
    pub fn with_initial_centroids(mut self, indices: Option<Vec<usize>>) -> Self {
        self.initial_centroids = indices;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = KMeansConfig::new(3)
            .with_max_iters(7)
            .with_seed(99)
            .with_initial_centroids(Some(vec![0, 4, 9]));

        assert_eq!(config.k, 3);
        assert_eq!(config.max_iters, 7);
        assert_eq!(config.seed, 99);
        assert_eq!(config.initial_centroids, Some(vec![0, 4, 9]));
    }

    #[test]
    fn test_default_has_no_initial_centroids() {
        let config = KMeansConfig::default();
        assert!(config.initial_centroids.is_none());
        assert_eq!(config.seed, 0);
    }
}
