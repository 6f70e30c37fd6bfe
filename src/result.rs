use crate::algorithm::RefinementOutput;
use ndarray::{Array2, ArrayView1};

/// Outcome of a clustering run.
///
/// Groups hold the caller's items (not their vectors) in their original
/// relative order. Centroids are indices into the clustered items.
#[derive(Debug, Clone)]
pub struct ClusteringResult<T> {
    groups: Vec<Vec<T>>,
    labels: Vec<usize>,
    means: Array2<f64>,
    counts: Vec<usize>,
    centroids: Vec<Option<usize>>,
    total_distance: f64,
    n_iterations: usize,
    converged: bool,
}

impl<T: Clone> ClusteringResult<T> {
    /// Group `items` by the final labels of `output`
    pub(crate) fn assemble(items: &[T], output: RefinementOutput) -> Self {
        // Counts come from the last mean pass and only size the groups; the
        // final reassignment may have moved points since.
        let mut groups: Vec<Vec<T>> = output
            .counts
            .iter()
            .map(|&count| Vec::with_capacity(count))
            .collect();

        for (item, &label) in items.iter().zip(&output.labels) {
            groups[label].push(item.clone());
        }

        Self {
            groups,
            labels: output.labels,
            means: output.means,
            counts: output.counts,
            centroids: output.centroids,
            total_distance: output.total_distance,
            n_iterations: output.n_iterations,
            converged: output.converged,
        }
    }
}

impl<T> ClusteringResult<T> {
    /// Items of each cluster, indexed by cluster
    pub fn groups(&self) -> &[Vec<T>] {
        &self.groups
    }

    /// Consume the result and return only the groups
    pub fn into_groups(self) -> Vec<Vec<T>> {
        self.groups
    }

    /// Final cluster of each item, aligned with the input
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Cluster means of shape `(k, n_features)`. Empty clusters have an
    /// all-zero mean.
    pub fn means(&self) -> &Array2<f64> {
        &self.means
    }

    /// Mean of one cluster
    ///
    /// # Panics
    ///
    /// Panics if `cluster >= self.n_clusters()`.
    pub fn mean(&self, cluster: usize) -> ArrayView1<'_, f64> {
        self.means.row(cluster)
    }

    /// Index of the item representing each cluster. `None` only for an
    /// empty cluster when every item already represents another cluster.
    pub fn centroid_indices(&self) -> &[Option<usize>] {
        &self.centroids
    }

    /// Cluster sizes as of the last mean computation
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Sum of each item's distance to its cluster mean, measured during the
    /// last mean computation
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Number of refinement passes that ran
    pub fn n_iterations(&self) -> usize {
        self.n_iterations
    }

    /// Whether the last pass moved no item
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Number of clusters, `k`, including empty ones
    pub fn n_clusters(&self) -> usize {
        self.groups.len()
    }
}
