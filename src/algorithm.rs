use crate::config::KMeansConfig;
use crate::distance::{nearest, Metric};
use crate::error::KMeansError;
use crate::init::{initialize, Initialization};
use ndarray::{Array2, ArrayView2};
use std::time::Instant;

/// Final state of one run of the refinement loop
#[derive(Debug, Clone)]
pub(crate) struct RefinementOutput {
    pub labels: Vec<usize>,
    pub means: Array2<f64>,
    pub counts: Vec<usize>,
    pub centroids: Vec<Option<usize>>,
    pub total_distance: f64,
    pub n_iterations: usize,
    pub converged: bool,
}

/// Working state owned by a single run
struct Workspace {
    labels: Vec<usize>,
    means: Array2<f64>,
    counts: Vec<usize>,
    centroids: Vec<Option<usize>>,
    total_distance: f64,
}

/// Run the medoid k-means refinement loop
///
/// Each pass recomputes the cluster means, nominates as centroid the member
/// nearest to its cluster mean, then moves every point to the cluster of its
/// nearest centroid. The loop stops when a pass moves no point or after
/// `config.max_iters` passes.
pub(crate) fn medoid_kmeans<M: Metric + ?Sized>(
    data: &ArrayView2<f64>,
    config: &KMeansConfig,
    metric: &M,
) -> Result<RefinementOutput, KMeansError> {
    validate(data, config.k)?;

    let n_samples = data.nrows();
    let n_features = data.ncols();
    let k = config.k;

    tracing::debug!(
        n_samples,
        n_features,
        k,
        seeded = config.initial_centroids.is_some(),
        "starting medoid k-means"
    );

    let Initialization { labels, centroids } = initialize(data, config, metric)?;
    let mut ws = Workspace {
        labels,
        means: Array2::zeros((k, n_features)),
        counts: vec![0; k],
        centroids,
        total_distance: 0.0,
    };

    let mut changed = true;
    let mut n_iterations = 0;

    while changed && n_iterations < config.max_iters {
        let iter_start = Instant::now();

        let reseeded = ws.update_means_and_centroids(data, metric);
        let moved = ws.reassign(data, metric);
        changed = moved > 0;
        n_iterations += 1;

        tracing::debug!(
            iteration = n_iterations,
            max_iters = config.max_iters,
            total_distance = ws.total_distance,
            moved,
            reseeded,
            elapsed_s = iter_start.elapsed().as_secs_f64(),
            "refinement pass complete"
        );
    }

    if changed {
        tracing::info!(
            iterations = n_iterations,
            total_distance = ws.total_distance,
            "stopped at the iteration cap before assignments stabilized"
        );
    } else {
        tracing::info!(
            iterations = n_iterations,
            total_distance = ws.total_distance,
            "converged"
        );
    }

    Ok(RefinementOutput {
        labels: ws.labels,
        means: ws.means,
        counts: ws.counts,
        centroids: ws.centroids,
        total_distance: ws.total_distance,
        n_iterations,
        converged: !changed,
    })
}

fn validate(data: &ArrayView2<f64>, k: usize) -> Result<(), KMeansError> {
    if k == 0 {
        return Err(KMeansError::InvalidK(
            "k must be greater than 0".to_string(),
        ));
    }

    if data.nrows() == 0 {
        return Err(KMeansError::InsufficientData(
            "at least one sample is required".to_string(),
        ));
    }

    if data.ncols() == 0 {
        return Err(KMeansError::InvalidDimensions(
            "samples must have at least one feature".to_string(),
        ));
    }

    Ok(())
}

impl Workspace {
    /// Recompute means, counts, total distance and centroids from the
    /// current labels. Returns the number of empty clusters that were given
    /// a replacement centroid.
    fn update_means_and_centroids<M: Metric + ?Sized>(
        &mut self,
        data: &ArrayView2<f64>,
        metric: &M,
    ) -> usize {
        let k = self.counts.len();

        self.means.fill(0.0);
        self.counts.iter_mut().for_each(|count| *count = 0);

        for (point, &label) in data.outer_iter().zip(&self.labels) {
            let mut mean = self.means.row_mut(label);
            mean += &point;
            self.counts[label] += 1;
        }

        // Empty clusters divide by one and keep a zero mean
        for (mut mean, &count) in self.means.outer_iter_mut().zip(&self.counts) {
            mean /= count.max(1) as f64;
        }

        // Member nearest to its cluster mean, first in dataset order on ties
        let mut best: Vec<Option<(usize, f64)>> = vec![None; k];
        let mut mean_dists = Vec::with_capacity(data.nrows());
        self.total_distance = 0.0;

        for (idx, (point, &label)) in data.outer_iter().zip(&self.labels).enumerate() {
            let dist = metric.distance(point, self.means.row(label));
            self.total_distance += dist;
            mean_dists.push(dist);

            if best[label].map_or(true, |(_, best_dist)| dist < best_dist) {
                best[label] = Some((idx, dist));
            }
        }

        let mut empty = Vec::new();
        for (cluster, slot) in best.iter().enumerate() {
            match slot {
                Some((idx, _)) => self.centroids[cluster] = Some(*idx),
                None => empty.push(cluster),
            }
        }

        if !empty.is_empty() {
            self.reseed_empty(&empty, &mean_dists);
            tracing::debug!(empty = empty.len(), "reseeded empty clusters");
        }

        empty.len()
    }

    /// Give each empty cluster a data point that is not already a centroid,
    /// taking the points farthest from their own cluster mean first.
    fn reseed_empty(&mut self, empty: &[usize], mean_dists: &[f64]) {
        let mut is_centroid = vec![false; mean_dists.len()];
        for (cluster, centroid) in self.centroids.iter().enumerate() {
            if self.counts[cluster] > 0 {
                if let Some(idx) = centroid {
                    is_centroid[*idx] = true;
                }
            }
        }

        let mut candidates: Vec<usize> = (0..mean_dists.len())
            .filter(|&idx| !is_centroid[idx])
            .collect();
        // Stable sort keeps lower indices first among equal distances
        candidates.sort_by(|&a, &b| mean_dists[b].total_cmp(&mean_dists[a]));

        let mut candidates = candidates.into_iter();
        for &cluster in empty {
            self.centroids[cluster] = candidates.next();
        }
    }

    /// Move every point to the cluster of its nearest centroid. Returns the
    /// number of points whose label changed.
    fn reassign<M: Metric + ?Sized>(&mut self, data: &ArrayView2<f64>, metric: &M) -> usize {
        let centroids = &self.centroids;
        let mut moved = 0;

        for (point, label) in data.outer_iter().zip(self.labels.iter_mut()) {
            let candidates = centroids
                .iter()
                .map(|centroid| centroid.map(|idx| data.row(idx)));

            if let Some(cluster) = nearest(metric, point, candidates) {
                if cluster != *label {
                    *label = cluster;
                    moved += 1;
                }
            }
        }

        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{Euclidean, Manhattan};
    use approx::assert_relative_eq;
    use ndarray::array;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn two_blobs() -> Array2<f64> {
        array![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]]
    }

    fn workspace(labels: Vec<usize>, k: usize, n_features: usize) -> Workspace {
        Workspace {
            labels,
            means: Array2::zeros((k, n_features)),
            counts: vec![0; k],
            centroids: vec![None; k],
            total_distance: 0.0,
        }
    }

    #[test]
    fn test_means_and_medoids() {
        let data = array![[0.0, 0.0], [1.0, 0.0], [3.0, 0.0], [10.0, 10.0]];
        let mut ws = workspace(vec![0, 0, 0, 1], 2, 2);

        let reseeded = ws.update_means_and_centroids(&data.view(), &Euclidean);

        assert_eq!(reseeded, 0);
        assert_eq!(ws.counts, vec![3, 1]);
        assert_relative_eq!(ws.means[[0, 0]], 4.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(ws.means[[1, 1]], 10.0, epsilon = 1e-12);
        // (1, 0) is nearest to the mean (4/3, 0)
        assert_eq!(ws.centroids, vec![Some(1), Some(3)]);
        assert_relative_eq!(
            ws.total_distance,
            4.0 / 3.0 + 1.0 / 3.0 + 5.0 / 3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_medoid_tie_goes_to_first_point() {
        let data = array![[0.0], [2.0]];
        let mut ws = workspace(vec![0, 0], 1, 1);

        ws.update_means_and_centroids(&data.view(), &Euclidean);

        assert_eq!(ws.centroids, vec![Some(0)]);
        assert_relative_eq!(ws.total_distance, 2.0);
    }

    #[test]
    fn test_empty_cluster_keeps_zero_mean_and_is_reseeded() {
        let data = array![[1.0, 1.0], [2.0, 2.0], [9.0, 9.0]];
        let mut ws = workspace(vec![0, 0, 0], 2, 2);

        let reseeded = ws.update_means_and_centroids(&data.view(), &Euclidean);

        assert_eq!(reseeded, 1);
        assert_eq!(ws.counts, vec![3, 0]);
        assert_eq!(ws.means.row(1), array![0.0, 0.0]);
        assert_eq!(ws.centroids[0], Some(1));
        // (9, 9) is the non-centroid point farthest from its mean
        assert_eq!(ws.centroids[1], Some(2));
    }

    #[test]
    fn test_empty_cluster_without_candidates_has_no_centroid() {
        let data = array![[1.0], [2.0]];
        let mut ws = workspace(vec![0, 1], 3, 1);

        ws.update_means_and_centroids(&data.view(), &Euclidean);

        assert_eq!(ws.centroids, vec![Some(0), Some(1), None]);
    }

    #[test]
    fn test_reassign_counts_moves() {
        let data = two_blobs();
        let mut ws = workspace(vec![1, 0, 0, 0], 2, 2);
        ws.centroids = vec![Some(0), Some(3)];

        let moved = ws.reassign(&data.view(), &Euclidean);

        assert_eq!(ws.labels, vec![0, 0, 1, 1]);
        assert_eq!(moved, 3);
        assert_eq!(ws.reassign(&data.view(), &Euclidean), 0);
    }

    #[test]
    fn test_two_blobs_with_seeded_centroids() {
        let data = two_blobs();
        let config = KMeansConfig::new(2)
            .with_max_iters(10)
            .with_initial_centroids(Some(vec![0, 2]));

        let out = medoid_kmeans(&data.view(), &config, &Euclidean).unwrap();

        assert_eq!(out.labels, vec![0, 0, 1, 1]);
        assert_eq!(out.counts, vec![2, 2]);
        assert_eq!(out.centroids, vec![Some(0), Some(2)]);
        assert_eq!(out.means, array![[0.0, 0.5], [10.0, 0.5]]);
        assert_relative_eq!(out.total_distance, 2.0, epsilon = 1e-12);
        assert!(out.converged);
        assert_eq!(out.n_iterations, 1);
    }

    #[test]
    fn test_single_cluster_picks_point_nearest_global_mean() {
        let data = array![[0.0, 0.0], [4.0, 0.0], [1.0, 1.0], [3.0, 3.0]];
        let config = KMeansConfig::new(1).with_max_iters(5).with_seed(11);

        let out = medoid_kmeans(&data.view(), &config, &Euclidean).unwrap();

        assert_eq!(out.labels, vec![0; 4]);
        assert_eq!(out.means, array![[2.0, 1.0]]);
        // (1, 1) is 1 away from the mean (2, 1), every other point sqrt(5)
        assert_eq!(out.centroids, vec![Some(2)]);
        assert!(out.converged);
        assert_eq!(out.n_iterations, 1);
    }

    #[test]
    fn test_k_equal_to_n_gives_singletons() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let data = Array2::random_using((12, 3), Uniform::new(-1.0, 1.0), &mut rng);
        let config = KMeansConfig::new(12).with_max_iters(20).with_seed(9);

        let out = medoid_kmeans(&data.view(), &config, &Euclidean).unwrap();

        assert!(out.converged);
        assert_eq!(out.counts, vec![1; 12]);
        assert_eq!(out.total_distance, 0.0);
        for (cluster, centroid) in out.centroids.iter().enumerate() {
            let idx = centroid.unwrap();
            assert_eq!(out.labels[idx], cluster);
        }
    }

    #[test]
    fn test_more_clusters_than_points() {
        let data = array![[0.0], [5.0]];
        let config = KMeansConfig::new(4).with_max_iters(10);

        let out = medoid_kmeans(&data.view(), &config, &Euclidean).unwrap();

        assert_eq!(out.counts.iter().sum::<usize>(), 2);
        assert_eq!(out.counts.iter().filter(|&&c| c == 0).count(), 2);
        assert!(out.labels.iter().all(|&label| label < 4));
        assert!(out.converged);
        assert_eq!(out.total_distance, 0.0);
    }

    #[test]
    fn test_iteration_cap() {
        let data = Array2::random((300, 4), Uniform::new(-1.0, 1.0));
        let config = KMeansConfig::new(6).with_max_iters(1);

        let out = medoid_kmeans(&data.view(), &config, &Manhattan).unwrap();
        assert_eq!(out.n_iterations, 1);
    }

    #[test]
    fn test_zero_iterations_returns_initial_state() {
        let data = two_blobs();
        let config = KMeansConfig::new(2).with_max_iters(0).with_seed(1);

        let out = medoid_kmeans(&data.view(), &config, &Euclidean).unwrap();

        assert_eq!(out.n_iterations, 0);
        assert!(!out.converged);
        assert_eq!(out.centroids, vec![None, None]);
        assert_eq!(out.total_distance, 0.0);
        assert_eq!(out.means, Array2::<f64>::zeros((2, 2)));
    }

    #[test]
    fn test_validation() {
        let data = two_blobs();
        assert!(matches!(
            medoid_kmeans(&data.view(), &KMeansConfig::new(0), &Euclidean),
            Err(KMeansError::InvalidK(_))
        ));

        let empty = Array2::<f64>::zeros((0, 2));
        assert!(matches!(
            medoid_kmeans(&empty.view(), &KMeansConfig::new(2), &Euclidean),
            Err(KMeansError::InsufficientData(_))
        ));

        let featureless = Array2::<f64>::zeros((3, 0));
        assert!(matches!(
            medoid_kmeans(&featureless.view(), &KMeansConfig::new(2), &Euclidean),
            Err(KMeansError::InvalidDimensions(_))
        ));
    }
}
