use crate::config::KMeansConfig;
use crate::distance::{nearest, Metric};
use crate::error::KMeansError;
use ndarray::ArrayView2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// First membership assignment handed to the refinement loop
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Initialization {
    pub labels: Vec<usize>,
    pub centroids: Vec<Option<usize>>,
}

/// Build the initial membership assignment.
///
/// Uses the configured initial centroids when exactly `k` are given,
/// otherwise draws labels uniformly from `[0, k)` with a generator seeded
/// from `config.seed`.
pub(crate) fn initialize<M: Metric + ?Sized>(
    data: &ArrayView2<f64>,
    config: &KMeansConfig,
    metric: &M,
) -> Result<Initialization, KMeansError> {
    match config.initial_centroids.as_deref() {
        Some(indices) if indices.len() == config.k => assign_to_seeds(data, indices, metric),
        Some(indices) => {
            tracing::warn!(
                supplied = indices.len(),
                k = config.k,
                "ignoring initial centroids of the wrong length, using random initialization"
            );
            Ok(random_assignment(data.nrows(), config.k, config.seed))
        }
        None => Ok(random_assignment(data.nrows(), config.k, config.seed)),
    }
}

/// Label every point with a cluster drawn uniformly at random
pub(crate) fn random_assignment(n_samples: usize, k: usize, seed: u64) -> Initialization {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let labels = (0..n_samples).map(|_| rng.gen_range(0..k)).collect();

    Initialization {
        labels,
        centroids: vec![None; k],
    }
}

/// Use `indices` as the centroid set and put every point in the cluster of
/// its nearest centroid
fn assign_to_seeds<M: Metric + ?Sized>(
    data: &ArrayView2<f64>,
    indices: &[usize],
    metric: &M,
) -> Result<Initialization, KMeansError> {
    let n_samples = data.nrows();
    if let Some(&index) = indices.iter().find(|&&index| index >= n_samples) {
        return Err(KMeansError::InvalidCentroidIndex { index, n_samples });
    }

    let labels = data
        .outer_iter()
        .map(|point| {
            let seeds = indices.iter().map(|&idx| Some(data.row(idx)));
            nearest(metric, point, seeds).unwrap_or(0)
        })
        .collect();

    Ok(Initialization {
        labels,
        centroids: indices.iter().copied().map(Some).collect(),
    })
}
