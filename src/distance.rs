use ndarray::ArrayView1;

/// A distance between two feature vectors of equal length.
///
/// The engine only relies on the result being non-negative. Symmetry and the
/// triangle inequality are not required, although "nearest point" results
/// are only meaningful for metrics that have them.
///
/// Any function `Fn(ArrayView1<f64>, ArrayView1<f64>) -> f64` is a metric:
///
/// ```
/// use medkmeans_rs::{Euclidean, Metric};
/// use ndarray::{array, ArrayView1};
///
/// let a = array![0.0, 0.0];
/// let b = array![3.0, 4.0];
/// assert_eq!(Euclidean.distance(a.view(), b.view()), 5.0);
///
/// fn l1(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
///     (&a - &b).mapv(f64::abs).sum()
/// }
/// assert_eq!(l1.distance(a.view(), b.view()), 7.0);
/// ```
pub trait Metric {
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64;
}

impl<F> Metric for F
where
    F: Fn(ArrayView1<f64>, ArrayView1<f64>) -> f64,
{
    #[inline]
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        self(a, b)
    }
}

/// L2 distance. The default metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl Metric for Euclidean {
    #[inline]
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        squared_l2(a, b).sqrt()
    }
}

/// Squared L2 distance. Ranks points exactly like [`Euclidean`] but sums
/// squared errors when used for the total distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquaredEuclidean;

impl Metric for SquaredEuclidean {
    #[inline]
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        squared_l2(a, b)
    }
}

/// L1 (city block) distance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Metric for Manhattan {
    #[inline]
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
    }
}

/// L-infinity distance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chebyshev;

impl Metric for Chebyshev {
    #[inline]
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
    }
}

#[inline]
fn squared_l2(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Index of the candidate nearest to `point`, scanning in ascending order.
///
/// A later candidate only wins if it is strictly closer, so ties go to the
/// lowest index. `None` candidates are skipped; returns `None` when every
/// candidate is `None`.
pub(crate) fn nearest<'a, M, I>(
    metric: &M,
    point: ArrayView1<f64>,
    candidates: I,
) -> Option<usize>
where
    M: Metric + ?Sized,
    I: IntoIterator<Item = Option<ArrayView1<'a, f64>>>,
{
    let mut best: Option<(usize, f64)> = None;

    for (idx, candidate) in candidates.into_iter().enumerate() {
        let Some(candidate) = candidate else {
            continue;
        };
        let dist = metric.distance(point, candidate);
        if best.map_or(true, |(_, best_dist)| dist < best_dist) {
            best = Some((idx, dist));
        }
    }

    best.map(|(idx, _)| idx)
}
