use crate::algorithm::medoid_kmeans;
use crate::config::KMeansConfig;
use crate::distance::{Euclidean, Metric};
use crate::error::KMeansError;
use crate::result::ClusteringResult;
use crate::vectorize::{DenseVectorizer, Record, Vectorizer};
use ndarray::ArrayView2;

/// Medoid-style k-means clustering compatible with ndarray.
///
/// Cluster representatives are always real data points: each pass computes
/// the arithmetic mean of every cluster, nominates the member nearest to it
/// as the cluster's centroid, and moves every point to its nearest centroid.
///
/// # Example
///
/// ```
/// use medkmeans_rs::MedoidKMeans;
///
/// let points = vec![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
///
/// let model = MedoidKMeans::new(1);
/// let result = model.cluster_vectors(&points).unwrap();
///
/// assert_eq!(result.groups()[0].len(), 4);
/// assert!(result.converged());
/// ```
#[derive(Debug, Clone)]
pub struct MedoidKMeans<M = Euclidean> {
    /// Model configuration
    config: KMeansConfig,

    /// Distance used for medoid selection and reassignment
    metric: M,
}

impl MedoidKMeans<Euclidean> {
    /// Create a new model with default configuration and Euclidean distance.
    ///
    /// # Arguments
    ///
    /// * `k` - Number of clusters
    pub fn new(k: usize) -> Self {
        Self::with_config(KMeansConfig::new(k))
    }

    /// Create a new model with a custom configuration and Euclidean distance.
    pub fn with_config(config: KMeansConfig) -> Self {
        Self {
            config,
            metric: Euclidean,
        }
    }
}

impl<M: Metric> MedoidKMeans<M> {
    /// Replace the distance metric.
    ///
    /// ```
    /// use medkmeans_rs::{Manhattan, MedoidKMeans};
    ///
    /// let model = MedoidKMeans::new(3).with_metric(Manhattan);
    /// assert_eq!(model.k(), 3);
    /// ```
    pub fn with_metric<N: Metric>(self, metric: N) -> MedoidKMeans<N> {
        MedoidKMeans {
            config: self.config,
            metric,
        }
    }

    /// Cluster the rows of a matrix.
    ///
    /// # Arguments
    ///
    /// * `data` - Data of shape (n_samples, n_features)
    ///
    /// # Returns
    ///
    /// A result whose items are row indices into `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - k is 0
    /// - `data` has no rows or no columns
    /// - an initial centroid index is out of range
    pub fn fit(&self, data: &ArrayView2<f64>) -> Result<ClusteringResult<usize>, KMeansError> {
        let output = medoid_kmeans(data, &self.config, &self.metric)?;
        let rows: Vec<usize> = (0..data.nrows()).collect();
        Ok(ClusteringResult::assemble(&rows, output))
    }

    /// Vectorize `items` and cluster them.
    ///
    /// Vectorization errors abort the call before any clustering work.
    pub fn cluster<T, V>(
        &self,
        items: &[T],
        vectorizer: &V,
    ) -> Result<ClusteringResult<T>, KMeansError>
    where
        T: Clone,
        V: Vectorizer<T> + ?Sized,
    {
        let data = vectorizer.vectorize(items)?;
        let output = medoid_kmeans(&data.view(), &self.config, &self.metric)?;
        Ok(ClusteringResult::assemble(items, output))
    }

    /// Cluster items that already are numeric vectors
    pub fn cluster_vectors<T>(&self, items: &[T]) -> Result<ClusteringResult<T>, KMeansError>
    where
        T: AsRef<[f64]> + Clone,
    {
        self.cluster(items, &DenseVectorizer)
    }

    /// Cluster records through their declared feature schema
    pub fn cluster_records<T>(&self, items: &[T]) -> Result<ClusteringResult<T>, KMeansError>
    where
        T: Record + Clone,
    {
        self.cluster(items, &T::schema())
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Get the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Get the distance metric.
    pub fn metric(&self) -> &M {
        &self.metric
    }
}

/// Cluster numeric vectors with Euclidean distance, seed 0 and random
/// initialization.
///
/// ```
/// let points = vec![vec![0.0], vec![0.5], vec![9.0]];
/// let result = medkmeans_rs::cluster(&points, 3, 10).unwrap();
/// assert_eq!(result.total_distance(), 0.0);
/// ```
pub fn cluster<T>(
    items: &[T],
    k: usize,
    max_iters: usize,
) -> Result<ClusteringResult<T>, KMeansError>
where
    T: AsRef<[f64]> + Clone,
{
    let config = KMeansConfig::new(k).with_max_iters(max_iters);
    MedoidKMeans::with_config(config).cluster_vectors(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Manhattan;
    use crate::vectorize::FeatureSchema;
    use ndarray::{array, Array2, ArrayView1};
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;

    #[derive(Debug, Clone, PartialEq)]
    struct City {
        name: &'static str,
        lat: f64,
        lon: f64,
    }

    impl Record for City {
        fn schema() -> FeatureSchema<Self> {
            FeatureSchema::new()
                .feature("lat", |c: &City| c.lat)
                .feature("lon", |c: &City| c.lon)
        }
    }

    fn city(name: &'static str, lat: f64, lon: f64) -> City {
        City { name, lat, lon }
    }

    #[test]
    fn test_medoidkmeans_new() {
        let model = MedoidKMeans::new(10);
        assert_eq!(model.k(), 10);
        assert_eq!(model.config().seed, 0);
        assert_eq!(*model.metric(), Euclidean);
    }

    #[test]
    fn test_fit_returns_row_indices() {
        let data = Array2::random((200, 8), Uniform::new(-1.0, 1.0));
        let model = MedoidKMeans::new(5);

        let result = model.fit(&data.view()).unwrap();

        let mut rows: Vec<usize> = result.groups().iter().flatten().copied().collect();
        rows.sort_unstable();
        assert_eq!(rows, (0..200).collect::<Vec<_>>());
        assert_eq!(result.means().dim(), (5, 8));
        assert_eq!(result.labels().len(), 200);
    }

    #[test]
    fn test_cluster_records() {
        let cities = vec![
            city("Lisbon", 38.7, -9.1),
            city("Tokyo", 35.7, 139.7),
            city("Porto", 41.1, -8.6),
            city("Osaka", 34.7, 135.5),
        ];
        let config = KMeansConfig::new(2).with_initial_centroids(Some(vec![0, 1]));

        let result = MedoidKMeans::with_config(config)
            .cluster_records(&cities)
            .unwrap();

        let names: Vec<Vec<&str>> = result
            .groups()
            .iter()
            .map(|group| group.iter().map(|c| c.name).collect())
            .collect();
        assert_eq!(names, vec![vec!["Lisbon", "Porto"], vec!["Tokyo", "Osaka"]]);
    }

    #[test]
    fn test_custom_metric_function() {
        fn l1(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
            Manhattan.distance(a, b)
        }
        let points = vec![[0.0, 0.0], [1.0, 1.0], [20.0, 20.0], [21.0, 21.0]];
        let config = KMeansConfig::new(2).with_initial_centroids(Some(vec![1, 2]));

        let result = MedoidKMeans::with_config(config)
            .with_metric(l1)
            .cluster_vectors(&points)
            .unwrap();

        assert_eq!(result.labels(), &[0, 0, 1, 1]);
        assert_eq!(result.means(), &array![[0.5, 0.5], [20.5, 20.5]]);
        // Each point is 1.0 from its mean under L1
        assert_eq!(result.total_distance(), 4.0);
    }

    #[test]
    fn test_cluster_propagates_vectorizer_errors() {
        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        let result = MedoidKMeans::new(1).cluster_vectors(&ragged);
        assert!(matches!(result, Err(KMeansError::InvalidDimensions(_))));
    }

    #[test]
    fn test_free_function() {
        let points = vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![3.0, 3.0]];
        let result = cluster(&points, 1, 5).unwrap();

        assert_eq!(result.groups()[0].len(), 3);
        assert_eq!(result.centroid_indices(), &[Some(0)]);
    }

    #[test]
    fn test_k_zero_is_an_error() {
        let points = vec![vec![1.0]];
        assert!(matches!(
            cluster(&points, 0, 5),
            Err(KMeansError::InvalidK(_))
        ));
    }
}
