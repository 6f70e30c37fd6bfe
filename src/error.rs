use thiserror::Error;

/// Error types for the medkmeans library
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KMeansError {
    /// The number of clusters k is invalid (must be > 0)
    #[error("Invalid k value: {0}")]
    InvalidK(String),

    /// No data points were supplied
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Feature vectors do not share one non-zero dimensionality
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    /// A caller-supplied initial centroid does not index into the dataset
    #[error("Initial centroid index {index} is out of range for {n_samples} samples")]
    InvalidCentroidIndex { index: usize, n_samples: usize },

    /// A record schema designates no features to cluster on
    #[error("Feature schema declares no features")]
    NoFeatures,

    /// A designated feature produced a value that is not a real number
    #[error("Feature '{feature}' of item {item} is not convertible to a real number: {value}")]
    UnconvertibleFeature {
        feature: String,
        item: usize,
        value: String,
    },
}
