//! # medkmeans-rs
//!
//! Medoid-style k-means clustering in Rust, compatible with ndarray.
//!
//! Every cluster is represented by a real data point: each refinement pass
//! computes the arithmetic mean of every cluster, nominates the member
//! nearest to that mean as the cluster's centroid, then moves every point to
//! the cluster of its nearest centroid. The loop stops when a pass moves no
//! point or when the iteration budget runs out.
//!
//! ## Features
//!
//! - **Medoid centroids**: representatives are always observed points, so
//!   results can point back at the caller's items
//! - **Pluggable distance**: Euclidean by default, any [`Metric`] or plain
//!   function `fn(ArrayView1<f64>, ArrayView1<f64>) -> f64` otherwise
//! - **Deterministic**: random initialization uses a locally seeded ChaCha8
//!   generator; equal inputs give bit-identical results
//! - **Typed inputs**: numeric vectors pass straight through, records declare
//!   their features once with a [`FeatureSchema`]
//!
//! ## Example
//!
//! ```rust
//! use medkmeans_rs::{KMeansConfig, MedoidKMeans};
//!
//! let points = vec![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
//!
//! let config = KMeansConfig::new(2)
//!     .with_max_iters(10)
//!     .with_initial_centroids(Some(vec![0, 2]));
//!
//! let result = MedoidKMeans::with_config(config)
//!     .cluster_vectors(&points)
//!     .unwrap();
//!
//! assert_eq!(result.groups()[0], vec![[0.0, 0.0], [0.0, 1.0]]);
//! assert_eq!(result.groups()[1], vec![[10.0, 0.0], [10.0, 1.0]]);
//! assert_eq!(result.centroid_indices(), &[Some(0), Some(2)]);
//! ```
//!
//! ## Matrix input
//!
//! ```rust
//! use medkmeans_rs::{KMeansConfig, Manhattan, MedoidKMeans};
//! use ndarray::Array2;
//! use ndarray_rand::RandomExt;
//! use ndarray_rand::rand_distr::Uniform;
//!
//! let data = Array2::random((500, 16), Uniform::new(-1.0, 1.0));
//!
//! let config = KMeansConfig {
//!     k: 5,
//!     max_iters: 50,
//!     seed: 42,
//!     initial_centroids: None,
//! };
//!
//! let model = MedoidKMeans::with_config(config).with_metric(Manhattan);
//! let result = model.fit(&data.view()).unwrap();
//! assert_eq!(result.labels().len(), 500);
//! ```
//!
//! ## Logging
//!
//! The library emits [`tracing`] events (per-pass progress at `debug`,
//! convergence at `info`). Install any subscriber to see them.

mod algorithm;
mod config;
mod distance;
mod error;
mod init;
mod kmeans;
mod result;
mod vectorize;

pub use config::KMeansConfig;
pub use distance::{Chebyshev, Euclidean, Manhattan, Metric, SquaredEuclidean};
pub use error::KMeansError;
pub use kmeans::{cluster, MedoidKMeans};
pub use result::ClusteringResult;
pub use vectorize::{DenseVectorizer, FeatureSchema, FeatureValue, Record, Vectorizer};
