//! Conversion of caller items into the dense matrix the engine clusters.
//!
//! Plain numeric vectors pass through [`DenseVectorizer`]. Record types
//! declare, once per type, an ordered list of named accessors in a
//! [`FeatureSchema`], usually through the [`Record`] trait:
//!
//! ```
//! use medkmeans_rs::{FeatureSchema, Record, Vectorizer};
//!
//! struct Reading {
//!     sensor: String,
//!     temperature: f32,
//!     humidity: Option<u8>,
//! }
//!
//! impl Record for Reading {
//!     fn schema() -> FeatureSchema<Self> {
//!         FeatureSchema::new()
//!             .feature("temperature", |r: &Reading| r.temperature)
//!             .feature("humidity", |r: &Reading| r.humidity)
//!     }
//! }
//!
//! let readings = vec![
//!     Reading { sensor: "a".into(), temperature: 21.5, humidity: Some(40) },
//!     Reading { sensor: "b".into(), temperature: 19.0, humidity: Some(55) },
//! ];
//! let data = Reading::schema().vectorize(&readings).unwrap();
//! assert_eq!(data.shape(), &[2, 2]);
//! assert_eq!(data[[1, 1]], 55.0);
//! ```

use crate::error::KMeansError;
use ndarray::{Array2, ArrayView1};
use std::fmt;

/// Turns a slice of items into an `(n_items, n_features)` matrix, one row
/// per item in the same order.
pub trait Vectorizer<T> {
    fn vectorize(&self, items: &[T]) -> Result<Array2<f64>, KMeansError>;
}

/// Passes numeric vectors through unchanged. Every item must have the
/// same length.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseVectorizer;

impl<T: AsRef<[f64]>> Vectorizer<T> for DenseVectorizer {
    fn vectorize(&self, items: &[T]) -> Result<Array2<f64>, KMeansError> {
        let n_features = items.first().map_or(0, |item| item.as_ref().len());
        let mut data = Array2::zeros((items.len(), n_features));

        for (idx, (item, mut row)) in items.iter().zip(data.outer_iter_mut()).enumerate() {
            let values = item.as_ref();
            if values.len() != n_features {
                return Err(KMeansError::InvalidDimensions(format!(
                    "Item {} has {} features, expected {}",
                    idx,
                    values.len(),
                    n_features
                )));
            }
            row.assign(&ArrayView1::from(values));
        }

        Ok(data)
    }
}

/// A single feature reading, before conversion to `f64`
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Real(f64),
    Text(String),
    Missing,
}

impl FeatureValue {
    /// The value as a finite real number. Text is parsed; `Missing`,
    /// unparseable text, NaN and infinities have no numeric value.
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            FeatureValue::Real(v) => Some(*v),
            FeatureValue::Text(s) => s.trim().parse::<f64>().ok(),
            FeatureValue::Missing => None,
        };
        value.filter(|v| v.is_finite())
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Real(v) => write!(f, "{v}"),
            FeatureValue::Text(s) => write!(f, "{s:?}"),
            FeatureValue::Missing => write!(f, "<missing>"),
        }
    }
}

macro_rules! real_feature_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FeatureValue {
                fn from(value: $ty) -> Self {
                    FeatureValue::Real(value as f64)
                }
            }
        )*
    };
}

real_feature_from!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Real(if value { 1.0 } else { 0.0 })
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Text(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::Text(value)
    }
}

impl<V: Into<FeatureValue>> From<Option<V>> for FeatureValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(FeatureValue::Missing, Into::into)
    }
}

type Accessor<T> = Box<dyn Fn(&T) -> FeatureValue + Send + Sync>;

/// Ordered, named accessors that read the clustering features of `T`
pub struct FeatureSchema<T> {
    features: Vec<(String, Accessor<T>)>,
}

impl<T> FeatureSchema<T> {
    pub fn new() -> Self {
        Self {
            features: Vec::new(),
        }
    }

    /// Append a feature. Features become matrix columns in the order they
    /// are added.
    pub fn feature<F, V>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        T: 'static,
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<FeatureValue>,
    {
        let accessor: Accessor<T> =
            Box::new(move |item: &T| -> FeatureValue { accessor(item).into() });
        self.features.push((name.into(), accessor));
        self
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|(name, _)| name.as_str())
    }
}

impl<T> Default for FeatureSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FeatureSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureSchema")
            .field("features", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> Vectorizer<T> for FeatureSchema<T> {
    fn vectorize(&self, items: &[T]) -> Result<Array2<f64>, KMeansError> {
        if self.features.is_empty() {
            return Err(KMeansError::NoFeatures);
        }

        let mut data = Array2::zeros((items.len(), self.features.len()));

        for (idx, (item, mut row)) in items.iter().zip(data.outer_iter_mut()).enumerate() {
            for ((name, accessor), slot) in self.features.iter().zip(row.iter_mut()) {
                let value = accessor(item);
                *slot = value
                    .to_f64()
                    .ok_or_else(|| KMeansError::UnconvertibleFeature {
                        feature: name.clone(),
                        item: idx,
                        value: value.to_string(),
                    })?;
            }
        }

        Ok(data)
    }
}

/// A record type with a statically declared feature schema
pub trait Record: Sized {
    fn schema() -> FeatureSchema<Self>;
}
