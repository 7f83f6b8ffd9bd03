//! Provide traits for different classes of algorithms
//!

use crate::dataset::{DatasetBase, Records};
use std::convert::From;

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For example
/// in the lasso path solver this would be the sparse coefficient matrix, for the boosting solver
/// the sequence of componentwise updates.
pub trait Fit<R: Records, T, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> Result<Self::Object, E>;
}

/// Predict with model
///
/// Maps new records `R` to predictions `T`. Fallible models use a `Result` as `T`.
pub trait Predict<R, T> {
    fn predict(&self, x: R) -> T;
}
