//! Error types in lboost
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
    #[error("mismatched number of samples: {records} records but {targets} targets")]
    MismatchedSamples { records: usize, targets: usize },
    #[error("not enough samples: {needed} needed, {found} available")]
    NotEnoughSamples { needed: usize, found: usize },
}
