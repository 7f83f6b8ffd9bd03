//! # Lassoed boosting
//!
//! `lboost-lassoed` is a two-stage sparse linear regression. A lasso path first proposes one
//! active set of predictors per penalty. Componentwise L2 boosting then refits the response on
//! every active set, and `n_steps` boosting iterations around the corrected AIC stopping point
//! are kept as candidate solutions.
//!
//! The result is a single sparse coefficient matrix with one column per (penalty, sampled
//! iteration) pair, penalty-major. Row 0 holds the intercept, row `j + 1` the coefficient of
//! feature `j`. The grid of candidates is meant for model selection, for example with
//! [`LassoedBoostValidParams::cross_validate`].
//!
//! Penalties whose active set has the same size as the previous non-empty one reuse its boosting
//! solutions instead of fitting again. Both stages are pluggable through the traits in
//! [`solver`].
//!
//! ## Example
//!
//! ```rust
//! use lboost::prelude::*;
//! use lboost_lassoed::{LassoedBoost, LassoedError};
//! use ndarray::array;
//!
//! let x = array![
//!     [0.1, 1.0, -0.3],
//!     [0.9, -0.5, 0.2],
//!     [-1.2, 0.3, 0.8],
//!     [0.4, -1.1, -0.6],
//!     [1.5, 0.7, 0.1],
//!     [-0.7, -0.2, 1.3],
//!     [0.2, 1.4, -1.0],
//!     [-1.0, -0.8, 0.5],
//! ];
//! let y = x.column(0).mapv(|v| 2.0 * v) + 1.0;
//! let dataset = Dataset::new(x, y);
//!
//! let model = LassoedBoost::params()
//!     .n_lambdas(10)
//!     .n_steps(5)
//!     .max_iterations(200)
//!     .fit(&dataset)?;
//!
//! let predictions = model.predict(dataset.records())?;
//! assert_eq!(predictions.dim(), (8, 50));
//! # Ok::<(), LassoedError>(())
//! ```

use lboost::Float;
use ndarray::{Array1, Array2};
use sprs::CsMat;

pub mod active_set;
mod algorithm;
mod assemble;
mod cv;
mod error;
mod hyperparams;
mod penalty;
mod plan;
mod reconstruct;
mod sampling;
pub mod solver;
mod stats;

pub use active_set::ActiveSet;
pub use cv::CrossValidation;
pub use error::{LassoedError, Result};
pub use hyperparams::{Family, LassoedBoostParams, LassoedBoostValidParams};
pub use solver::{
    BoostingPath, BoostingPathSolver, ComponentwiseBoosting, ElasticNetSolver, LassoConfig,
    LassoPathSolver,
};

/// Fitted lassoed boosting model
///
/// Holds the `(n_features + 1) × (n_lambdas · n_steps)` coefficient matrix together with the
/// diagnostics of every penalty and a copy of the training data.
#[derive(Debug, Clone)]
pub struct LassoedBoost<F> {
    coefficients: CsMat<F>,
    records: Array2<F>,
    targets: Array1<F>,
    lambdas: Array1<F>,
    stopping_numbers: Vec<usize>,
    sampled_steps: Vec<Vec<usize>>,
    active_sets: Vec<ActiveSet>,
    row_names: Option<Vec<String>>,
    n_steps: usize,
    with_intercept: bool,
}

impl<F: Float> LassoedBoost<F> {
    /// Create a default parameter set for construction of a lassoed boosting model
    pub fn params() -> LassoedBoostParams<F> {
        LassoedBoostParams::new()
    }
}
