//! # Elastic net regularization paths
//!
//! `lboost-lasso` fits a whole sequence of elastic net models, one per penalty value, with
//! cyclic coordinate descent. The solution of each penalty is the starting point of the next, so
//! a decreasing sequence is traversed with only a few sweeps per step.
//!
//! The coefficients of all penalties are returned as one sparse `n_features × n_lambdas`
//! matrix; column `i` holds the model of penalty `i` on the scale of the original features. The
//! intercepts are kept separately.
//!
//! See also:
//! * [Regularization Paths for Generalized Linear Models via Coordinate
//! Descent](http://www.jstatsoft.org/v33/i01/paper)

use lboost::Float;
use ndarray::Array1;
use sprs::CsMat;

mod algorithm;
mod error;
mod hyperparams;

pub use error::{LassoPathError, Result};
pub use hyperparams::{LassoPathParams, LassoPathValidParams};

/// Fitted elastic net regularization path
///
/// This struct contains the sparse coefficient matrix (features × penalties), the intercept and
/// the number of coordinate descent sweeps of every penalty.
#[derive(Debug, Clone)]
pub struct LassoPath<F> {
    coefficients: CsMat<F>,
    intercepts: Array1<F>,
    lambdas: Array1<F>,
    n_sweeps: Vec<u32>,
}

impl<F: Float> LassoPath<F> {
    /// Create a default parameter set for construction of a lasso path
    pub fn params() -> LassoPathParams<F> {
        LassoPathParams::new()
    }

    /// Create a ridge only path
    pub fn ridge() -> LassoPathParams<F> {
        LassoPathParams::new().l1_ratio(F::zero())
    }
}
