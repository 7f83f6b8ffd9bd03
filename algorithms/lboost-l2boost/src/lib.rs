//! # Componentwise L2 boosting
//!
//! `lboost-l2boost` fits a linear model by gradient boosting with the squared error loss and
//! simple linear least squares base learners, one per feature. Every iteration selects the
//! feature whose least squares fit to the current residuals reduces the residual sum of squares
//! the most and moves its coefficient a small step `ν` towards that fit.
//!
//! The whole path of `mstop` iterations is kept, so the coefficients after any number of
//! iterations are available once the model is fitted. Early stopping is supported by the
//! corrected Akaike information criterion, computed with the trace of the boosting hat matrix as
//! degrees of freedom.
//!
//! See also:
//! * [Boosting with the L2 loss: regression and classification](https://doi.org/10.1198/016214503000125)
//! * [Boosting for high-dimensional linear models](https://doi.org/10.1214/009053606000000092)

use lboost::Float;
use ndarray::Array1;

mod algorithm;
mod error;
mod hyperparams;

pub use error::{L2BoostError, Result};
pub use hyperparams::{L2BoostParams, L2BoostValidParams};

/// Fitted componentwise L2 boosting path
///
/// Stores the selected feature and the coefficient increment of every iteration together with
/// the residual sum of squares, the degrees of freedom and the corrected AIC after it.
#[derive(Debug, Clone, PartialEq)]
pub struct L2BoostPath<F> {
    offset: F,
    feature_means: Array1<F>,
    steps: Vec<(usize, F)>,
    rss: Array1<F>,
    degrees_of_freedom: Array1<F>,
    aicc: Array1<F>,
    optimal_stop: usize,
}

impl<F: Float> L2BoostPath<F> {
    /// Create a default parameter set for construction of a boosting path
    pub fn params() -> L2BoostParams<F> {
        L2BoostParams::new()
    }
}
