#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use lboost::{Float, ParamGuard};

use crate::error::{L2BoostError, Result};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct L2BoostValidParams<F> {
    max_iterations: usize,
    learning_rate: F,
    center: bool,
}

impl<F: Float> L2BoostValidParams<F> {
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn learning_rate(&self) -> F {
        self.learning_rate
    }

    pub fn center(&self) -> bool {
        self.center
    }
}

/// A hyper-parameter set for componentwise L2 boosting
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | [max_iterations](Self::max_iterations) | `100` | Number of boosting iterations (`mstop`) | `[1, inf)` |
/// | [learning_rate](Self::learning_rate) | `0.1` | Shrinkage `nu` of every update | `(0, 1]` |
/// | [center](Self::center) | `true` | Center the features before fitting | `false`, `true` |
///
/// # Example
///
/// ```rust
/// use lboost_l2boost::{L2BoostError, L2BoostPath};
/// use lboost::prelude::*;
/// use ndarray::array;
///
/// let ds = Dataset::new(array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]], array![3.0, 2.0, 5.0, 0.0]);
///
/// let path = L2BoostPath::params()
///     .max_iterations(50)
///     .fit(&ds)?;
///
/// assert_eq!(path.n_iterations(), 50);
/// let coefficients = path.coefficients_at(path.optimal_stop())?;
/// # Ok::<(), L2BoostError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct L2BoostParams<F>(L2BoostValidParams<F>);

impl<F: Float> Default for L2BoostParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> L2BoostParams<F> {
    pub fn new() -> L2BoostParams<F> {
        Self(L2BoostValidParams {
            max_iterations: 100,
            learning_rate: F::cast(0.1),
            center: true,
        })
    }

    /// Set the number of boosting iterations.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.0.max_iterations = max_iterations;
        self
    }

    /// Set the shrinkage applied to the least squares update of every iteration.
    pub fn learning_rate(mut self, learning_rate: F) -> Self {
        self.0.learning_rate = learning_rate;
        self
    }

    /// Center the features before fitting. The intercept then absorbs the feature means, see
    /// [`L2BoostPath::intercept_at`](crate::L2BoostPath::intercept_at).
    pub fn center(mut self, center: bool) -> Self {
        self.0.center = center;
        self
    }
}

impl<F: Float> ParamGuard for L2BoostParams<F> {
    type Checked = L2BoostValidParams<F>;
    type Error = L2BoostError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let nu = self.0.learning_rate;
        if !(nu > F::zero() && nu <= F::one()) {
            Err(L2BoostError::InvalidLearningRate(
                nu.to_f32().unwrap_or(f32::NAN),
            ))
        } else if self.0.max_iterations == 0 {
            Err(L2BoostError::ZeroIterations)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
