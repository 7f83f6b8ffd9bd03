#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use lboost::{Float, ParamGuard};
use ndarray::Array1;

use crate::error::LassoPathError;

use super::Result;

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct LassoPathValidParams<F> {
    l1_ratio: F,
    lambdas: Array1<F>,
    standardize: bool,
    with_intercept: bool,
    tolerance: F,
    max_iterations: u32,
}

impl<F: Float> LassoPathValidParams<F> {
    pub fn l1_ratio(&self) -> F {
        self.l1_ratio
    }

    pub fn lambdas(&self) -> &Array1<F> {
        &self.lambdas
    }

    pub fn standardize(&self) -> bool {
        self.standardize
    }

    pub fn with_intercept(&self) -> bool {
        self.with_intercept
    }

    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

/// A hyper-parameter set for an elastic net regularization path
///
/// Minimizes, for every penalty `λ` of the sequence, the weighted objective
/// ```ignore
/// 1 / (2 * sum(w)) * sum_i w_i (y_i - b0 - x_i β)^2
///     + λ * l1_ratio * ||β||_1
///     + 0.5 * λ * (1 - l1_ratio) * ||β||^2_2
/// ```
/// Each fit starts from the solution of the previous penalty, so the sequence should usually be
/// decreasing.
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | [lambdas](Self::lambdas) | empty | Penalty sequence | non-empty, `[0, inf)` |
/// | [l1_ratio](Self::l1_ratio) | `1.0` | Distribution of penalty to L1 and L2 regularizations | `[0.0, 1.0]` |
/// | [standardize](Self::standardize) | `true` | Scale features to unit variance before fitting | `false`, `true` |
/// | [with_intercept](Self::with_intercept) | `true` | Enable intercept | `false`, `true` |
/// | [tolerance](Self::tolerance) | `1e-7` | Convergence threshold relative to the response variance | `(0, inf)` |
/// | [max_iterations](Self::max_iterations) | `100000` | Maximum number of sweeps per penalty | `[1, inf)` |
///
/// # Errors
///
/// Returns [`InvalidL1Ratio`](LassoPathError::InvalidL1Ratio) if the L1 ratio is not in unit
/// range, [`InvalidTolerance`](LassoPathError::InvalidTolerance) if the tolerance is not
/// positive, [`EmptyPenalties`](LassoPathError::EmptyPenalties) and
/// [`InvalidPenalty`](LassoPathError::InvalidPenalty) for a missing or negative penalty sequence.
///
/// # Example
///
/// ```rust
/// use lboost_lasso::{LassoPath, LassoPathError};
/// use lboost::prelude::*;
/// use ndarray::array;
///
/// let ds = Dataset::new(array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]], array![3.0, 2.0, 5.0]);
///
/// let path = LassoPath::params()
///     .lambdas(array![1.0, 0.1, 0.01])
///     .fit(&ds)?;
///
/// assert_eq!(path.coefficients().cols(), 3);
/// # Ok::<(), LassoPathError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LassoPathParams<F>(LassoPathValidParams<F>);

impl<F: Float> Default for LassoPathParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Configure and fit an elastic net path
impl<F: Float> LassoPathParams<F> {
    /// Create default lasso path hyper parameters
    ///
    /// A penalty sequence has to be provided with [`lambdas`](Self::lambdas) before fitting.
    pub fn new() -> LassoPathParams<F> {
        Self(LassoPathValidParams {
            l1_ratio: F::one(),
            lambdas: Array1::zeros(0),
            standardize: true,
            with_intercept: true,
            tolerance: F::cast(1e-7),
            max_iterations: 100_000,
        })
    }

    /// Set the penalty sequence. Coefficients are computed for every entry, in order.
    pub fn lambdas(mut self, lambdas: Array1<F>) -> Self {
        self.0.lambdas = lambdas;
        self
    }

    /// Set l1_ratio parameter of the elastic net. Setting `l1_ratio` to 1.0 is equivalent to a
    /// "Lasso" penalization, setting it to 0.0 is equivalent to "Ridge" penalization.
    pub fn l1_ratio(mut self, l1_ratio: F) -> Self {
        self.0.l1_ratio = l1_ratio;
        self
    }

    /// Scale every feature to unit (weighted) variance before fitting. Coefficients are always
    /// reported on the original scale.
    pub fn standardize(mut self, standardize: bool) -> Self {
        self.0.standardize = standardize;
        self
    }

    /// Configure the path to fit an intercept.
    pub fn with_intercept(mut self, with_intercept: bool) -> Self {
        self.0.with_intercept = with_intercept;
        self
    }

    /// Set the convergence threshold. A sweep ends the optimization of one penalty when the
    /// largest weighted squared coefficient change falls below `tolerance` times the response
    /// variance.
    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.0.tolerance = tolerance;
        self
    }

    /// Set the maximum number of coordinate descent sweeps per penalty.
    pub fn max_iterations(mut self, max_iterations: u32) -> Self {
        self.0.max_iterations = max_iterations;
        self
    }
}

impl<F: Float> ParamGuard for LassoPathParams<F> {
    type Checked = LassoPathValidParams<F>;
    type Error = LassoPathError;

    /// Validate the hyper parameters
    fn check_ref(&self) -> Result<&Self::Checked> {
        if !(F::zero()..=F::one()).contains(&self.0.l1_ratio) {
            return Err(LassoPathError::InvalidL1Ratio(
                self.0.l1_ratio.to_f32().unwrap_or(f32::NAN),
            ));
        }
        if !(self.0.tolerance > F::zero()) {
            return Err(LassoPathError::InvalidTolerance(
                self.0.tolerance.to_f32().unwrap_or(f32::NAN),
            ));
        }
        if self.0.lambdas.is_empty() {
            return Err(LassoPathError::EmptyPenalties);
        }
        if let Some((index, value)) = self
            .0
            .lambdas
            .iter()
            .enumerate()
            .find(|(_, l)| !l.is_finite() || l.is_negative())
        {
            return Err(LassoPathError::InvalidPenalty {
                index,
                value: value.to_f32().unwrap_or(f32::NAN),
            });
        }

        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
