use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use lboost::{Float, ParamGuard};
use ndarray::Array1;

use crate::error::{LassoedError, Result};

/// Response distribution of the model
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    /// Squared error loss
    Gaussian,
}

impl Default for Family {
    fn default() -> Self {
        Family::Gaussian
    }
}

impl FromStr for Family {
    type Err = LassoedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gaussian" => Ok(Family::Gaussian),
            _ => Err(LassoedError::UnsupportedFamily(s.to_string())),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Gaussian => write!(f, "gaussian"),
        }
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct LassoedBoostValidParams<F> {
    pub(crate) family: Family,
    pub(crate) l1_ratio: F,
    pub(crate) n_lambdas: usize,
    pub(crate) lambda_min_ratio: Option<F>,
    pub(crate) lambdas: Option<Array1<F>>,
    pub(crate) standardize: bool,
    pub(crate) with_intercept: bool,
    pub(crate) tolerance: F,
    pub(crate) learning_rate: F,
    pub(crate) max_iterations: usize,
    pub(crate) n_steps: usize,
    pub(crate) lower_factor: F,
    pub(crate) upper_factor: F,
    pub(crate) parallel: bool,
}

impl<F: Float> LassoedBoostValidParams<F> {
    pub fn family(&self) -> Family {
        self.family
    }

    pub fn l1_ratio(&self) -> F {
        self.l1_ratio
    }

    pub fn n_lambdas(&self) -> usize {
        self.n_lambdas
    }

    pub fn lambda_min_ratio(&self) -> Option<F> {
        self.lambda_min_ratio
    }

    pub fn lambdas(&self) -> Option<&Array1<F>> {
        self.lambdas.as_ref()
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

    pub fn learning_rate(&self) -> F {
        self.learning_rate
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    pub fn lower_factor(&self) -> F {
        self.lower_factor
    }

    pub fn upper_factor(&self) -> F {
        self.upper_factor
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }
}

/// A hyper-parameter set for lassoed boosting
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | [family](Self::family) | `Gaussian` | Response distribution | `Gaussian` |
/// | [l1_ratio](Self::l1_ratio) | `1.0` | Elastic net mixing of the lasso stage | `[0.0, 1.0]` |
/// | [n_lambdas](Self::n_lambdas) | `100` | Number of penalties | `[1, inf)` |
/// | [lambda_min_ratio](Self::lambda_min_ratio) | `0.01` if `n < p`, else `1e-4` | Smallest generated penalty relative to the largest | `(0, 1]` |
/// | [lambdas](Self::lambdas) | generated | Explicit penalty sequence of length `n_lambdas` | `[0, inf)` |
/// | [standardize](Self::standardize) | `true` | Standardize features in the lasso stage | `false`, `true` |
/// | [with_intercept](Self::with_intercept) | `true` | Report and predict with the intercept | `false`, `true` |
/// | [tolerance](Self::tolerance) | `1e-7` | Convergence threshold of the lasso stage | `(0, inf)` |
/// | [learning_rate](Self::learning_rate) | `0.1` | Boosting shrinkage `nu` | `(0, 1)` |
/// | [max_iterations](Self::max_iterations) | `1000` | Boosting iterations `bstop` | `[1, inf)` |
/// | [n_steps](Self::n_steps) | `50` | Sampled boosting iterations per penalty `nb` | `[1, inf)` |
/// | [lower_factor](Self::lower_factor) | `0.0` | Start of the sampling window relative to the stopping iteration | `[0, upper_factor]` |
/// | [upper_factor](Self::upper_factor) | `1.0` | End of the sampling window relative to the stopping iteration | `[lower_factor, inf)` |
/// | [parallel](Self::parallel) | `false` | Run the boosting fits on the rayon thread pool | `false`, `true` |
///
/// # Example
///
/// ```rust
/// use lboost_lassoed::{LassoedBoost, LassoedError};
/// use lboost::prelude::*;
/// use ndarray::array;
///
/// let ds = Dataset::new(
///     array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0], [2.0, 1.0], [1.0, 2.0]],
///     array![3.0, 2.0, 5.0, 0.0, 8.0, 7.0],
/// );
///
/// let model = LassoedBoost::params()
///     .n_lambdas(5)
///     .n_steps(3)
///     .max_iterations(100)
///     .fit(&ds)?;
///
/// assert_eq!(model.coefficients().shape(), (3, 15));
/// # Ok::<(), LassoedError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LassoedBoostParams<F>(pub(crate) LassoedBoostValidParams<F>);

impl<F: Float> Default for LassoedBoostParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> LassoedBoostParams<F> {
    pub fn new() -> LassoedBoostParams<F> {
        Self(LassoedBoostValidParams {
            family: Family::Gaussian,
            l1_ratio: F::one(),
            n_lambdas: 100,
            lambda_min_ratio: None,
            lambdas: None,
            standardize: true,
            with_intercept: true,
            tolerance: F::cast(1e-7),
            learning_rate: F::cast(0.1),
            max_iterations: 1000,
            n_steps: 50,
            lower_factor: F::zero(),
            upper_factor: F::one(),
            parallel: false,
        })
    }

    /// Set the response distribution. Parse it from a string with `"gaussian".parse()`.
    pub fn family(mut self, family: Family) -> Self {
        self.0.family = family;
        self
    }

    /// Set the elastic net mixing of the lasso stage. `1.0` is a pure lasso penalty.
    pub fn l1_ratio(mut self, l1_ratio: F) -> Self {
        self.0.l1_ratio = l1_ratio;
        self
    }

    /// Set the number of penalties of the lasso path.
    pub fn n_lambdas(mut self, n_lambdas: usize) -> Self {
        self.0.n_lambdas = n_lambdas;
        self
    }

    /// Set the ratio between the smallest and the largest generated penalty.
    pub fn lambda_min_ratio(mut self, ratio: F) -> Self {
        self.0.lambda_min_ratio = Some(ratio);
        self
    }

    /// Use an explicit penalty sequence instead of a generated one. Its length has to equal
    /// [`n_lambdas`](Self::n_lambdas).
    pub fn lambdas(mut self, lambdas: Array1<F>) -> Self {
        self.0.lambdas = Some(lambdas);
        self
    }

    pub fn standardize(mut self, standardize: bool) -> Self {
        self.0.standardize = standardize;
        self
    }

    /// Keep the intercept row in the coefficients and in predictions.
    pub fn with_intercept(mut self, with_intercept: bool) -> Self {
        self.0.with_intercept = with_intercept;
        self
    }

    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.0.tolerance = tolerance;
        self
    }

    pub fn learning_rate(mut self, learning_rate: F) -> Self {
        self.0.learning_rate = learning_rate;
        self
    }

    /// Set the number of boosting iterations per active set.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.0.max_iterations = max_iterations;
        self
    }

    /// Set the number of boosting iterations sampled per penalty.
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.0.n_steps = n_steps;
        self
    }

    pub fn lower_factor(mut self, lower_factor: F) -> Self {
        self.0.lower_factor = lower_factor;
        self
    }

    pub fn upper_factor(mut self, upper_factor: F) -> Self {
        self.0.upper_factor = upper_factor;
        self
    }

    /// Fit the boosting stages of distinct active sets in parallel. The result is identical to a
    /// sequential fit.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.0.parallel = parallel;
        self
    }
}

fn as_f32<F: Float>(value: F) -> f32 {
    value.to_f32().unwrap_or(f32::NAN)
}

impl<F: Float> ParamGuard for LassoedBoostParams<F> {
    type Checked = LassoedBoostValidParams<F>;
    type Error = LassoedError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let p = &self.0;
        if !(F::zero()..=F::one()).contains(&p.l1_ratio) {
            return Err(LassoedError::InvalidL1Ratio(as_f32(p.l1_ratio)));
        }
        if !(p.learning_rate > F::zero() && p.learning_rate < F::one()) {
            return Err(LassoedError::InvalidLearningRate(as_f32(p.learning_rate)));
        }
        if !(p.tolerance > F::zero()) {
            return Err(LassoedError::InvalidTolerance(as_f32(p.tolerance)));
        }
        if let Some(ratio) = p.lambda_min_ratio {
            if !(ratio > F::zero() && ratio <= F::one()) {
                return Err(LassoedError::InvalidLambdaMinRatio(as_f32(ratio)));
            }
        }
        if p.n_lambdas == 0 {
            return Err(LassoedError::ZeroCount("n_lambdas"));
        }
        if p.n_steps == 0 {
            return Err(LassoedError::ZeroCount("n_steps"));
        }
        if p.max_iterations == 0 {
            return Err(LassoedError::ZeroCount("max_iterations"));
        }
        if !(p.lower_factor >= F::zero() && p.upper_factor >= p.lower_factor)
            || !p.upper_factor.is_finite()
        {
            return Err(LassoedError::InvalidSamplingFactors {
                lower: as_f32(p.lower_factor),
                upper: as_f32(p.upper_factor),
            });
        }
        if let Some(lambdas) = &p.lambdas {
            if lambdas.len() != p.n_lambdas {
                return Err(LassoedError::PenaltyLength {
                    expected: p.n_lambdas,
                    found: lambdas.len(),
                });
            }
            if let Some((index, value)) = lambdas
                .iter()
                .enumerate()
                .find(|(_, l)| !l.is_finite() || l.is_negative())
            {
                return Err(LassoedError::InvalidPenalty {
                    index,
                    value: as_f32(*value),
                });
            }
        }

        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
