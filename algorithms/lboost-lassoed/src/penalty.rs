//! Penalty sequence of the lasso stage

use lboost::Float;
use ndarray::Array1;

use crate::hyperparams::LassoedBoostValidParams;

/// Penalties used for the lasso path
///
/// An explicit sequence is taken as is, its length has already been checked against
/// `n_lambdas`. Otherwise `n_lambdas` values are spaced evenly on a log scale from `lambda_max`
/// down to `lambda_max * lambda_min_ratio`, both ends included.
pub fn penalty_sequence<F: Float>(
    params: &LassoedBoostValidParams<F>,
    lambda_max: F,
    n_samples: usize,
    n_features: usize,
) -> Array1<F> {
    if let Some(lambdas) = params.lambdas() {
        return lambdas.clone();
    }

    let n_lambdas = params.n_lambdas();
    if !(lambda_max > F::zero()) {
        log::warn!(
            "largest penalty is {}, the response or every feature is constant; using {} zero penalties",
            lambda_max,
            n_lambdas
        );
        return Array1::zeros(n_lambdas);
    }

    let ratio = params.lambda_min_ratio().unwrap_or_else(|| {
        if n_samples < n_features {
            F::cast(0.01)
        } else {
            F::cast(1e-4)
        }
    });
    if n_lambdas == 1 {
        return Array1::from_elem(1, lambda_max);
    }

    let (start, end) = (lambda_max.ln(), (lambda_max * ratio).ln());
    Array1::linspace(start, end, n_lambdas).mapv(F::exp)
}
