//! Local boosting coefficients back in the space of all features

use lboost::Float;
use ndarray::ArrayView1;

use crate::active_set::ActiveSet;
use crate::error::{LassoedError, Result};
use crate::stats::CenteringStats;

/// Sparse column of `(row, value)` pairs in ascending row order; row 0 is the intercept and row
/// `j + 1` the coefficient of feature `j`
pub type SparseColumn<F> = Vec<(usize, F)>;

/// Map the coefficients of a model fitted on `active_set` to a full column
///
/// The intercept is `ȳ - Σ_k x̄_g(k) β_k` and is always stored, zero coefficients are not.
pub fn reconstruct<F: Float>(
    index: usize,
    local: ArrayView1<F>,
    active_set: &ActiveSet,
    stats: &CenteringStats<F>,
) -> Result<SparseColumn<F>> {
    if local.len() != active_set.len() {
        return Err(LassoedError::Mapping {
            index,
            expected: active_set.len(),
            found: local.len(),
        });
    }

    let mut column = Vec::with_capacity(active_set.len() + 1);
    column.push((0, F::zero()));
    let mut intercept = stats.response_mean;
    for (k, &beta) in local.iter().enumerate() {
        let feature = active_set.global(k).ok_or(LassoedError::Mapping {
            index,
            expected: active_set.len(),
            found: local.len(),
        })?;
        intercept -= stats.feature_means[feature] * beta;
        if beta != F::zero() {
            column.push((feature + 1, beta));
        }
    }
    column[0].1 = intercept;

    Ok(column)
}
