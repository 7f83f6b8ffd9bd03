//! Centering statistics of the design matrix and the response

use lboost::Float;
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};

/// Means used to reconstruct intercepts, and the smallest penalty with an empty lasso model
#[derive(Debug, Clone, PartialEq)]
pub struct CenteringStats<F> {
    pub feature_means: Array1<F>,
    pub response_mean: F,
    pub lambda_max: F,
}

impl<F: Float> CenteringStats<F> {
    /// `lambda_max = max_j |Σ_i (y_i - ȳ) x̃_ij| / n` with `x̃` standardized to zero mean and unit
    /// sample variance. Constant columns standardize to zero.
    pub fn compute(records: ArrayView2<F>, targets: ArrayView1<F>) -> Self {
        let (n_samples, n_features) = records.dim();
        if n_samples == 0 {
            return CenteringStats {
                feature_means: Array1::zeros(n_features),
                response_mean: F::zero(),
                lambda_max: F::zero(),
            };
        }
        let n = F::cast(n_samples);

        let feature_means = records.sum_axis(Axis(0)) / n;
        let response_mean = targets.sum() / n;
        let centered_targets = targets.mapv(|v| v - response_mean);

        let mut lambda_max = F::zero();
        for (column, &mean) in records.axis_iter(Axis(1)).zip(feature_means.iter()) {
            let centered = column.mapv(|v| v - mean);
            let sum_squares = centered.dot(&centered);
            let scale = sample_std(sum_squares, n_samples);
            if scale <= F::epsilon() * (F::one() + mean.abs()) {
                continue;
            }

            let score = (centered.dot(&centered_targets) / scale).abs() / n;
            if score > lambda_max {
                lambda_max = score;
            }
        }

        CenteringStats {
            feature_means,
            response_mean,
            lambda_max,
        }
    }
}

fn sample_std<F: Float>(sum_squares: F, n_samples: usize) -> F {
    if n_samples < 2 {
        return F::zero();
    }
    (sum_squares / F::cast(n_samples - 1)).sqrt()
}
