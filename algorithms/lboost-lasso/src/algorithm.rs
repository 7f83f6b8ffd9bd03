use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix2};
use sprs::CsMat;

use lboost::dataset::{AsSingleTargets, DatasetBase};
use lboost::traits::{Fit, Predict};
use lboost::Float;

use crate::error::{LassoPathError, Result};
use crate::hyperparams::LassoPathValidParams;
use crate::LassoPath;

impl<F, D, T> Fit<ArrayBase<D, Ix2>, T, LassoPathError> for LassoPathValidParams<F>
where
    F: Float,
    D: Data<Elem = F>,
    T: AsSingleTargets<Elem = F>,
{
    type Object = LassoPath<F>;

    /// Fit an elastic net path given a feature matrix `x` and a target variable `y`.
    ///
    /// The feature matrix `x` must have shape `(n_samples, n_features)`, the target variable `y`
    /// shape `(n_samples)`. Sample weights are taken from the dataset, every sample has unit
    /// weight when the dataset carries none.
    ///
    /// Returns a `LassoPath` object which contains one model per penalty and can be used to
    /// `predict` values of the target variable for new feature values.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        dataset.check_samples()?;
        let x = dataset.records().view();
        let y = dataset.as_single_targets();
        let (n_samples, n_features) = x.dim();
        if n_samples == 0 {
            return Err(lboost::Error::NotEnoughSamples {
                needed: 1,
                found: 0,
            }
            .into());
        }

        let weights = normalized_weights(dataset.weights(), n_samples)?;
        let problem = Centered::new(
            x,
            y,
            weights.view(),
            self.with_intercept(),
            self.standardize(),
        );

        let weighted_x = &problem.x * &weights.view().insert_axis(Axis(1));
        let col_norms = weights.dot(&problem.x.mapv(|v| v * v));
        let threshold = self.tolerance() * weights.dot(&problem.y.mapv(|v| v * v));

        let n_lambdas = self.lambdas().len();
        let mut beta = Array1::<F>::zeros(n_features);
        let mut residuals = problem.y.clone();

        let mut indptr = Vec::with_capacity(n_lambdas + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();
        let mut intercepts = Array1::zeros(n_lambdas);
        let mut n_sweeps = Vec::with_capacity(n_lambdas);
        indptr.push(0);

        for (i, &lambda) in self.lambdas().iter().enumerate() {
            let (sweeps, converged) = coordinate_descent(
                problem.x.view(),
                weighted_x.view(),
                col_norms.view(),
                &mut beta,
                &mut residuals,
                lambda * self.l1_ratio(),
                lambda * (F::one() - self.l1_ratio()),
                threshold,
                self.max_iterations(),
            );
            if !converged {
                log::warn!(
                    "penalty {} (lambda = {}) did not converge within {} sweeps",
                    i,
                    lambda,
                    sweeps
                );
            }

            let mut intercept = problem.y_offset;
            for (j, (&b, &scale)) in beta.iter().zip(problem.x_scale.iter()).enumerate() {
                if b != F::zero() {
                    let coef = b / scale;
                    indices.push(j);
                    data.push(coef);
                    intercept -= problem.x_offset[j] * coef;
                }
            }
            indptr.push(indices.len());
            intercepts[i] = intercept;
            n_sweeps.push(sweeps);

            log::debug!(
                "penalty {} (lambda = {}): {} active features after {} sweeps",
                i,
                lambda,
                indptr[i + 1] - indptr[i],
                sweeps
            );
        }

        Ok(LassoPath {
            coefficients: CsMat::new_csc((n_features, n_lambdas), indptr, indices, data),
            intercepts,
            lambdas: self.lambdas().clone(),
            n_sweeps,
        })
    }
}

impl<F: Float, D: Data<Elem = F>> Predict<&ArrayBase<D, Ix2>, Array2<F>> for LassoPath<F> {
    /// Given an input matrix `X`, with shape `(n_samples, n_features)`, `predict` returns one
    /// column of fitted values per penalty of the path.
    fn predict(&self, x: &ArrayBase<D, Ix2>) -> Array2<F> {
        assert_eq!(
            x.ncols(),
            self.n_features(),
            "The number of features must match the fitted path."
        );

        let mut predictions = Array2::zeros((x.nrows(), self.n_lambdas()));
        for (k, column) in self.coefficients.outer_iterator().enumerate() {
            let mut target = predictions.column_mut(k);
            target.fill(self.intercepts[k]);
            for (j, &value) in column.iter() {
                target.scaled_add(value, &x.column(j));
            }
        }

        predictions
    }
}

/// View the fitted path
impl<F: Float> LassoPath<F> {
    /// Sparse coefficient matrix with shape `(n_features, n_lambdas)`, no intercept row
    pub fn coefficients(&self) -> &CsMat<F> {
        &self.coefficients
    }

    /// Intercept of every penalty, 0. if no intercept was fitted
    pub fn intercepts(&self) -> &Array1<F> {
        &self.intercepts
    }

    /// The penalty sequence of the path
    pub fn lambdas(&self) -> &Array1<F> {
        &self.lambdas
    }

    /// Number of coordinate descent sweeps spent on every penalty
    pub fn n_sweeps(&self) -> &[u32] {
        &self.n_sweeps
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.rows()
    }

    pub fn n_lambdas(&self) -> usize {
        self.coefficients.cols()
    }
}

/// Weights scaled to sum one, uniform when the dataset carries none
fn normalized_weights<F: Float>(weights: Option<&[f32]>, n_samples: usize) -> Result<Array1<F>> {
    let weights = match weights {
        None => return Ok(Array1::from_elem(n_samples, F::cast(n_samples).recip())),
        Some(weights) => weights,
    };
    if weights.len() != n_samples {
        return Err(LassoPathError::WeightsLength {
            expected: n_samples,
            found: weights.len(),
        });
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(LassoPathError::InvalidWeights);
    }
    let total: f64 = weights.iter().map(|&w| f64::from(w)).sum();
    if total <= 0.0 {
        return Err(LassoPathError::InvalidWeights);
    }

    Ok(weights
        .iter()
        .map(|&w| F::cast(f64::from(w) / total))
        .collect())
}

/// Design and response after weighted centering and scaling
struct Centered<F> {
    x: Array2<F>,
    y: Array1<F>,
    x_offset: Array1<F>,
    x_scale: Array1<F>,
    y_offset: F,
}

impl<F: Float> Centered<F> {
    fn new(
        x: ArrayView2<F>,
        y: ArrayView1<F>,
        weights: ArrayView1<F>,
        with_intercept: bool,
        standardize: bool,
    ) -> Centered<F> {
        let (x_offset, y_offset) = if with_intercept {
            (weights.dot(&x), weights.dot(&y))
        } else {
            (Array1::zeros(x.ncols()), F::zero())
        };

        let second_moment = weights.dot(&x.mapv(|v| v * v));
        let mut x = &x - &x_offset.view().insert_axis(Axis(0));
        let variance = weights.dot(&x.mapv(|v| v * v));

        let mut x_scale = Array1::ones(x.ncols());
        for (j, mut column) in x.axis_iter_mut(Axis(1)).enumerate() {
            // constant columns would only amplify rounding noise
            if variance[j] <= F::epsilon() * second_moment[j] {
                column.fill(F::zero());
            } else if standardize {
                x_scale[j] = variance[j].sqrt();
                column.mapv_inplace(|v| v / x_scale[j]);
            }
        }

        Centered {
            x,
            y: y.mapv(|v| v - y_offset),
            x_offset,
            x_scale,
            y_offset,
        }
    }
}

fn soft_threshold<F: Float>(z: F, threshold: F) -> F {
    z.signum() * F::max(z.abs() - threshold, F::zero())
}

/// Cyclic coordinate descent for a single penalty, warm started from `beta`
///
/// `residuals` must equal `y - x * beta` on entry and is kept up to date. Returns the number of
/// sweeps and whether the largest weighted squared change fell below `threshold`.
#[allow(clippy::too_many_arguments)]
fn coordinate_descent<F: Float>(
    x: ArrayView2<F>,
    weighted_x: ArrayView2<F>,
    col_norms: ArrayView1<F>,
    beta: &mut Array1<F>,
    residuals: &mut Array1<F>,
    l1_penalty: F,
    l2_penalty: F,
    threshold: F,
    max_sweeps: u32,
) -> (u32, bool) {
    let mut n_sweeps = 0u32;
    loop {
        let mut max_change = F::zero();
        for j in 0..x.ncols() {
            let norm = col_norms[j];
            if norm == F::zero() {
                continue;
            }
            let old = beta[j];
            let z = weighted_x.column(j).dot(&residuals.view()) + norm * old;
            let new = soft_threshold(z, l1_penalty) / (norm + l2_penalty);
            let delta = new - old;
            if delta != F::zero() {
                residuals.scaled_add(-delta, &x.column(j));
                beta[j] = new;
                max_change = F::max(max_change, norm * delta * delta);
            }
        }
        n_sweeps += 1;

        if max_change <= threshold {
            return (n_sweeps, true);
        }
        if n_sweeps >= max_sweeps {
            return (n_sweeps, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{coordinate_descent, soft_threshold, LassoPath};
    use crate::LassoPathError;
    use approx::assert_abs_diff_eq;
    use lboost::{
        traits::{Fit, Predict},
        Dataset,
    };
    use lboost_datasets::generate;
    use ndarray::{array, Array1, Array2};
    use rand::{rngs::SmallRng, SeedableRng};

    fn dense_column(path: &LassoPath<f64>, i: usize) -> Array1<f64> {
        path.coefficients().to_dense().column(i).to_owned()
    }

    #[test]
    fn soft_threshold_works() {
        assert_abs_diff_eq!(soft_threshold(3.0, 1.0), 2.0);
        assert_abs_diff_eq!(soft_threshold(-3.0, 1.0), -2.0);
        assert_abs_diff_eq!(soft_threshold(0.5, 1.0), 0.0);
    }

    #[test]
    fn coordinate_descent_keeps_residuals_in_sync() {
        let x = array![[1.0, 0.5], [0.0, 1.0], [-1.0, 0.3]];
        let y = array![1.0, -1.0, 0.5];
        let weights = Array1::from_elem(3, 1.0 / 3.0);
        let weighted_x = &x * &weights.view().insert_axis(ndarray::Axis(1));
        let norms = weights.dot(&x.mapv(|v| v * v));
        let mut beta = Array1::zeros(2);
        let mut residuals = y.clone();

        let (_, converged) = coordinate_descent(
            x.view(),
            weighted_x.view(),
            norms.view(),
            &mut beta,
            &mut residuals,
            0.01,
            0.0,
            1e-14,
            10_000,
        );

        assert!(converged);
        assert_abs_diff_eq!(residuals, &y - &x.dot(&beta), epsilon = 1e-12);
    }

    #[test]
    fn lasso_zero_works() {
        let dataset = Dataset::new(array![[0.], [0.], [0.]], array![0., 0., 0.]);

        let path = LassoPath::params()
            .lambdas(array![0.1])
            .fit(&dataset)
            .unwrap();

        assert_abs_diff_eq!(path.intercepts()[0], 0.);
        assert_eq!(path.coefficients().nnz(), 0);
    }

    #[test]
    fn lasso_toy_example_works() {
        // glmnet divides the squared error by the number of samples as well
        let dataset = Dataset::new(array![[-1.0], [0.0], [1.0]], array![-1.0, 0.0, 1.0]);

        let t = array![[2.0], [3.0], [4.0]];
        let path = LassoPath::params()
            .lambdas(array![1.0, 0.5, 0.1, 1e-8])
            .standardize(false)
            .fit(&dataset)
            .unwrap();

        assert_abs_diff_eq!(*path.intercepts(), array![0.0, 0.0, 0.0, 0.0]);
        assert_abs_diff_eq!(dense_column(&path, 0), array![0.0], epsilon = 1e-6);
        assert_abs_diff_eq!(dense_column(&path, 1), array![0.25], epsilon = 1e-6);
        assert_abs_diff_eq!(dense_column(&path, 2), array![0.85], epsilon = 1e-6);
        assert_abs_diff_eq!(dense_column(&path, 3), array![1.0], epsilon = 1e-6);

        let predictions = path.predict(&t);
        assert_abs_diff_eq!(
            predictions.column(1).to_owned(),
            array![0.5, 0.75, 1.0],
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            predictions.column(2).to_owned(),
            array![1.7, 2.55, 3.4],
            epsilon = 1e-6
        );
    }

    #[test]
    fn elastic_net_toy_example_works() {
        let dataset = Dataset::new(array![[-1.0], [0.0], [1.0]], array![-1.0, 0.0, 1.0]);

        let path = LassoPath::params()
            .l1_ratio(0.3)
            .lambdas(array![0.5])
            .standardize(false)
            .fit(&dataset)
            .unwrap();

        assert_abs_diff_eq!(dense_column(&path, 0), array![0.50819], epsilon = 1e-3);
    }

    #[test]
    fn intercept_is_recovered_on_original_scale() {
        let mut rng = SmallRng::seed_from_u64(42);
        let (dataset, beta) =
            generate::sparse_linear(200, 4, &[(0, 2.0), (3, -1.0)], 5.0, 0.0, &mut rng);
        let records = dataset.records().mapv(|v| 10.0 * v + 3.0);
        let dataset = Dataset::new(records, dataset.targets().clone());

        let path = LassoPath::params()
            .lambdas(array![1e-9])
            .tolerance(1e-14)
            .fit(&dataset)
            .unwrap();

        // features were scaled by 10 and shifted by 3
        let expected = beta.mapv(|b| b / 10.0);
        assert_abs_diff_eq!(dense_column(&path, 0), expected, epsilon = 1e-6);
        assert_abs_diff_eq!(
            path.intercepts()[0],
            5.0 - 3.0 * expected.sum(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn orthogonal_design_enters_by_correlation() {
        let x = generate::walsh_design(16, 3);
        let y = x.dot(&array![3.0, -2.0, 1.0]) + 1.0;
        let dataset = Dataset::new(x, y);

        let path = LassoPath::params()
            .lambdas(array![4.0, 2.5, 1.5, 0.5])
            .fit(&dataset)
            .unwrap();

        let active: Vec<usize> = path
            .coefficients()
            .outer_iterator()
            .map(|col| col.nnz())
            .collect();
        assert_eq!(active, vec![0, 1, 2, 3]);
        assert_abs_diff_eq!(dense_column(&path, 3), array![2.5, -1.5, 0.5], epsilon = 1e-6);
    }

    #[test]
    fn weights_are_applied() {
        let dataset = Dataset::new(array![[0.0], [1.0], [2.0]], array![0.0, 1.0, 0.0])
            .with_weights(array![1.0, 1.0, 0.0]);

        let path = LassoPath::params()
            .lambdas(array![1e-10])
            .fit(&dataset)
            .unwrap();

        // the third sample has no weight, the remaining two lie on y = x
        assert_abs_diff_eq!(dense_column(&path, 0), array![1.0], epsilon = 1e-6);
        assert_abs_diff_eq!(path.intercepts()[0], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn constant_feature_stays_inactive() {
        let x = Array2::from_shape_vec((4, 2), vec![1.0, 5.0, 2.0, 5.0, 3.0, 5.0, 4.0, 5.0])
            .unwrap();
        let dataset = Dataset::new(x, array![1.0, 2.0, 3.0, 4.0]);

        let path = LassoPath::params()
            .lambdas(array![1e-6])
            .fit(&dataset)
            .unwrap();

        assert_abs_diff_eq!(dense_column(&path, 0)[1], 0.0);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let dataset = Dataset::new(array![[1.0], [2.0]], array![1.0, 2.0]);

        let res = LassoPath::params().lambdas(array![0.1]).l1_ratio(1.5).fit(&dataset);
        assert!(matches!(res, Err(LassoPathError::InvalidL1Ratio(_))));

        let res = LassoPath::<f64>::params().fit(&dataset);
        assert!(matches!(res, Err(LassoPathError::EmptyPenalties)));

        let res = LassoPath::params().lambdas(array![0.1, -1.0]).fit(&dataset);
        assert!(matches!(
            res,
            Err(LassoPathError::InvalidPenalty { index: 1, .. })
        ));

        let res = LassoPath::params()
            .lambdas(array![0.1])
            .fit(&dataset.with_weights(array![1.0]));
        assert!(matches!(
            res,
            Err(LassoPathError::WeightsLength {
                expected: 2,
                found: 1
            })
        ));
    }
}
