use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2};

use lboost::dataset::{AsSingleTargets, DatasetBase};
use lboost::traits::{Fit, Predict};
use lboost::Float;

use crate::error::{L2BoostError, Result};
use crate::hyperparams::L2BoostValidParams;
use crate::L2BoostPath;

impl<F, D, T> Fit<ArrayBase<D, Ix2>, T, L2BoostError> for L2BoostValidParams<F>
where
    F: Float,
    D: Data<Elem = F>,
    T: AsSingleTargets<Elem = F>,
{
    type Object = L2BoostPath<F>;

    /// Boost a linear model for `max_iterations` iterations.
    ///
    /// The feature matrix `x` must have shape `(n_samples, n_features)`, the target variable `y`
    /// shape `(n_samples)`. Sample weights are ignored.
    ///
    /// Returns an `L2BoostPath` with the coefficients of every iteration and its corrected AIC.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        dataset.check_samples()?;
        let x = dataset.records().view();
        let y = dataset.as_single_targets();
        let (n_samples, n_features) = x.dim();
        if n_samples < 2 {
            return Err(lboost::Error::NotEnoughSamples {
                needed: 2,
                found: n_samples,
            }
            .into());
        }
        let n = F::cast(n_samples);

        let offset = y.sum() / n;
        let feature_means = if self.center() {
            x.sum_axis(Axis(0)) / n
        } else {
            Array1::zeros(n_features)
        };
        let x = &x - &feature_means;

        let norms = x.map_axis(Axis(0), |col| col.dot(&col));
        let selectable = selectable_features(dataset.records(), &norms);
        if !selectable.iter().any(|&s| s) {
            return Err(L2BoostError::NoVariance(n_features));
        }

        let gram = x.t().dot(&x);
        let nu = self.learning_rate();
        let n_iterations = self.max_iterations();

        let mut residuals = y.mapv(|v| v - offset);
        // boosting hat matrix B_m = X G_m, only G is stored
        let mut hat_factor = Array2::<F>::zeros((n_features, n_samples));
        let mut trace = F::zero();

        let mut steps = Vec::with_capacity(n_iterations);
        let mut rss = Array1::zeros(n_iterations);
        let mut degrees_of_freedom = Array1::zeros(n_iterations);
        let mut aicc = Array1::zeros(n_iterations);

        for m in 0..n_iterations {
            let correlations = x.t().dot(&residuals);
            let (best, fit) = best_component(&correlations, &norms, &selectable);
            let increment = nu * fit;
            let column = x.column(best);

            residuals.scaled_add(-increment, &column);
            steps.push((best, increment));

            // B_m = B_{m-1} + ν H_j (I - B_{m-1}) with H_j the hat matrix of column j
            let mut delta = &column - &gram.row(best).dot(&hat_factor);
            delta *= nu / norms[best];
            trace += column.dot(&delta);
            hat_factor.row_mut(best).scaled_add(F::one(), &delta);

            rss[m] = residuals.dot(&residuals);
            degrees_of_freedom[m] = trace;
            aicc[m] = corrected_aic(rss[m], trace, n);
        }

        let optimal_stop = first_minimum(&aicc) + 1;
        log::debug!(
            "boosted {} iterations over {} features, corrected AIC minimal at {} (df = {})",
            n_iterations,
            n_features,
            optimal_stop,
            degrees_of_freedom[optimal_stop - 1]
        );

        Ok(L2BoostPath {
            offset,
            feature_means,
            steps,
            rss,
            degrees_of_freedom,
            aicc,
            optimal_stop,
        })
    }
}

impl<F: Float, D: Data<Elem = F>> Predict<&ArrayBase<D, Ix2>, Array1<F>> for L2BoostPath<F> {
    /// Predict with the model at the corrected AIC stopping iteration.
    fn predict(&self, x: &ArrayBase<D, Ix2>) -> Array1<F> {
        assert_eq!(
            x.ncols(),
            self.n_features(),
            "The number of features must match the fitted path."
        );

        let coefficients = self.accumulate(self.optimal_stop);
        let intercept = self.offset - self.feature_means.dot(&coefficients);
        x.dot(&coefficients) + intercept
    }
}

/// View the fitted path
impl<F: Float> L2BoostPath<F> {
    /// Number of boosting iterations on the path
    pub fn n_iterations(&self) -> usize {
        self.steps.len()
    }

    pub fn n_features(&self) -> usize {
        self.feature_means.len()
    }

    /// Coefficients after `iteration` boosting iterations, counting from one
    pub fn coefficients_at(&self, iteration: usize) -> Result<Array1<F>> {
        self.check_iteration(iteration)?;
        Ok(self.accumulate(iteration))
    }

    /// Intercept after `iteration` boosting iterations, on the scale of the uncentered features
    pub fn intercept_at(&self, iteration: usize) -> Result<F> {
        let coefficients = self.coefficients_at(iteration)?;
        Ok(self.offset - self.feature_means.dot(&coefficients))
    }

    /// Coefficients after the last iteration
    pub fn coefficients(&self) -> Array1<F> {
        self.accumulate(self.n_iterations())
    }

    /// The first iteration minimizing the corrected AIC
    pub fn optimal_stop(&self) -> usize {
        self.optimal_stop
    }

    /// Mean of the response, the model before the first iteration
    pub fn offset(&self) -> F {
        self.offset
    }

    /// Corrected AIC after every iteration
    pub fn aicc(&self) -> &Array1<F> {
        &self.aicc
    }

    /// Trace of the boosting hat matrix after every iteration
    pub fn degrees_of_freedom(&self) -> &Array1<F> {
        &self.degrees_of_freedom
    }

    /// Residual sum of squares after every iteration
    pub fn rss(&self) -> &Array1<F> {
        &self.rss
    }

    /// Index of the feature updated in every iteration
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.steps.iter().map(|(j, _)| *j)
    }

    fn check_iteration(&self, iteration: usize) -> Result<()> {
        if iteration == 0 || iteration > self.n_iterations() {
            return Err(L2BoostError::InvalidIteration {
                requested: iteration,
                fitted: self.n_iterations(),
            });
        }
        Ok(())
    }

    fn accumulate(&self, iteration: usize) -> Array1<F> {
        let mut coefficients = Array1::zeros(self.n_features());
        for &(j, increment) in &self.steps[..iteration] {
            coefficients[j] += increment;
        }
        coefficients
    }
}

/// A feature can only be selected when its centered sum of squares is not rounding noise
fn selectable_features<F: Float, D: Data<Elem = F>>(
    records: &ArrayBase<D, Ix2>,
    norms: &Array1<F>,
) -> Vec<bool> {
    let tolerance = F::cast(records.nrows()) * F::epsilon();
    records
        .axis_iter(Axis(1))
        .zip(norms.iter())
        .map(|(raw, &norm)| norm > F::zero() && norm > tolerance * raw.dot(&raw))
        .collect()
}

/// Feature with the largest reduction of the residual sum of squares and its least squares fit
fn best_component<F: Float>(
    correlations: &Array1<F>,
    norms: &Array1<F>,
    selectable: &[bool],
) -> (usize, F) {
    let mut best = (0, F::zero());
    let mut best_reduction = F::neg_infinity();
    for (j, (&c, &norm)) in correlations.iter().zip(norms.iter()).enumerate() {
        if !selectable[j] {
            continue;
        }
        let reduction = c * c / norm;
        if reduction > best_reduction {
            best_reduction = reduction;
            best = (j, c / norm);
        }
    }
    best
}

/// `log(rss / n) + (1 + df / n) / (1 - (df + 2) / n)`, infinite once `df + 2 >= n`
fn corrected_aic<F: Float>(rss: F, df: F, n: F) -> F {
    let denominator = F::one() - (df + F::cast(2)) / n;
    if denominator <= F::zero() {
        return F::infinity();
    }
    (rss / n).ln() + (F::one() + df / n) / denominator
}

fn first_minimum<F: Float>(values: &Array1<F>) -> usize {
    let mut arg = 0;
    for (i, &v) in values.iter().enumerate() {
        if v < values[arg] || values[arg].is_nan() {
            arg = i;
        }
    }
    arg
}
