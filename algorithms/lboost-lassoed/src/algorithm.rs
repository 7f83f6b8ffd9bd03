use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Data, Ix2};
use rayon::prelude::*;
use sprs::CsMat;

use lboost::dataset::{AsSingleTargets, DatasetBase};
use lboost::traits::{Fit, Predict};
use lboost::{Float, ParamGuard};

use crate::active_set::{extract_active_sets, ActiveSet};
use crate::assemble::{drop_first_row, CscBuilder};
use crate::error::{LassoedError, Result};
use crate::hyperparams::{LassoedBoostParams, LassoedBoostValidParams};
use crate::penalty::penalty_sequence;
use crate::plan::{plan, Plan};
use crate::reconstruct::{reconstruct, SparseColumn};
use crate::sampling::sample_steps;
use crate::solver::{
    BoostingPath, BoostingPathSolver, ComponentwiseBoosting, ElasticNetSolver, LassoConfig,
    LassoPathSolver,
};
use crate::stats::CenteringStats;
use crate::LassoedBoost;

impl<F, D, T> Fit<ArrayBase<D, Ix2>, T, LassoedError> for LassoedBoostValidParams<F>
where
    F: Float,
    D: Data<Elem = F>,
    T: AsSingleTargets<Elem = F>,
{
    type Object = LassoedBoost<F>;

    /// Fit lassoed boosting with the coordinate descent lasso of `lboost-lasso` and the
    /// componentwise boosting of `lboost-l2boost`.
    ///
    /// The feature matrix `x` must have shape `(n_samples, n_features)`, the target variable `y`
    /// shape `(n_samples)`. Sample weights enter the lasso stage only; every sample has unit
    /// weight when the dataset carries none.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        self.fit_with(
            dataset,
            &ElasticNetSolver::default(),
            &ComponentwiseBoosting::default(),
        )
    }
}

/// Boosting solutions of one fitted penalty
#[derive(Debug, Clone)]
struct Block<F> {
    stop: usize,
    steps: Vec<usize>,
    columns: Vec<SparseColumn<F>>,
}

impl<F: Float> LassoedBoostValidParams<F> {
    /// Fit lassoed boosting with caller provided solvers
    ///
    /// # Errors
    ///
    /// Besides invalid input shapes and weights, errors of the lasso solver are returned as is.
    /// Errors of the boosting solver are wrapped in [`LassoedError::AtPenalty`]; when several
    /// penalties fail, the lowest index is reported.
    pub fn fit_with<D, T, L, B>(
        &self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, T>,
        lasso: &L,
        boosting: &B,
    ) -> Result<LassoedBoost<F>>
    where
        D: Data<Elem = F>,
        T: AsSingleTargets<Elem = F>,
        L: LassoPathSolver<F>,
        B: BoostingPathSolver<F>,
    {
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
        let weights = sample_weights(dataset.weights(), n_samples)?;

        let stats = CenteringStats::compute(x, y);
        let lambdas = penalty_sequence(self, stats.lambda_max, n_samples, n_features);
        let config = LassoConfig {
            family: self.family(),
            l1_ratio: self.l1_ratio(),
            lambdas: lambdas.clone(),
            standardize: self.standardize(),
            with_intercept: self.with_intercept(),
            tolerance: self.tolerance(),
        };

        let path = lasso.solve_path(x, y, weights.view(), &config)?;
        let n_lambdas = lambdas.len();
        if path.shape() != (n_features, n_lambdas) {
            return Err(LassoedError::PathShape {
                expected: (n_features, n_lambdas),
                found: path.shape(),
            });
        }
        let active_sets = extract_active_sets(&path);
        let plan = plan(&active_sets);

        let to_fit = plan
            .iter()
            .enumerate()
            .filter(|(_, step)| **step == Plan::Fit)
            .map(|(index, _)| index)
            .collect::<Vec<_>>();
        let boost = |index: usize| self.boost(index, x, y, &active_sets[index], &stats, boosting);
        let outcomes: Vec<Result<Block<F>>> = if self.parallel() {
            to_fit.par_iter().map(|&index| boost(index)).collect()
        } else {
            to_fit.iter().map(|&index| boost(index)).collect()
        };

        let mut blocks: Vec<Option<Block<F>>> = vec![None; n_lambdas];
        for (index, outcome) in to_fit.into_iter().zip(outcomes) {
            blocks[index] = Some(outcome?);
        }

        let n_steps = self.n_steps();
        let mut builder = CscBuilder::new(n_features + 1, n_lambdas * n_steps);
        let mut stopping_numbers = Vec::with_capacity(n_lambdas);
        let mut sampled_steps = Vec::with_capacity(n_lambdas);
        for (index, step) in plan.iter().enumerate() {
            let block = match *step {
                Plan::Empty => None,
                Plan::Reuse(source) => blocks[source].as_ref(),
                Plan::Fit => blocks[index].as_ref(),
            };

            match block {
                Some(block) => {
                    builder.push_columns(&block.columns);
                    stopping_numbers.push(block.stop);
                    sampled_steps.push(block.steps.clone());
                }
                None => {
                    builder.push_zero_columns(n_steps);
                    stopping_numbers.push(0);
                    sampled_steps.push(Vec::new());
                }
            }

            log::debug!(
                "penalty {} (lambda = {}): {} active features, {:?}, stopping number {}",
                index,
                lambdas[index],
                active_sets[index].len(),
                step,
                stopping_numbers[index]
            );
        }

        let n_reused = plan.iter().filter(|s| matches!(s, Plan::Reuse(_))).count();
        let n_empty = plan.iter().filter(|s| **s == Plan::Empty).count();
        log::info!(
            "lassoed boosting: {} penalties, {} boosting fits, {} reused, {} empty",
            n_lambdas,
            n_lambdas - n_reused - n_empty,
            n_reused,
            n_empty
        );

        Ok(LassoedBoost {
            coefficients: builder.build(),
            records: x.to_owned(),
            targets: y.to_owned(),
            lambdas,
            stopping_numbers,
            sampled_steps,
            active_sets,
            row_names: row_names(dataset.feature_names(), n_features),
            n_steps,
            with_intercept: self.with_intercept(),
        })
    }

    fn boost<B: BoostingPathSolver<F>>(
        &self,
        index: usize,
        x: ArrayView2<F>,
        y: ArrayView1<F>,
        active_set: &ActiveSet,
        stats: &CenteringStats<F>,
        boosting: &B,
    ) -> Result<Block<F>> {
        let restricted = active_set.restrict(x);
        let path = boosting
            .fit_path(
                restricted.view(),
                y,
                self.max_iterations(),
                self.learning_rate(),
            )
            .map_err(|err| LassoedError::at_penalty(index, err))?;

        let stop = path.optimal_stop();
        let steps = sample_steps(
            stop,
            self.n_steps(),
            self.lower_factor(),
            self.upper_factor(),
            self.max_iterations(),
        );
        let columns = steps
            .iter()
            .map(|&step| {
                let local = path
                    .coefficients_at(step)
                    .map_err(|err| LassoedError::at_penalty(index, err))?;
                reconstruct(index, local.view(), active_set, stats)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Block {
            stop,
            steps,
            columns,
        })
    }
}

impl<F: Float> LassoedBoostParams<F> {
    /// Check the parameters and fit with caller provided solvers, see
    /// [`LassoedBoostValidParams::fit_with`]
    pub fn fit_with<D, T, L, B>(
        &self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, T>,
        lasso: &L,
        boosting: &B,
    ) -> Result<LassoedBoost<F>>
    where
        D: Data<Elem = F>,
        T: AsSingleTargets<Elem = F>,
        L: LassoPathSolver<F>,
        B: BoostingPathSolver<F>,
    {
        self.check_ref()?.fit_with(dataset, lasso, boosting)
    }
}

/// Dataset weights, or unit weights when the dataset carries none
fn sample_weights(weights: Option<&[f32]>, n_samples: usize) -> Result<Array1<f32>> {
    let weights = match weights {
        None => return Ok(Array1::ones(n_samples)),
        Some(weights) => weights,
    };
    if weights.len() != n_samples {
        return Err(LassoedError::WeightsLength {
            expected: n_samples,
            found: weights.len(),
        });
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || weights.iter().sum::<f32>() <= 0.0 {
        return Err(LassoedError::InvalidWeights);
    }

    Ok(Array1::from(weights.to_vec()))
}

fn row_names(feature_names: &[String], n_features: usize) -> Option<Vec<String>> {
    if feature_names.is_empty() {
        return None;
    }
    if feature_names.len() != n_features {
        log::warn!(
            "dataset has {} feature names for {} features, rows stay unnamed",
            feature_names.len(),
            n_features
        );
        return None;
    }

    let mut names = Vec::with_capacity(n_features + 1);
    names.push("intercept".to_string());
    names.extend(feature_names.iter().cloned());
    Some(names)
}

impl<F: Float, D: Data<Elem = F>> Predict<&ArrayBase<D, Ix2>, Result<Array2<F>>>
    for LassoedBoost<F>
{
    /// Given an input matrix `X`, with shape `(n_samples, n_features)`, `predict` returns one
    /// column of predictions per stored solution.
    fn predict(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        if x.ncols() != self.n_features() {
            return Err(LassoedError::FeatureCount {
                expected: self.n_features(),
                found: x.ncols(),
            });
        }

        Ok(self.linear_predictor(x.view()))
    }
}

/// View the fitted model
impl<F: Float> LassoedBoost<F> {
    /// Coefficient matrix, one column per (penalty, sampled step) pair in penalty-major order
    ///
    /// Row 0 is the intercept and row `j + 1` the coefficient of feature `j`. Without intercept
    /// the intercept row is dropped and row `j` belongs to feature `j`.
    pub fn coefficients(&self) -> CsMat<F> {
        if self.with_intercept {
            self.coefficients.clone()
        } else {
            drop_first_row(&self.coefficients)
        }
    }

    /// Dense coefficients of one penalty and sampled step, laid out like a column of
    /// [`coefficients`](Self::coefficients)
    pub fn coefficients_at(&self, lambda_index: usize, step: usize) -> Result<Array1<F>> {
        let column = self.column_index(lambda_index, step)?;
        let skip = usize::from(!self.with_intercept);

        let mut dense = Array1::zeros(self.n_features() + 1 - skip);
        if let Some(values) = self.coefficients.outer_view(column) {
            for (row, &value) in values.iter().filter(|(row, _)| *row >= skip) {
                dense[row - skip] = value;
            }
        }
        Ok(dense)
    }

    /// Column of the coefficient matrix holding penalty `lambda_index` and sampled step `step`
    pub fn column_index(&self, lambda_index: usize, step: usize) -> Result<usize> {
        if lambda_index >= self.n_lambdas() {
            return Err(LassoedError::LambdaIndex {
                index: lambda_index,
                n_lambdas: self.n_lambdas(),
            });
        }
        if step >= self.n_steps {
            return Err(LassoedError::StepIndex {
                index: step,
                n_steps: self.n_steps,
            });
        }
        Ok(lambda_index * self.n_steps + step)
    }

    /// Predictions on the training records
    pub fn fitted(&self) -> Array2<F> {
        self.linear_predictor(self.records.view())
    }

    /// Corrected AIC stopping iteration of every penalty, zero for an empty active set
    pub fn stopping_numbers(&self) -> &[usize] {
        &self.stopping_numbers
    }

    /// Boosting iterations sampled for every penalty, empty for an empty active set
    pub fn sampled_steps(&self) -> &[Vec<usize>] {
        &self.sampled_steps
    }

    pub fn active_sets(&self) -> &[ActiveSet] {
        &self.active_sets
    }

    pub fn lambdas(&self) -> &Array1<F> {
        &self.lambdas
    }

    pub fn n_lambdas(&self) -> usize {
        self.lambdas.len()
    }

    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    pub fn n_features(&self) -> usize {
        self.records.ncols()
    }

    pub fn with_intercept(&self) -> bool {
        self.with_intercept
    }

    /// Names of the rows of [`coefficients`](Self::coefficients), when the dataset had feature
    /// names
    pub fn row_names(&self) -> Option<&[String]> {
        let skip = usize::from(!self.with_intercept);
        self.row_names.as_ref().map(|names| &names[skip..])
    }

    pub fn records(&self) -> &Array2<F> {
        &self.records
    }

    pub fn targets(&self) -> &Array1<F> {
        &self.targets
    }

    fn linear_predictor(&self, x: ArrayView2<F>) -> Array2<F> {
        let mut predictions = Array2::zeros((x.nrows(), self.coefficients.cols()));
        for (k, column) in self.coefficients.outer_iterator().enumerate() {
            let mut target = predictions.column_mut(k);
            for (row, &value) in column.iter() {
                if row == 0 {
                    if self.with_intercept {
                        target += value;
                    }
                } else {
                    target.scaled_add(value, &x.column(row - 1));
                }
            }
        }

        predictions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LassoedBoostParams;
    use approx::assert_abs_diff_eq;
    use lboost::Dataset;
    use lboost_datasets::generate;
    use lboost_l2boost::{L2BoostError, L2BoostPath};
    use ndarray::{array, Axis};
    use rand::{rngs::SmallRng, SeedableRng};

    /// Orthogonal noiseless problem with active sets of sizes 0, 1, 2, 3, 3 along the penalties
    fn walsh_problem() -> (Dataset<f64>, LassoedBoostParams<f64>) {
        let x = generate::walsh_design(64, 6);
        let y = x.dot(&array![3., 0., -2., 0., 1.5, 0.]) + 2.0;
        let dataset = Dataset::new(x, y).with_feature_names(generate::feature_names(6));

        let params = LassoedBoost::params()
            .n_lambdas(5)
            .lambdas(array![10., 2.5, 1.75, 0.5, 0.4])
            .n_steps(4)
            .max_iterations(1000);

        (dataset, params)
    }

    #[test]
    fn active_sets_follow_the_lasso_path() {
        let (dataset, params) = walsh_problem();
        let model = params.fit(&dataset).unwrap();

        let sets = model
            .active_sets()
            .iter()
            .map(|s| s.features().to_vec())
            .collect::<Vec<_>>();
        assert_eq!(
            sets,
            vec![vec![], vec![0], vec![0, 2], vec![0, 2, 4], vec![0, 2, 4]]
        );
    }

    #[test]
    fn coefficient_matrix_has_grid_shape() {
        let (dataset, params) = walsh_problem();
        let model = params.clone().fit(&dataset).unwrap();
        assert_eq!(model.coefficients().shape(), (7, 20));
        assert_eq!(model.stopping_numbers().len(), 5);

        let model = params.with_intercept(false).fit(&dataset).unwrap();
        assert_eq!(model.coefficients().shape(), (6, 20));
        assert_eq!(model.row_names().unwrap()[0], "x0");
    }

    #[test]
    fn empty_active_set_is_zero_filled() {
        let (dataset, params) = walsh_problem();
        let model = params.fit(&dataset).unwrap();

        let coefficients = model.coefficients();
        for step in 0..4 {
            let column = model.column_index(0, step).unwrap();
            assert_eq!(coefficients.outer_view(column).unwrap().nnz(), 0);
        }
        assert_eq!(model.stopping_numbers()[0], 0);
        assert!(model.sampled_steps()[0].is_empty());
    }

    #[test]
    fn equal_cardinality_reuses_solutions() {
        let (dataset, params) = walsh_problem();
        let model = params.fit(&dataset).unwrap();

        assert_eq!(model.stopping_numbers()[4], model.stopping_numbers()[3]);
        assert_eq!(model.sampled_steps()[4], model.sampled_steps()[3]);
        for step in 0..4 {
            assert_eq!(
                model.coefficients_at(4, step).unwrap(),
                model.coefficients_at(3, step).unwrap()
            );
        }
    }

    #[test]
    fn noiseless_coefficients_are_recovered() {
        let (dataset, params) = walsh_problem();
        let model = params.fit(&dataset).unwrap();

        let stop = model.stopping_numbers()[3];
        assert!(stop > 300);
        // the window starts at zero, so every step is shifted up by one
        assert_eq!(*model.sampled_steps()[3].last().unwrap(), (stop + 1).min(1000));

        let coefficients = model.coefficients_at(3, 3).unwrap();
        assert_abs_diff_eq!(
            coefficients,
            array![2., 3., 0., -2., 0., 1.5, 0.],
            epsilon = 1e-4
        );
    }

    #[test]
    fn intercept_matches_the_centering_statistics() {
        let mut rng = SmallRng::seed_from_u64(3);
        let (dataset, _) =
            generate::sparse_linear(50, 5, &[(0, 1.5), (2, -1.0)], 4.0, 0.5, &mut rng);
        let model = LassoedBoost::params()
            .n_lambdas(8)
            .n_steps(3)
            .max_iterations(200)
            .fit(&dataset)
            .unwrap();

        let x_mean = dataset.records().mean_axis(Axis(0)).unwrap();
        let y_mean = dataset.targets().mean().unwrap();
        for lambda_index in 0..8 {
            for step in 0..3 {
                let column = model.coefficients_at(lambda_index, step).unwrap();
                if model.active_sets()[lambda_index].is_empty() {
                    assert_abs_diff_eq!(column[0], 0.0);
                } else {
                    let expected = y_mean - x_mean.dot(&column.slice(ndarray::s![1..]));
                    assert_abs_diff_eq!(column[0], expected, epsilon = 1e-10);
                }
            }
        }
    }

    #[test]
    fn sampled_steps_stay_in_the_window() {
        let mut rng = SmallRng::seed_from_u64(11);
        let (dataset, _) =
            generate::sparse_linear(60, 8, &[(1, 2.0), (4, -1.0), (6, 0.5)], 0.0, 0.3, &mut rng);
        let model = LassoedBoost::params()
            .n_lambdas(10)
            .n_steps(7)
            .lower_factor(0.5)
            .upper_factor(1.2)
            .max_iterations(300)
            .fit(&dataset)
            .unwrap();

        for (steps, &stop) in model.sampled_steps().iter().zip(model.stopping_numbers()) {
            if stop == 0 {
                assert!(steps.is_empty());
                continue;
            }
            assert_eq!(steps.len(), 7);
            assert!(steps.windows(2).all(|w| w[0] <= w[1]));
            assert!(steps.iter().all(|&s| s >= 1 && s <= 300));
            assert!(steps[0] as f64 >= (0.5 * stop as f64).round());
            assert!(steps[6] as f64 <= (1.2 * stop as f64).round() + 1.0);
        }
    }

    #[test]
    fn single_step_samples_the_midpoint() {
        let (dataset, params) = walsh_problem();
        let model = params.n_steps(1).fit(&dataset).unwrap();

        assert_eq!(model.coefficients().shape(), (7, 5));
        for (steps, &stop) in model.sampled_steps().iter().zip(model.stopping_numbers()) {
            if stop > 0 {
                let midpoint = ((stop as f64) / 2.0).round() as usize;
                assert_eq!(steps, &vec![midpoint.max(1)]);
            }
        }
    }

    #[test]
    fn predictions_match_the_coefficients() {
        let (dataset, params) = walsh_problem();
        let model = params.fit(&dataset).unwrap();

        let predictions = model.predict(dataset.records()).unwrap();
        assert_eq!(predictions, model.fitted());

        let mut design = Array2::ones((64, 7));
        design
            .slice_mut(ndarray::s![.., 1..])
            .assign(dataset.records());
        let expected = design.dot(&model.coefficients().to_dense());
        assert_abs_diff_eq!(predictions, expected, epsilon = 1e-10);

        let res = model.predict(&Array2::<f64>::zeros((3, 5)));
        assert!(matches!(
            res,
            Err(LassoedError::FeatureCount {
                expected: 6,
                found: 5
            })
        ));
    }

    #[test]
    fn predictions_without_intercept_skip_it() {
        let (dataset, params) = walsh_problem();
        let model = params.with_intercept(false).fit(&dataset).unwrap();

        let predictions = model.predict(dataset.records()).unwrap();
        let expected = dataset.records().dot(&model.coefficients().to_dense());
        assert_abs_diff_eq!(predictions, expected, epsilon = 1e-10);
    }

    #[test]
    fn weights_must_match_samples() {
        let (dataset, params) = walsh_problem();
        let dataset = dataset.with_weights(Array1::ones(63));

        assert!(matches!(
            params.fit(&dataset),
            Err(LassoedError::WeightsLength {
                expected: 64,
                found: 63
            })
        ));
    }

    #[test]
    fn reversed_weights_are_still_checked() {
        let (dataset, params) = walsh_problem();
        let mut weights = Array1::ones(63);
        weights.invert_axis(Axis(0));
        let dataset = dataset.with_weights(weights);

        assert!(matches!(
            params.fit(&dataset),
            Err(LassoedError::WeightsLength {
                expected: 64,
                found: 63
            })
        ));
    }

    #[test]
    fn penalties_must_match_n_lambdas() {
        let (dataset, params) = walsh_problem();
        let params = params.lambdas(array![10., 2.5, 1.75, 0.5]);

        assert!(matches!(
            params.fit(&dataset),
            Err(LassoedError::PenaltyLength {
                expected: 5,
                found: 4
            })
        ));
    }

    #[test]
    fn parallel_fit_is_identical() {
        let mut rng = SmallRng::seed_from_u64(5);
        let (dataset, _) =
            generate::sparse_linear(40, 12, &[(0, 1.0), (3, -2.0), (7, 0.7)], 1.0, 0.4, &mut rng);
        let params = LassoedBoost::params()
            .n_lambdas(20)
            .n_steps(5)
            .max_iterations(250);

        let sequential = params.clone().fit(&dataset).unwrap();
        let parallel = params.parallel(true).fit(&dataset).unwrap();

        assert_eq!(
            sequential.coefficients().to_dense(),
            parallel.coefficients().to_dense()
        );
        assert_eq!(sequential.stopping_numbers(), parallel.stopping_numbers());
        assert_eq!(sequential.sampled_steps(), parallel.sampled_steps());
    }

    #[test]
    fn row_names_start_with_intercept() {
        let (dataset, params) = walsh_problem();
        let model = params.fit(&dataset).unwrap();

        let names = model.row_names().unwrap();
        assert_eq!(names.len(), 7);
        assert_eq!(names[0], "intercept");
        assert_eq!(names[6], "x5");

        let unnamed = Dataset::new(dataset.records().clone(), dataset.targets().clone());
        let (_, params) = walsh_problem();
        assert!(params.fit(&unnamed).unwrap().row_names().is_none());
    }

    /// Boosting path which loses the last coefficient
    struct Truncated(L2BoostPath<f64>);

    impl BoostingPath<f64> for Truncated {
        fn coefficients_at(&self, iteration: usize) -> Result<Array1<f64>> {
            let full = self.0.coefficients_at(iteration)?;
            Ok(full.slice(ndarray::s![..full.len() - 1]).to_owned())
        }

        fn optimal_stop(&self) -> usize {
            self.0.optimal_stop()
        }
    }

    struct DroppingBoosting;

    impl BoostingPathSolver<f64> for DroppingBoosting {
        type Path = Truncated;

        fn fit_path(
            &self,
            records: ArrayView2<f64>,
            targets: ArrayView1<f64>,
            max_iterations: usize,
            learning_rate: f64,
        ) -> Result<Truncated> {
            ComponentwiseBoosting::default()
                .fit_path(records, targets, max_iterations, learning_rate)
                .map(Truncated)
        }
    }

    #[test]
    fn dropped_variable_is_a_mapping_error() {
        let (dataset, params) = walsh_problem();
        let res = params.fit_with(&dataset, &ElasticNetSolver::default(), &DroppingBoosting);

        assert!(matches!(
            res,
            Err(LassoedError::Mapping {
                index: 1,
                expected: 1,
                found: 0
            })
        ));
    }

    /// Fails on every active set with at least two features
    struct FailingBoosting;

    impl BoostingPathSolver<f64> for FailingBoosting {
        type Path = L2BoostPath<f64>;

        fn fit_path(
            &self,
            records: ArrayView2<f64>,
            targets: ArrayView1<f64>,
            max_iterations: usize,
            learning_rate: f64,
        ) -> Result<L2BoostPath<f64>> {
            if records.ncols() >= 2 {
                return Err(L2BoostError::NoVariance(records.ncols()).into());
            }
            ComponentwiseBoosting::default().fit_path(records, targets, max_iterations, learning_rate)
        }
    }

    #[test]
    fn solver_errors_name_the_lowest_failing_penalty() {
        for parallel in [false, true].iter() {
            let (dataset, params) = walsh_problem();
            let res = params.parallel(*parallel).fit_with(
                &dataset,
                &ElasticNetSolver::default(),
                &FailingBoosting,
            );

            match res {
                Err(LassoedError::AtPenalty { index, source }) => {
                    assert_eq!(index, 2);
                    assert!(matches!(
                        *source,
                        LassoedError::Boosting(L2BoostError::NoVariance(2))
                    ));
                }
                other => panic!("unexpected result {:?}", other.map(|_| ())),
            }
        }
    }

    /// Lasso solver returning a fixed path
    struct FixedPath(CsMat<f64>);

    impl LassoPathSolver<f64> for FixedPath {
        fn solve_path(
            &self,
            _records: ArrayView2<f64>,
            _targets: ArrayView1<f64>,
            _weights: ArrayView1<f32>,
            _config: &LassoConfig<f64>,
        ) -> Result<CsMat<f64>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn injected_lasso_path_drives_the_plan() {
        let (dataset, params) = walsh_problem();
        // 6 features × 5 penalties with active sets {}, {0}, {}, {2}, {4}
        let path = CsMat::new_csc(
            (6, 5),
            vec![0, 0, 1, 1, 2, 3],
            vec![0, 2, 4],
            vec![1.0, 1.0, 1.0],
        );
        let model = params
            .fit_with(
                &dataset,
                &FixedPath(path),
                &ComponentwiseBoosting::default(),
            )
            .unwrap();

        let stops = model.stopping_numbers();
        assert_eq!(stops[0], 0);
        assert_eq!(stops[2], 0);
        // {2} is fitted after the reset, {4} reuses it despite the different feature
        assert!(stops[1] > 0 && stops[3] > 0);
        assert_eq!(stops[4], stops[3]);
        assert_eq!(
            model.coefficients_at(4, 3).unwrap(),
            model.coefficients_at(3, 3).unwrap()
        );
        assert!(model.coefficients_at(3, 3).unwrap()[3] < -1.5);

        let wrong_shape = CsMat::new_csc((6, 4), vec![0, 0, 0, 0, 0], vec![], vec![]);
        let res = params.fit_with(
            &dataset,
            &FixedPath(wrong_shape),
            &ComponentwiseBoosting::default(),
        );
        assert!(matches!(
            res,
            Err(LassoedError::PathShape {
                expected: (6, 5),
                found: (6, 4)
            })
        ));
    }

    #[test]
    fn grid_lookups_are_range_checked() {
        let (dataset, params) = walsh_problem();
        let model = params.fit(&dataset).unwrap();

        assert_eq!(model.column_index(2, 3).unwrap(), 11);
        assert!(matches!(
            model.column_index(5, 0),
            Err(LassoedError::LambdaIndex {
                index: 5,
                n_lambdas: 5
            })
        ));
        assert!(matches!(
            model.coefficients_at(0, 4),
            Err(LassoedError::StepIndex {
                index: 4,
                n_steps: 4
            })
        ));
    }
}
