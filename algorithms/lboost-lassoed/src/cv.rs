//! K-fold selection of one solution from the grid

use lboost::dataset::{AsSingleTargets, DatasetBase};
use lboost::metrics::Regression;
use lboost::traits::{Fit, Predict};
use lboost::Float;
use ndarray::{Array1, ArrayBase, Data, Ix2};

use crate::error::Result;
use crate::hyperparams::LassoedBoostValidParams;
use crate::LassoedBoost;

/// Outcome of [`LassoedBoostValidParams::cross_validate`]
#[derive(Debug, Clone)]
pub struct CrossValidation<F> {
    /// Model fitted on the whole dataset
    pub model: LassoedBoost<F>,
    /// Mean squared validation error of every column, averaged over the folds
    pub mean_squared_errors: Array1<F>,
    /// Column with the lowest error
    pub best_column: usize,
    /// Penalty index of the best column
    pub best_lambda_index: usize,
    /// Position of the best column among the sampled steps of its penalty
    pub best_step: usize,
}

impl<F: Float> CrossValidation<F> {
    /// Boosting iteration of the best column in the full model, `None` for an empty active set
    pub fn best_iteration(&self) -> Option<usize> {
        self.model.sampled_steps()[self.best_lambda_index]
            .get(self.best_step)
            .copied()
    }

    /// Coefficients of the best column in the full model
    pub fn best_coefficients(&self) -> Result<Array1<F>> {
        self.model
            .coefficients_at(self.best_lambda_index, self.best_step)
    }
}

impl<F: Float> LassoedBoostValidParams<F> {
    /// Select a solution by `k`-fold cross-validation
    ///
    /// The whole dataset is fitted first to fix the penalty sequence. Every fold is then refitted
    /// on the remaining samples with these penalties and predicted, so the columns of all fits
    /// describe the same (penalty, sampled step) grid. Folds are contiguous blocks of samples;
    /// shuffle the dataset beforehand for random folds.
    ///
    /// # Errors
    ///
    /// Returns a parameter error if `k < 2` or `k` exceeds the number of samples, and any error
    /// of the individual fits.
    pub fn cross_validate<D, T>(
        &self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, T>,
        k: usize,
    ) -> Result<CrossValidation<F>>
    where
        D: Data<Elem = F>,
        T: AsSingleTargets<Elem = F>,
    {
        let model = self.fit(dataset)?;
        let folds = dataset.fold(k)?;

        let mut fixed = self.clone();
        fixed.lambdas = Some(model.lambdas().clone());

        let mut errors = Array1::zeros(model.coefficients().cols());
        for (i, (train, valid)) in folds.iter().enumerate() {
            let fold_model = fixed.fit(train)?;
            let predictions = fold_model.predict(valid.records())?;
            errors += &predictions.mean_squared_error(valid.targets())?;
            log::debug!(
                "fold {} of {}: {} validation samples",
                i + 1,
                k,
                valid.targets().len()
            );
        }
        errors /= F::cast(k);

        let best_column = errors
            .iter()
            .enumerate()
            .fold((0, F::infinity()), |(best, min), (column, &err)| {
                if err < min {
                    (column, err)
                } else {
                    (best, min)
                }
            })
            .0;
        let n_steps = model.n_steps();
        log::info!(
            "cross-validation with {} folds: best column {} with mean squared error {}",
            k,
            best_column,
            errors[best_column]
        );

        Ok(CrossValidation {
            model,
            mean_squared_errors: errors,
            best_column,
            best_lambda_index: best_column / n_steps,
            best_step: best_column % n_steps,
        })
    }
}
