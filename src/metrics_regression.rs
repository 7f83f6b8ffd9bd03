//! Common metrics for regression
//!
//! This module implements common comparison metrices for continuous variables. One-dimensional
//! predictions are compared to the ground truth directly, two-dimensional predictions (one column
//! per stored solution of a path estimator) are compared column by column.

use ndarray::{Array1, ArrayBase, Axis, Data, Ix1, Ix2};

use crate::{
    error::{Error, Result},
    Float,
};

/// Regression metrices trait
pub trait Regression<F: Float> {
    /// A scalar for a single prediction, a vector for a matrix of predictions
    type Output;

    /// Maximal error between two continuous variables
    fn max_error<D: Data<Elem = F>>(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<Self::Output>;
    /// Mean error between two continuous variables
    fn mean_absolute_error<D: Data<Elem = F>>(
        &self,
        compare_to: &ArrayBase<D, Ix1>,
    ) -> Result<Self::Output>;
    /// Mean squared error between two continuous variables
    fn mean_squared_error<D: Data<Elem = F>>(
        &self,
        compare_to: &ArrayBase<D, Ix1>,
    ) -> Result<Self::Output>;
    /// R squared coefficient, is the proportion of the variance in the dependent variable that is
    /// predictable from the independent variable.
    ///
    /// To evaluate the accuracy of a prediction, use
    /// ```ignore
    /// prediction.r2(&ground_truth)
    /// ```
    fn r2<D: Data<Elem = F>>(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<Self::Output>;
}

fn check_len(found: usize, expected: usize) -> Result<()> {
    if found != expected {
        return Err(Error::MismatchedSamples {
            records: found,
            targets: expected,
        });
    }
    Ok(())
}

impl<F: Float, S: Data<Elem = F>> Regression<F> for ArrayBase<S, Ix1> {
    type Output = F;

    fn max_error<D: Data<Elem = F>>(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<F> {
        check_len(self.len(), compare_to.len())?;

        Ok((self - compare_to)
            .iter()
            .map(|x| x.abs())
            .fold(F::neg_infinity(), F::max))
    }

    fn mean_absolute_error<D: Data<Elem = F>>(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<F> {
        check_len(self.len(), compare_to.len())?;

        (self - compare_to)
            .mapv(|x| x.abs())
            .mean()
            .ok_or(Error::NotEnoughSamples { needed: 1, found: 0 })
    }

    fn mean_squared_error<D: Data<Elem = F>>(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<F> {
        check_len(self.len(), compare_to.len())?;

        (self - compare_to)
            .mapv(|x| x * x)
            .mean()
            .ok_or(Error::NotEnoughSamples { needed: 1, found: 0 })
    }

    // r2 = 1 - sum((pred_i - y_i)^2)/sum((mean_y - y_i)^2)
    // the mean is the one of `compare_to`
    fn r2<D: Data<Elem = F>>(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<F> {
        check_len(self.len(), compare_to.len())?;

        let mean = compare_to
            .mean()
            .ok_or(Error::NotEnoughSamples { needed: 1, found: 0 })?;

        Ok(F::one()
            - (self - compare_to).mapv(|x| x * x).sum()
                / (compare_to.mapv(|x| (x - mean) * (x - mean)).sum() + F::cast(1e-10)))
    }
}

impl<F: Float, S: Data<Elem = F>> Regression<F> for ArrayBase<S, Ix2> {
    type Output = Array1<F>;

    fn max_error<D: Data<Elem = F>>(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<Array1<F>> {
        self.axis_iter(Axis(1))
            .map(|col| col.max_error(compare_to))
            .collect()
    }

    fn mean_absolute_error<D: Data<Elem = F>>(
        &self,
        compare_to: &ArrayBase<D, Ix1>,
    ) -> Result<Array1<F>> {
        self.axis_iter(Axis(1))
            .map(|col| col.mean_absolute_error(compare_to))
            .collect()
    }

    fn mean_squared_error<D: Data<Elem = F>>(
        &self,
        compare_to: &ArrayBase<D, Ix1>,
    ) -> Result<Array1<F>> {
        self.axis_iter(Axis(1))
            .map(|col| col.mean_squared_error(compare_to))
            .collect()
    }

    fn r2<D: Data<Elem = F>>(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<Array1<F>> {
        self.axis_iter(Axis(1))
            .map(|col| col.r2(compare_to))
            .collect()
    }
}
