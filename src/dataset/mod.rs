//! Datasets
//!
//! This module implements the dataset struct and various helper traits to extend its
//! functionality.
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ScalarOperand};

use num_traits::{AsPrimitive, FromPrimitive, NumAssignOps, NumCast, Signed};
use rand::distributions::uniform::SampleUniform;

use std::cmp::PartialOrd;
use std::fmt;
use std::iter::Sum;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

mod impl_dataset;
mod impl_records;
mod impl_targets;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. They are used in records of a dataset and
/// in the regression targets as well.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + NumAssignOps
    + AsPrimitive<usize>
    + for<'a> AddAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> DivAssign<&'a Self>
    + num_traits::MulAdd<Output = Self>
    + SampleUniform
    + ScalarOperand
    + approx::AbsDiffEq
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// DatasetBase
///
/// This is the fundamental structure of a dataset. It contains a number of records about the data
/// and may contain targets, weights and feature names. In order to keep the type complexity low
/// the dataset base is only generic over the records and targets and introduces a trait bound on
/// the records. `weights` and `feature_names`, on the other hand, are always assumed to be owned
/// and copied when views are created.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with dimensionality (nsamples, nfeatures)
/// * `targets`: a one-dimensional response with dimensionality (nsamples)
/// * `weights`: optional weights for each sample with dimensionality (nsamples), empty when
/// every sample has unit weight
/// * `feature_names`: optional descriptive feature names with dimensionality (nfeatures)
///
/// # Trait bounds
///
/// * `R: Records`: generic over feature matrices
/// * `T`: generic over any `ndarray` vector which can be used as targets. The `AsSingleTargets`
/// trait bound is omitted here to avoid some repetition in implementation
/// `src/dataset/impl_dataset.rs`
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,

    pub weights: Array1<f32>,
    feature_names: Vec<String>,
}

/// Dataset
///
/// The most commonly used typed of dataset. It contains a number of records
/// stored as an `Array2` and a single response per record stored as an `Array1`.
pub type Dataset<F> = DatasetBase<Array2<F>, Array1<F>>;

/// DatasetView
///
/// A read only view of a Dataset
pub type DatasetView<'a, F> = DatasetBase<ArrayView2<'a, F>, ArrayView1<'a, F>>;

/// Record trait
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}

/// Return a reference to a single target variable
pub trait AsSingleTargets {
    type Elem;

    /// Returns a view on the targets as one-dimensional array
    fn as_single_targets(&self) -> ArrayView1<Self::Elem>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, Array2};
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn dataset_implements_required_methods() {
        let dataset = Dataset::new(array![[1., 2.], [3., 4.], [5., 6.]], array![0., 1., 2.]);

        assert_eq!(dataset.nsamples(), 3);
        assert_eq!(dataset.nfeatures(), 2);
        assert!(dataset.weights().is_none());
        assert!(dataset.feature_names().is_empty());

        let dataset = dataset
            .with_weights(array![1., 2., 1.])
            .with_feature_names(vec!["height", "width"]);
        assert_eq!(dataset.weights(), Some(&[1., 2., 1.][..]));
        assert_eq!(dataset.feature_names(), &["height", "width"]);

        let view = dataset.view();
        assert_eq!(view.records().dim(), (3, 2));
        assert_eq!(view.as_single_targets(), array![0., 1., 2.]);
        assert_eq!(view.feature_names().len(), 2);
    }

    #[test]
    fn weights_of_any_layout_are_exposed() {
        let mut weights = array![1., 2., 3.];
        weights.invert_axis(ndarray::Axis(0));
        let dataset =
            Dataset::new(array![[1.], [2.], [3.]], array![0., 1., 2.]).with_weights(weights);

        assert_eq!(dataset.weights(), Some(&[3., 2., 1.][..]));
    }

    #[test]
    fn fold_partitions_all_samples() -> Result<(), Error> {
        let records = Array2::from_shape_vec((10, 2), (0..20).map(|x| x as f64).collect())?;
        let targets: Array1<f64> = Array1::linspace(0.0, 9.0, 10);
        let dataset = Dataset::new(records, targets).with_feature_names(vec!["a", "b"]);

        let folds = dataset.fold(3)?;
        assert_eq!(folds.len(), 3);

        let mut seen = Vec::new();
        for (train, valid) in &folds {
            assert_eq!(train.nsamples() + valid.nsamples(), 10);
            assert_eq!(train.feature_names(), &["a", "b"]);
            seen.extend(valid.targets().iter().copied());
        }
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_abs_diff_eq!(Array1::from(seen), Array1::linspace(0.0, 9.0, 10));

        Ok(())
    }

    #[test]
    fn fold_rejects_invalid_counts() {
        let dataset = Dataset::new(array![[1.], [2.], [3.]], array![1., 2., 3.]);

        assert!(matches!(dataset.fold(1), Err(Error::Parameters(_))));
        assert!(matches!(
            dataset.fold(4),
            Err(Error::NotEnoughSamples { needed: 4, found: 3 })
        ));
    }

    #[test]
    fn shuffle_keeps_rows_together() {
        let mut rng = SmallRng::seed_from_u64(42);
        let dataset = Dataset::new(
            array![[0., 0.], [1., 10.], [2., 20.], [3., 30.]],
            array![0., 1., 2., 3.],
        )
        .with_weights(array![0.5, 1.0, 1.5, 2.0]);

        let shuffled = dataset.shuffle(&mut rng);
        for (row, (&target, &weight)) in shuffled
            .records()
            .rows()
            .into_iter()
            .zip(shuffled.targets().iter().zip(shuffled.weights.iter()))
        {
            assert_abs_diff_eq!(row[0], target);
            assert_abs_diff_eq!(row[1], 10. * target);
            assert_abs_diff_eq!(weight, 0.5 * (target as f32 + 1.));
        }
    }
}
