use super::{AsSingleTargets, Dataset, DatasetBase, DatasetView, Float, Records};
use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2};
use rand::{seq::SliceRandom, Rng};

/// Implementation without constraints on records and targets
///
/// This implementation block provides methods for the creation and mutation of datasets. This
/// includes swapping the targets, return the records etc.
impl<R: Records, T> DatasetBase<R, T> {
    /// Create a new dataset from records and targets
    ///
    /// # Example
    ///
    /// ```ignore
    /// let dataset = Dataset::new(records, targets);
    /// ```
    pub fn new(records: R, targets: T) -> DatasetBase<R, T> {
        DatasetBase {
            records,
            targets,
            weights: Array1::zeros(0),
            feature_names: Vec::new(),
        }
    }

    /// Returns reference to targets
    pub fn targets(&self) -> &T {
        &self.targets
    }

    /// Returns optionally weights
    pub fn weights(&self) -> Option<&[f32]> {
        if !self.weights.is_empty() {
            self.weights.as_slice()
        } else {
            None
        }
    }

    /// Return a single weight
    ///
    /// The weight of the `idx`th observation is returned. If no weight is specified, then all
    /// observations are unweighted with default value `1.0`.
    pub fn weight_for(&self, idx: usize) -> f32 {
        self.weights.get(idx).copied().unwrap_or(1.0)
    }

    /// Returns feature names
    ///
    /// The slice is empty when the dataset was created without names.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Return records of a dataset
    ///
    /// The records are data points from which predictions are made. This functions returns a
    /// reference to the record field.
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Updates the records of a dataset
    ///
    /// This function overwrites the records in a dataset. It also invalidates the weights and
    /// feature names.
    pub fn with_records<T2: Records>(self, records: T2) -> DatasetBase<T2, T> {
        DatasetBase {
            records,
            targets: self.targets,
            weights: Array1::zeros(0),
            feature_names: Vec::new(),
        }
    }

    /// Updates the targets of a dataset
    pub fn with_targets<T2>(self, targets: T2) -> DatasetBase<R, T2> {
        DatasetBase {
            records: self.records,
            targets,
            weights: self.weights,
            feature_names: self.feature_names,
        }
    }

    /// Updates the weights of a dataset
    ///
    /// The weights are stored contiguously, so that [`weights`](Self::weights) can hand out a
    /// slice regardless of the layout they were passed in.
    pub fn with_weights(mut self, weights: Array1<f32>) -> DatasetBase<R, T> {
        self.weights = weights.as_standard_layout().into_owned();

        self
    }

    /// Updates the feature names of a dataset
    pub fn with_feature_names<I: Into<String>>(mut self, names: Vec<I>) -> DatasetBase<R, T> {
        let feature_names = names.into_iter().map(|x| x.into()).collect();

        self.feature_names = feature_names;

        self
    }
}

impl<F: Float, D: Data<Elem = F>, T: AsSingleTargets<Elem = F>> DatasetBase<ArrayBase<D, Ix2>, T> {
    /// Creates a view of a dataset
    pub fn view(&self) -> DatasetView<'_, F> {
        DatasetBase::new(self.records.view(), self.targets.as_single_targets())
            .with_weights(self.weights.clone())
            .with_feature_names(self.feature_names.clone())
    }

    /// Checks that records and targets agree on the number of samples
    pub fn check_samples(&self) -> Result<()> {
        let targets = self.targets.as_single_targets().len();
        if self.records.nrows() != targets {
            return Err(Error::MismatchedSamples {
                records: self.records.nrows(),
                targets,
            });
        }

        Ok(())
    }

    /// Copies the rows given by `indices` into a new owned dataset
    ///
    /// Weights and feature names are carried over.
    pub fn select(&self, indices: &[usize]) -> Dataset<F> {
        let weights = if self.weights.is_empty() {
            Array1::zeros(0)
        } else {
            self.weights.select(Axis(0), indices)
        };

        DatasetBase::new(
            self.records.select(Axis(0), indices),
            self.targets.as_single_targets().select(Axis(0), indices),
        )
        .with_weights(weights)
        .with_feature_names(self.feature_names.clone())
    }

    /// Shuffles the samples of a dataset
    pub fn shuffle<RNG: Rng>(&self, rng: &mut RNG) -> Dataset<F> {
        let mut indices = (0..self.nsamples()).collect::<Vec<_>>();
        indices.shuffle(rng);

        self.select(&indices)
    }

    /// Splits the dataset into `k` contiguous folds
    ///
    /// Returns `k` pairs of (training, validation) sets. Every sample appears in exactly one
    /// validation set, the first `n % k` folds are one sample larger than the rest.
    ///
    /// # Errors
    ///
    /// * [`Error::Parameters`] if `k < 2`
    /// * [`Error::NotEnoughSamples`] if `k` exceeds the number of samples
    pub fn fold(&self, k: usize) -> Result<Vec<(Dataset<F>, Dataset<F>)>> {
        if k < 2 {
            return Err(Error::Parameters(format!(
                "at least two folds are required, got {}",
                k
            )));
        }
        let n = self.nsamples();
        if k > n {
            return Err(Error::NotEnoughSamples { needed: k, found: n });
        }

        let (base, rest) = (n / k, n % k);
        let mut start = 0;
        let mut folds = Vec::with_capacity(k);
        for i in 0..k {
            let len = base + usize::from(i < rest);
            let (valid, train): (Vec<usize>, Vec<usize>) =
                (0..n).partition(|idx| (start..start + len).contains(idx));
            folds.push((self.select(&train), self.select(&valid)));
            start += len;
        }

        Ok(folds)
    }
}

impl<F: Float, T> From<(Array2<F>, T)> for DatasetBase<Array2<F>, T> {
    fn from(rec_tar: (Array2<F>, T)) -> Self {
        DatasetBase::new(rec_tar.0, rec_tar.1)
    }
}
