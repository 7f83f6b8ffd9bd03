//! Active sets of the lasso path
//!
//! An active set is the ascending list of features with a non-zero lasso coefficient at one
//! penalty. It doubles as the mapping between the local feature indices of a model restricted to
//! the set and the global indices of the full design matrix.

use lboost::Float;
use ndarray::{Array2, ArrayView2, Axis};
use sprs::{CsMat, CsVecView};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveSet {
    features: Vec<usize>,
}

impl ActiveSet {
    /// Create an active set from global feature indices, which are sorted and deduplicated
    pub fn new(mut features: Vec<usize>) -> Self {
        features.sort_unstable();
        features.dedup();
        ActiveSet { features }
    }

    /// Non-zero rows of one sparse coefficient column
    pub fn from_column<F: Float>(column: CsVecView<F>) -> Self {
        let features = column
            .iter()
            .filter(|(_, value)| **value != F::zero())
            .map(|(row, _)| row)
            .collect();
        ActiveSet { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Global feature indices in ascending order
    pub fn features(&self) -> &[usize] {
        &self.features
    }

    /// Global index of the feature at local position `local`
    pub fn global(&self, local: usize) -> Option<usize> {
        self.features.get(local).copied()
    }

    /// Local position of the global feature `global`, if it is active
    pub fn local(&self, global: usize) -> Option<usize> {
        self.features.binary_search(&global).ok()
    }

    /// Copy the active columns of `records`
    pub fn restrict<F: Float>(&self, records: ArrayView2<F>) -> Array2<F> {
        records.select(Axis(1), &self.features)
    }
}

/// One active set per column of a `n_features × n_lambdas` coefficient matrix
pub fn extract_active_sets<F: Float>(coefficients: &CsMat<F>) -> Vec<ActiveSet> {
    if !coefficients.is_csc() {
        return extract_active_sets(&coefficients.to_csc());
    }

    coefficients
        .outer_iterator()
        .map(ActiveSet::from_column)
        .collect()
}
