//! Compressed sparse column output

use lboost::Float;
use sprs::CsMat;

use crate::reconstruct::SparseColumn;

/// Appends columns to a CSC matrix without a dense intermediate
#[derive(Debug, Clone)]
pub struct CscBuilder<F> {
    n_rows: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<F>,
}

impl<F: Float> CscBuilder<F> {
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        let mut indptr = Vec::with_capacity(n_cols + 1);
        indptr.push(0);
        CscBuilder {
            n_rows,
            indptr,
            indices: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Append a column of `(row, value)` pairs in ascending row order
    pub fn push_column(&mut self, column: &[(usize, F)]) {
        debug_assert!(column.windows(2).all(|w| w[0].0 < w[1].0));
        debug_assert!(column.iter().all(|(row, _)| *row < self.n_rows));

        for &(row, value) in column {
            self.indices.push(row);
            self.data.push(value);
        }
        self.indptr.push(self.indices.len());
    }

    pub fn push_zero_columns(&mut self, count: usize) {
        for _ in 0..count {
            self.indptr.push(self.indices.len());
        }
    }

    pub fn push_columns(&mut self, columns: &[SparseColumn<F>]) {
        for column in columns {
            self.push_column(column);
        }
    }

    pub fn build(self) -> CsMat<F> {
        let shape = (self.n_rows, self.indptr.len() - 1);
        CsMat::new_csc(shape, self.indptr, self.indices, self.data)
    }
}

/// Remove the first row of a CSC matrix and shift the remaining rows up by one
pub fn drop_first_row<F: Float>(matrix: &CsMat<F>) -> CsMat<F> {
    let (n_rows, n_cols) = matrix.shape();
    let mut builder = CscBuilder::new(n_rows.saturating_sub(1), n_cols);
    for column in matrix.outer_iterator() {
        let shifted: Vec<_> = column
            .iter()
            .filter(|(row, _)| *row > 0)
            .map(|(row, value)| (row - 1, *value))
            .collect();
        builder.push_column(&shifted);
    }
    builder.build()
}
