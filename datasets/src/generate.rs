//! Utility functions for randomly generating datasets

use lboost::Dataset;
use ndarray::{Array, Array1, Array2};
use ndarray_rand::{
    rand::Rng,
    rand_distr::{Normal, StandardNormal},
    RandomExt,
};

/// Default feature names `x0, x1, ...`
pub fn feature_names(n_features: usize) -> Vec<String> {
    (0..n_features).map(|j| format!("x{}", j)).collect()
}

/// Generates a sparse linear regression problem
///
/// The records are `n_samples × n_features` independent standard normal draws. The response is
/// `intercept + Σ β_j x_j + ε` where `β` is zero except on `support`, a list of
/// `(feature index, coefficient)` pairs, and `ε ~ N(0, noise_std²)`. A `noise_std` of zero yields
/// a noiseless response.
///
/// Returns the dataset, carrying the names of [`feature_names`], together with the dense vector
/// of generating coefficients.
///
/// # Panics
///
/// If a support index is not smaller than `n_features` or `noise_std` is negative.
pub fn sparse_linear<R: Rng>(
    n_samples: usize,
    n_features: usize,
    support: &[(usize, f64)],
    intercept: f64,
    noise_std: f64,
    rng: &mut R,
) -> (Dataset<f64>, Array1<f64>) {
    let records: Array2<f64> =
        Array::random_using((n_samples, n_features), StandardNormal, rng);

    let mut coefficients = Array1::zeros(n_features);
    for &(idx, value) in support {
        assert!(idx < n_features, "support index {} out of range", idx);
        coefficients[idx] = value;
    }

    let mut targets = records.dot(&coefficients) + intercept;
    if noise_std > 0.0 {
        let noise = Normal::new(0.0, noise_std).expect("noise standard deviation is finite");
        targets += &Array::random_using(n_samples, noise, rng);
    }

    let dataset = Dataset::new(records, targets).with_feature_names(feature_names(n_features));

    (dataset, coefficients)
}

/// Deterministic design with mutually orthogonal, centered `±1` columns
///
/// Column `j` is the Walsh function `j + 1` of a Sylvester-Hadamard matrix of order
/// `n_samples`; the constant Walsh function is skipped, so every column has zero mean and unit
/// population variance. Useful whenever the lasso path must be known in closed form: for an
/// orthogonal design a variable enters the active set exactly when the penalty drops below its
/// marginal correlation with the response.
///
/// # Panics
///
/// If `n_samples` is not a power of two or `n_features >= n_samples`.
pub fn walsh_design(n_samples: usize, n_features: usize) -> Array2<f64> {
    assert!(
        n_samples.is_power_of_two(),
        "the number of samples must be a power of two"
    );
    assert!(
        n_features < n_samples,
        "at most n_samples - 1 orthogonal non-constant columns exist"
    );

    Array2::from_shape_fn((n_samples, n_features), |(i, j)| {
        // entry (i, k) of the Sylvester-Hadamard matrix is (-1)^popcount(i & k)
        if (i & (j + 1)).count_ones() % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::Axis;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn walsh_columns_are_orthonormal() {
        let x = walsh_design(16, 5);
        let gram = x.t().dot(&x) / 16.0;

        assert_abs_diff_eq!(gram, Array2::eye(5), epsilon = 1e-12);
        assert_abs_diff_eq!(
            x.mean_axis(Axis(0)).unwrap(),
            Array1::zeros(5),
            epsilon = 1e-12
        );
    }

    #[test]
    fn noiseless_response_is_exactly_linear() {
        let mut rng = SmallRng::seed_from_u64(7);
        let (dataset, beta) = sparse_linear(30, 6, &[(1, 2.0), (4, -0.5)], 1.5, 0.0, &mut rng);

        assert_eq!(dataset.records().dim(), (30, 6));
        assert_eq!(dataset.feature_names()[4], "x4");
        assert_abs_diff_eq!(beta, ndarray::array![0., 2., 0., 0., -0.5, 0.]);

        let expected = dataset.records().dot(&beta) + 1.5;
        assert_abs_diff_eq!(dataset.targets().clone(), expected, epsilon = 1e-12);
    }
}
