//! `lboost-datasets` provides synthetic datasets ready to be used in tests and examples.
//!
//! ## The Big Picture
//!
//! `lboost-datasets` is a crate in the `lboost` workspace. Sparse regression estimators are best
//! verified on data where the generating coefficients are known, so instead of bundling real
//! world data the crate generates it:
//!
//! * [`generate::sparse_linear`]: gaussian design with a sparse linear response
//! * [`generate::walsh_design`]: deterministic design with mutually orthogonal columns
//!
//! ## Using a dataset
//!
//! ```ignore
//! let support = [(0, 3.0), (4, -2.0)];
//! let (dataset, coefficients) = lboost_datasets::generate::sparse_linear(100, 10, &support, 1.0, 0.1, &mut rng);
//! ```

pub mod generate;
