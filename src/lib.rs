//! `lboost` provides the shared building blocks of the lassoed boosting workspace.
//!
//! Lassoed boosting is a two-stage sparse linear regression: a lasso path proposes an active set
//! of predictors for every penalty value, and a componentwise L2 boosting fit restricted to each
//! active set refines the coefficients. The estimators themselves live in the crates under
//! `algorithms/`:
//!
//! * `lboost-lasso`: elastic net regularization path via coordinate descent
//! * `lboost-l2boost`: componentwise L2 boosting with a corrected AIC stopping rule
//! * `lboost-lassoed`: the two-stage estimator combining both
//!
//! This crate contains what they have in common: the [`Float`] bound, the [`DatasetBase`]
//! container, the [`Fit`](traits::Fit) and [`Predict`](traits::Predict) traits, the
//! [`ParamGuard`] hyper-parameter pattern and a couple of regression metrics.
//!

pub mod dataset;
pub mod error;
mod metrics_regression;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, DatasetBase, DatasetView, Float};
pub use error::Error;
pub use param_guard::ParamGuard;

/// Common metrics functions for regression
pub mod metrics {
    pub use crate::metrics_regression::Regression;
}
