//! Interfaces of the two solvers lassoed boosting is built on
//!
//! The estimator only needs a sparse lasso path and, for every active set, a boosting path with
//! a stopping iteration. [`ElasticNetSolver`] and [`ComponentwiseBoosting`] provide both on top
//! of `lboost-lasso` and `lboost-l2boost`; other implementations can be passed to
//! [`LassoedBoostValidParams::fit_with`](crate::LassoedBoostValidParams::fit_with).

use lboost::traits::Fit;
use lboost::{DatasetBase, Float, ParamGuard};
use lboost_l2boost::{L2BoostParams, L2BoostPath};
use lboost_lasso::LassoPathParams;
use ndarray::{Array1, ArrayView1, ArrayView2};
use sprs::CsMat;

use crate::error::Result;
use crate::hyperparams::Family;

/// Lasso stage configuration handed to a [`LassoPathSolver`]
#[derive(Debug, Clone, PartialEq)]
pub struct LassoConfig<F> {
    pub family: Family,
    pub l1_ratio: F,
    pub lambdas: Array1<F>,
    pub standardize: bool,
    pub with_intercept: bool,
    pub tolerance: F,
}

pub trait LassoPathSolver<F: Float> {
    /// Coefficients of every penalty as a sparse `n_features × n_lambdas` matrix, without
    /// intercepts
    fn solve_path(
        &self,
        records: ArrayView2<F>,
        targets: ArrayView1<F>,
        weights: ArrayView1<f32>,
        config: &LassoConfig<F>,
    ) -> Result<CsMat<F>>;
}

/// Coefficients along the iterations of a fitted boosting model
pub trait BoostingPath<F> {
    /// Coefficients after `iteration` iterations, one per column of the design matrix
    fn coefficients_at(&self, iteration: usize) -> Result<Array1<F>>;

    /// Iteration minimizing the corrected AIC over the whole path
    fn optimal_stop(&self) -> usize;
}

pub trait BoostingPathSolver<F: Float>: Sync {
    type Path: BoostingPath<F>;

    fn fit_path(
        &self,
        records: ArrayView2<F>,
        targets: ArrayView1<F>,
        max_iterations: usize,
        learning_rate: F,
    ) -> Result<Self::Path>;
}

/// Coordinate descent elastic net from `lboost-lasso`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElasticNetSolver {
    /// Coordinate descent sweeps per penalty
    pub max_sweeps: u32,
}

impl Default for ElasticNetSolver {
    fn default() -> Self {
        ElasticNetSolver {
            max_sweeps: 100_000,
        }
    }
}

impl<F: Float> LassoPathSolver<F> for ElasticNetSolver {
    fn solve_path(
        &self,
        records: ArrayView2<F>,
        targets: ArrayView1<F>,
        weights: ArrayView1<f32>,
        config: &LassoConfig<F>,
    ) -> Result<CsMat<F>> {
        match config.family {
            Family::Gaussian => {}
        }

        let dataset = DatasetBase::new(records, targets).with_weights(weights.to_owned());
        let path = LassoPathParams::new()
            .l1_ratio(config.l1_ratio)
            .lambdas(config.lambdas.clone())
            .standardize(config.standardize)
            .with_intercept(config.with_intercept)
            .tolerance(config.tolerance)
            .max_iterations(self.max_sweeps)
            .fit(&dataset)?;

        Ok(path.coefficients().clone())
    }
}

/// Componentwise linear L2 boosting from `lboost-l2boost`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentwiseBoosting {
    /// Center the features before boosting
    pub center: bool,
}

impl Default for ComponentwiseBoosting {
    fn default() -> Self {
        ComponentwiseBoosting { center: true }
    }
}

impl<F: Float> BoostingPath<F> for L2BoostPath<F> {
    fn coefficients_at(&self, iteration: usize) -> Result<Array1<F>> {
        Ok(L2BoostPath::coefficients_at(self, iteration)?)
    }

    fn optimal_stop(&self) -> usize {
        L2BoostPath::optimal_stop(self)
    }
}

impl<F: Float> BoostingPathSolver<F> for ComponentwiseBoosting {
    type Path = L2BoostPath<F>;

    fn fit_path(
        &self,
        records: ArrayView2<F>,
        targets: ArrayView1<F>,
        max_iterations: usize,
        learning_rate: F,
    ) -> Result<L2BoostPath<F>> {
        let params = L2BoostParams::new()
            .max_iterations(max_iterations)
            .learning_rate(learning_rate)
            .center(self.center)
            .check()?;

        Ok(params.fit(&DatasetBase::new(records, targets))?)
    }
}
