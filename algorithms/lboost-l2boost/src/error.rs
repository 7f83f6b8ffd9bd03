use thiserror::Error;

pub type Result<T> = std::result::Result<T, L2BoostError>;

#[derive(Debug, Clone, Error)]
pub enum L2BoostError {
    #[error("learning rate should be in range (0, 1], but is {0}")]
    InvalidLearningRate(f32),
    #[error("at least one boosting iteration is required")]
    ZeroIterations,
    /// Every feature is constant, no component can be selected
    #[error("all {0} features are constant")]
    NoVariance(usize),
    #[error("iteration {requested} is not on the fitted path, valid iterations are 1..={fitted}")]
    InvalidIteration { requested: usize, fitted: usize },
    #[error(transparent)]
    BaseCrate(#[from] lboost::Error),
}
