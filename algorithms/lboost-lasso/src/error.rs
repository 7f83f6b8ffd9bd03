use thiserror::Error;

pub type Result<T> = std::result::Result<T, LassoPathError>;

#[derive(Debug, Clone, Error)]
pub enum LassoPathError {
    /// The L1 ratio is not in the unit interval
    #[error("l1 ratio should be in range [0, 1], but is {0}")]
    InvalidL1Ratio(f32),
    /// The convergence threshold is not positive
    #[error("tolerance should be positive, but is {0}")]
    InvalidTolerance(f32),
    #[error("the penalty sequence is empty")]
    EmptyPenalties,
    #[error("penalty {index} should be finite and non-negative, but is {value}")]
    InvalidPenalty { index: usize, value: f32 },
    #[error("weights have length {found}, but one weight per sample ({expected}) is required")]
    WeightsLength { expected: usize, found: usize },
    #[error("weights should be finite, non-negative and not all zero")]
    InvalidWeights,
    #[error(transparent)]
    BaseCrate(#[from] lboost::Error),
}
