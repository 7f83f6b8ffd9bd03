use lboost_l2boost::L2BoostError;
use lboost_lasso::LassoPathError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LassoedError>;

#[derive(Debug, Error)]
pub enum LassoedError {
    #[error("unsupported family `{0}`, only `gaussian` is available")]
    UnsupportedFamily(String),
    #[error("l1 ratio should be in range [0, 1], but is {0}")]
    InvalidL1Ratio(f32),
    #[error("learning rate should be in range (0, 1), but is {0}")]
    InvalidLearningRate(f32),
    #[error("tolerance should be positive, but is {0}")]
    InvalidTolerance(f32),
    #[error("lambda min ratio should be in range (0, 1], but is {0}")]
    InvalidLambdaMinRatio(f32),
    /// One of the counts `n_lambdas`, `n_steps` or `max_iterations` is zero
    #[error("{0} should be at least one")]
    ZeroCount(&'static str),
    #[error("sampling factors should satisfy 0 <= lower <= upper, but are [{lower}, {upper}]")]
    InvalidSamplingFactors { lower: f32, upper: f32 },
    #[error("penalty {index} should be finite and non-negative, but is {value}")]
    InvalidPenalty { index: usize, value: f32 },
    #[error("penalty sequence has length {found}, but {expected} penalties are configured")]
    PenaltyLength { expected: usize, found: usize },
    #[error("weights have length {found}, but one weight per sample ({expected}) is required")]
    WeightsLength { expected: usize, found: usize },
    #[error("weights should be finite, non-negative and not all zero")]
    InvalidWeights,
    /// The lasso solver returned a matrix of the wrong shape
    #[error("lasso path has shape {found:?}, but {expected:?} (features, penalties) is required")]
    PathShape {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// Boosting coefficients do not match the active set they were fitted on
    #[error("boosting coefficients at penalty {index} have length {found}, but the active set has {expected} features")]
    Mapping {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("records have {found} features, but the model was fitted on {expected}")]
    FeatureCount { expected: usize, found: usize },
    #[error("penalty index {index} is out of range for {n_lambdas} penalties")]
    LambdaIndex { index: usize, n_lambdas: usize },
    #[error("step index {index} is out of range for {n_steps} sampled steps")]
    StepIndex { index: usize, n_steps: usize },
    /// A solver failed while processing one penalty
    #[error("fit failed at penalty {index}: {source}")]
    AtPenalty {
        index: usize,
        source: Box<LassoedError>,
    },
    #[error(transparent)]
    LassoPath(#[from] LassoPathError),
    #[error(transparent)]
    Boosting(#[from] L2BoostError),
    #[error(transparent)]
    BaseCrate(#[from] lboost::Error),
}

impl LassoedError {
    pub(crate) fn at_penalty(index: usize, source: LassoedError) -> LassoedError {
        LassoedError::AtPenalty {
            index,
            source: Box::new(source),
        }
    }
}
