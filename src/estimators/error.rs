use thiserror::Error;

/// Simplified `Result` using [`EstimatorError`](crate::estimators::error::EstimatorError) as error type
pub type Result<T> = std::result::Result<T, EstimatorError>;

/// Error variants from hyperparameter construction or model estimation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimatorError {
    #[error("invalid number of estimators {0}")]
    InvalidNEstimators(usize),
    #[error("invalid learning rate {0}")]
    InvalidLearningRate(f32),
    #[error("invalid subsample ratio {0}, expected a value in (0, 1]")]
    InvalidSubsample(f32),
    #[error("invalid max depth {0}")]
    InvalidMaxDepth(usize),
    #[error("invalid min_samples_split {0}, expected at least 2")]
    InvalidMinSamplesSplit(usize),
    #[error("invalid min_samples_leaf {0}")]
    InvalidMinSamplesLeaf(usize),
    #[error("invalid max_features {0}")]
    InvalidMaxFeatures(usize),
    #[error("invalid number of neighbors {0}")]
    InvalidNNeighbors(usize),
    #[error("invalid constant {0}")]
    InvalidConstant(f32),
    /// The input has not enough samples
    #[error("cannot fit on an empty dataset")]
    EmptyDataset,
    #[error("design matrix has {records} rows but there are {targets} targets")]
    LengthMismatch { records: usize, targets: usize },
    #[error("{n_neighbors} neighbors requested but only {n_samples} training samples")]
    NotEnoughSamples { n_neighbors: usize, n_samples: usize },
    #[error("non-finite value found in {0}")]
    NonFinite(&'static str),
    #[error("model was fitted on {expected} features but got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },
}
