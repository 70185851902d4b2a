use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::datasets::DatasetError;
use crate::estimators::EstimatorError;
use crate::metrics::MetricError;
use crate::persist::PersistError;

/// Simplified `Result` using [`TrainerError`] as error type
pub type Result<T> = std::result::Result<T, TrainerError>;

/// Failure of any stage of the training pipeline
///
/// Each variant names the stage it comes from and keeps the underlying cause
/// reachable through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("invalid dataset")]
    Dataset(#[from] DatasetError),
    #[error("failed to fit model {model:?}")]
    Fit {
        model: String,
        #[source]
        source: EstimatorError,
    },
    #[error("failed to score model {model:?}")]
    Score {
        model: String,
        #[source]
        source: MetricError,
    },
    #[error("the model registry is empty")]
    NoCandidates,
    #[error("model {0:?} is already registered")]
    DuplicateModel(String),
    #[error("unknown model {0:?}")]
    UnknownModel(String),
    #[error("best model {model:?} scored {score:.4}, below the minimum of {threshold:.4}")]
    NoAcceptableModel {
        model: String,
        score: f64,
        threshold: f64,
    },
    #[error("failed to persist the model to {path}")]
    Persist {
        path: PathBuf,
        #[source]
        source: PersistError,
    },
    #[error("invalid configuration")]
    Config(#[from] ConfigError),
}
