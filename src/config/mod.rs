//! Run configuration, read from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LoggingConfig;
use crate::selector::DEFAULT_MIN_SCORE;


pub const DEFAULT_ARTIFACT_PATH: &str = "artifacts/model.bin";
pub const DEFAULT_RANDOM_STATE: u64 = 42;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("min_score must be a finite number, got {0}")]
    InvalidMinScore(f64),
    #[error("the models list is empty")]
    EmptyModels,
}

/// Settings of one training run. Every field has a default, so an empty file
/// is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainerConfig {
    /// Destination of the selected model.
    pub artifact_path: PathBuf,
    /// Minimum held-out R² required to persist a model.
    pub min_score: f64,
    pub random_state: u64,
    /// Registry names of the models to train, all default families if unset.
    pub models: Option<Vec<String>>,
    pub logging: LoggingConfig,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            min_score: DEFAULT_MIN_SCORE,
            random_state: DEFAULT_RANDOM_STATE,
            models: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl TrainerConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: TrainerConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&input)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_score.is_finite() {
            return Err(ConfigError::InvalidMinScore(self.min_score));
        }
        if self.models.as_ref().map_or(false, Vec::is_empty) {
            return Err(ConfigError::EmptyModels);
        }
        Ok(())
    }
}
