//! End-to-end training run: split, evaluate, select, persist.

use std::path::PathBuf;

use ndarray::{ArrayBase, Data, Ix2};

use crate::config::TrainerConfig;
use crate::datasets::TrainTestSplit;
use crate::error::{Result, TrainerError};
use crate::estimators::Predict;
use crate::evaluator::{evaluate, ScoreReport};
use crate::metrics::{mean_absolute_error, mean_squared_error};
use crate::persist::{save_artifact, Artifact};
use crate::registry::ModelRegistry;
use crate::selector::Selector;

#[cfg(test)]
mod tests;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOutcome {
    pub model_name: String,
    /// Held-out R² of the persisted model.
    pub score: f64,
    pub report: ScoreReport,
    pub artifact_path: PathBuf,
}

pub struct ModelTrainer {
    config: TrainerConfig,
    registry: Option<ModelRegistry<f64>>,
}

impl ModelTrainer {
    /// A trainer over the default families, or the subset named by
    /// `config.models`.
    pub fn new(config: TrainerConfig) -> Self {
        ModelTrainer {
            config,
            registry: None,
        }
    }

    /// A trainer over a caller-provided registry. `config.models` is ignored.
    pub fn with_registry(config: TrainerConfig, registry: ModelRegistry<f64>) -> Self {
        ModelTrainer {
            config,
            registry: Some(registry),
        }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    fn registry(&self) -> Result<ModelRegistry<f64>> {
        if let Some(registry) = &self.registry {
            return Ok(registry.clone());
        }
        match &self.config.models {
            Some(names) => ModelRegistry::from_names(names.as_slice(), self.config.random_state),
            None => Ok(ModelRegistry::default_regressors(
                self.config.random_state,
            )),
        }
    }

    /// Trains every candidate on `train`, scores it on `test` and writes the
    /// best one to the configured artifact path.
    ///
    /// Both matrices hold the features followed by the target as the last
    /// column.
    pub fn initiate_model_trainer<S1, S2>(
        &self,
        train: &ArrayBase<S1, Ix2>,
        test: &ArrayBase<S2, Ix2>,
    ) -> Result<TrainingOutcome>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        self.config.validate()?;
        tracing::info!(
            train_rows = train.nrows(),
            test_rows = test.nrows(),
            "splitting features and target"
        );
        let split = TrainTestSplit::from_matrices(train, test)?;

        let registry = self.registry()?;
        let evaluation = evaluate(&registry, &split.train, &split.test)?;
        let selection = Selector::new(self.config.min_score).select(evaluation)?;

        let predictions = selection
            .model
            .predict(split.test.design_matrix())
            .map_err(|source| TrainerError::Fit {
                model: selection.name.clone(),
                source,
            })?;
        let y_test = split.test.targets().view();
        let score_error = |source| TrainerError::Score {
            model: selection.name.clone(),
            source,
        };
        let mse = mean_squared_error(y_test, predictions.view()).map_err(score_error)?;
        let mae = mean_absolute_error(y_test, predictions.view()).map_err(score_error)?;
        tracing::info!(
            model = selection.name.as_str(),
            r2 = selection.score,
            mse,
            mae,
            "best model on test set"
        );

        let artifact_path = self.config.artifact_path.clone();
        let persist_error = |source| TrainerError::Persist {
            path: artifact_path.clone(),
            source,
        };
        let artifact = Artifact::new(selection.name.clone(), selection.score, selection.model)
            .map_err(persist_error)?;
        save_artifact(&artifact_path, &artifact).map_err(persist_error)?;
        tracing::info!(path = %artifact_path.display(), "saved best model");

        Ok(TrainingOutcome {
            model_name: selection.name,
            score: selection.score,
            report: selection.report,
            artifact_path,
        })
    }
}
