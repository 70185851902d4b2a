//! Fits every registered model on the training split and scores it on the
//! test split.

use indexmap::IndexMap;
use num_traits::Signed;
use serde::Serialize;

use crate::datasets::{DatasetError, DatasetView};
use crate::error::{Result, TrainerError};
use crate::estimators::{Fit, FittedModel, Predict};
use crate::metrics::r2_score;
use crate::registry::ModelRegistry;
use crate::Float;


/// A fitted registry entry together with its held-out R².
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<F> {
    pub name: String,
    pub model: FittedModel<F>,
    pub score: f64,
}

/// The outcome of one evaluation run, one candidate per registry entry in
/// registry order.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<F> {
    candidates: Vec<Candidate<F>>,
}

impl<F> From<Vec<Candidate<F>>> for Evaluation<F> {
    fn from(candidates: Vec<Candidate<F>>) -> Self {
        Evaluation { candidates }
    }
}

impl<F> Evaluation<F> {
    pub fn candidates(&self) -> &[Candidate<F>] {
        &self.candidates
    }

    pub fn into_candidates(self) -> Vec<Candidate<F>> {
        self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn report(&self) -> ScoreReport {
        ScoreReport {
            scores: self
                .candidates
                .iter()
                .map(|candidate| (candidate.name.clone(), candidate.score))
                .collect(),
        }
    }

    /// Index of the best candidate: the first maximum, NaN never wins.
    pub(crate) fn best_index(&self) -> Option<usize> {
        best_position(self.candidates.iter().map(|candidate| candidate.score))
    }
}

/// Read-only mapping from model name to held-out R², in registry order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoreReport {
    scores: IndexMap<String, f64>,
}

impl ScoreReport {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.scores.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scores.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// The first entry holding the maximum score.
    pub fn best(&self) -> Option<(&str, f64)> {
        let idx = best_position(self.scores.values().copied())?;
        self.scores
            .get_index(idx)
            .map(|(name, score)| (name.as_str(), *score))
    }
}

fn best_position<I: Iterator<Item = f64>>(scores: I) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, score) in scores.enumerate() {
        if score.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((idx, score));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Fits each registered model on `train` and computes its R² on `test`.
///
/// The first failing model aborts the whole evaluation.
pub fn evaluate<F: Float + Signed>(
    registry: &ModelRegistry<F>,
    train: &DatasetView<F>,
    test: &DatasetView<F>,
) -> Result<Evaluation<F>> {
    if registry.is_empty() {
        return Err(TrainerError::NoCandidates);
    }
    check_split(train, test)?;

    let mut candidates = Vec::with_capacity(registry.len());
    for (name, spec) in registry.iter() {
        tracing::info!(model = name, kind = spec.kind(), "fitting model");
        let model = spec.fit(train).map_err(|source| TrainerError::Fit {
            model: name.to_string(),
            source,
        })?;
        let predictions =
            model
                .predict(test.design_matrix())
                .map_err(|source| TrainerError::Fit {
                    model: name.to_string(),
                    source,
                })?;
        let score: f64 = r2_score(test.targets().view(), predictions.view())
            .map_err(|source| TrainerError::Score {
                model: name.to_string(),
                source,
            })?
            .as_();
        tracing::info!(model = name, r2 = score, "scored model on test set");

        candidates.push(Candidate {
            name: name.to_string(),
            model,
            score,
        });
    }
    Ok(Evaluation { candidates })
}

fn check_split<F>(train: &DatasetView<F>, test: &DatasetView<F>) -> Result<()> {
    if train.n_features() != test.n_features() {
        return Err(DatasetError::ColumnMismatch {
            train: train.n_features() + 1,
            test: test.n_features() + 1,
        }
        .into());
    }
    if train.n_samples() == 0 {
        return Err(DatasetError::Empty { which: "train" }.into());
    }
    if test.n_samples() == 0 {
        return Err(DatasetError::Empty { which: "test" }.into());
    }
    Ok(())
}
