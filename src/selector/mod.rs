//! Picks the best evaluated candidate and enforces a minimum score.

use crate::error::{Result, TrainerError};
use crate::evaluator::{Evaluation, ScoreReport};
use crate::estimators::FittedModel;

#[cfg(test)]
mod tests;

/// Minimum held-out R² a model needs to be persisted.
pub const DEFAULT_MIN_SCORE: f64 = 0.60;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selector {
    min_score: f64,
}

impl Default for Selector {
    fn default() -> Self {
        Selector::new(DEFAULT_MIN_SCORE)
    }
}

/// The winning candidate, ready to be persisted, and the report it won.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<F> {
    pub name: String,
    pub model: FittedModel<F>,
    pub score: f64,
    pub report: ScoreReport,
}

impl Selector {
    pub fn new(min_score: f64) -> Self {
        Selector { min_score }
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    /// Returns the candidate with the highest score. Ties go to the candidate
    /// registered first and NaN scores never win. A best score equal to the
    /// threshold is accepted.
    pub fn select<F>(&self, evaluation: Evaluation<F>) -> Result<Selection<F>> {
        let report = evaluation.report();
        let best = match evaluation.best_index() {
            Some(idx) => idx,
            None => {
                let name = report.names().next().ok_or(TrainerError::NoCandidates)?;
                return Err(TrainerError::NoAcceptableModel {
                    model: name.to_string(),
                    score: f64::NAN,
                    threshold: self.min_score,
                });
            }
        };

        let candidate = evaluation.into_candidates().swap_remove(best);
        if candidate.score < self.min_score {
            return Err(TrainerError::NoAcceptableModel {
                model: candidate.name,
                score: candidate.score,
                threshold: self.min_score,
            });
        }

        tracing::info!(
            model = candidate.name.as_str(),
            r2 = candidate.score,
            "selected best model"
        );
        Ok(Selection {
            name: candidate.name,
            model: candidate.model,
            score: candidate.score,
            report,
        })
    }
}
