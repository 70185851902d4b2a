//! Named, insertion-ordered collection of untrained estimators.

use indexmap::IndexMap;

use crate::error::{Result, TrainerError};
use crate::estimators::hyperparams::{
    AdaBoostParams, DecisionTreeParams, GradientBoostingParams, KNeighborsParams,
    LinearRegressionParams, RandomForestParams,
};
use crate::estimators::ModelSpec;
use crate::Float;

#[cfg(test)]
mod tests;

pub const RANDOM_FOREST: &str = "Random Forest";
pub const DECISION_TREE: &str = "Decision Tree";
pub const GRADIENT_BOOSTING: &str = "Gradient Boosting";
pub const LINEAR_REGRESSION: &str = "Linear Regression";
pub const KNN_REGRESSOR: &str = "KNN Regressor";
pub const ADABOOST_REGRESSOR: &str = "AdaBoost Regressor";

/// Names of the default families, in the order they are trained.
pub const DEFAULT_MODEL_NAMES: [&str; 6] = [
    RANDOM_FOREST,
    DECISION_TREE,
    GRADIENT_BOOSTING,
    LINEAR_REGRESSION,
    KNN_REGRESSOR,
    ADABOOST_REGRESSOR,
];

/// Maps a human-readable name to an untrained [`ModelSpec`].
///
/// Iteration follows insertion order, which is also the tie-break order used
/// by the [`Selector`](crate::selector::Selector).
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRegistry<F> {
    models: IndexMap<String, ModelSpec<F>>,
}

impl<F: Float> Default for ModelRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> ModelRegistry<F> {
    pub fn new() -> Self {
        ModelRegistry {
            models: IndexMap::new(),
        }
    }

    /// Every default family, each seeded estimator using `random_state`.
    pub fn default_regressors(random_state: u64) -> Self {
        let mut registry = Self::new();
        for name in DEFAULT_MODEL_NAMES {
            if let Some(spec) = default_spec(name, random_state) {
                registry.models.insert(name.to_string(), spec);
            }
        }
        registry
    }

    /// A registry restricted to the given default families, in the given
    /// order.
    pub fn from_names<S: AsRef<str>>(names: &[S], random_state: u64) -> Result<Self> {
        let mut registry = Self::new();
        for name in names {
            let name = name.as_ref();
            let spec = default_spec(name, random_state)
                .ok_or_else(|| TrainerError::UnknownModel(name.to_string()))?;
            registry.register(name, spec)?;
        }
        Ok(registry)
    }

    /// Adds a model under a new name. Names are unique keys.
    pub fn register<S: Into<String>>(&mut self, name: S, spec: ModelSpec<F>) -> Result<()> {
        let name = name.into();
        if self.models.contains_key(&name) {
            return Err(TrainerError::DuplicateModel(name));
        }
        self.models.insert(name, spec);
        Ok(())
    }

    pub fn with_model<S: Into<String>, M: Into<ModelSpec<F>>>(
        mut self,
        name: S,
        spec: M,
    ) -> Result<Self> {
        self.register(name, spec.into())?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&ModelSpec<F>> {
        self.models.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelSpec<F>)> {
        self.models.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

fn default_spec<F: Float>(name: &str, random_state: u64) -> Option<ModelSpec<F>> {
    let spec: ModelSpec<F> = match name {
        RANDOM_FOREST => RandomForestParams::new().random_state(random_state).into(),
        DECISION_TREE => DecisionTreeParams::new().random_state(random_state).into(),
        GRADIENT_BOOSTING => GradientBoostingParams::new()
            .random_state(random_state)
            .into(),
        LINEAR_REGRESSION => LinearRegressionParams::new().into(),
        KNN_REGRESSOR => KNeighborsParams::new().into(),
        ADABOOST_REGRESSOR => AdaBoostParams::new().random_state(random_state).into(),
        _ => return None,
    };
    Some(spec)
}
