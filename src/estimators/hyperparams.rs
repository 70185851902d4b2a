use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use super::error::{EstimatorError, Result};
use super::param_guard::ParamGuard;
use crate::Float;

/// A verified hyperparameter set ready for the fitting of an ordinary least
/// squares model
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressionValidParams<F> {
    fit_intercept: bool,
    marker: PhantomData<F>,
}

impl<F: Float> LinearRegressionValidParams<F> {
    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }
}

/// A hyper-parameter set during construction
///
/// Configures and minimizes the following objective function:
/// ```ignore
/// ||y - Xw - b||^2_2
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressionParams<F>(LinearRegressionValidParams<F>);

impl<F: Float> Default for LinearRegressionParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Configure and fit an ordinary least squares model
impl<F: Float> LinearRegressionParams<F> {
    pub fn new() -> LinearRegressionParams<F> {
        Self(LinearRegressionValidParams {
            fit_intercept: true,
            marker: PhantomData,
        })
    }

    /// Whether to estimate an intercept. When disabled the data is assumed to
    /// be centered already.
    /// Defaults to `true` if not set.
    pub fn fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.0.fit_intercept = fit_intercept;
        self
    }
}

impl<F: Float> ParamGuard for LinearRegressionParams<F> {
    type Checked = LinearRegressionValidParams<F>;

    fn check_ref(&self) -> Result<&Self::Checked> {
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified hyperparameter set ready for growing a regression tree
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTreeValidParams<F> {
    max_depth: Option<usize>,
    min_samples_split: usize,
    min_samples_leaf: usize,
    max_features: Option<usize>,
    random_state: u64,
    marker: PhantomData<F>,
}

impl<F: Float> DecisionTreeValidParams<F> {
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn min_samples_split(&self) -> usize {
        self.min_samples_split
    }

    pub fn min_samples_leaf(&self) -> usize {
        self.min_samples_leaf
    }

    pub fn max_features(&self) -> Option<usize> {
        self.max_features
    }

    pub fn random_state(&self) -> u64 {
        self.random_state
    }

    fn validate(&self) -> Result<()> {
        if self.max_depth == Some(0) {
            Err(EstimatorError::InvalidMaxDepth(0))
        } else if self.min_samples_split < 2 {
            Err(EstimatorError::InvalidMinSamplesSplit(self.min_samples_split))
        } else if self.min_samples_leaf == 0 {
            Err(EstimatorError::InvalidMinSamplesLeaf(0))
        } else if self.max_features == Some(0) {
            Err(EstimatorError::InvalidMaxFeatures(0))
        } else {
            Ok(())
        }
    }
}

/// A hyper-parameter set during construction
///
/// Greedy CART regression tree splitting on the largest reduction of the sum
/// of squared errors.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTreeParams<F>(DecisionTreeValidParams<F>);

impl<F: Float> Default for DecisionTreeParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> DecisionTreeParams<F> {
    pub fn new() -> DecisionTreeParams<F> {
        Self(DecisionTreeValidParams {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            random_state: 0,
            marker: PhantomData,
        })
    }

    /// Set the maximum depth of the tree. `None` grows until the leaves are
    /// pure or too small to split.
    /// Defaults to `None` if not set.
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.0.max_depth = max_depth;
        self
    }

    /// Set the minimum number of samples required to split a node.
    ///
    /// Defaults to `2` if not set.
    pub fn min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.0.min_samples_split = min_samples_split;
        self
    }

    /// Set the minimum number of samples in each leaf.
    ///
    /// Defaults to `1` if not set.
    pub fn min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.0.min_samples_leaf = min_samples_leaf;
        self
    }

    /// Set the number of features considered at each split. `None` considers
    /// every feature.
    /// Defaults to `None` if not set.
    pub fn max_features(mut self, max_features: Option<usize>) -> Self {
        self.0.max_features = max_features;
        self
    }

    /// Seed of the feature permutation drawn at every node.
    ///
    /// Defaults to `0` if not set.
    pub fn random_state(mut self, random_state: u64) -> Self {
        self.0.random_state = random_state;
        self
    }
}

impl<F: Float> ParamGuard for DecisionTreeParams<F> {
    type Checked = DecisionTreeValidParams<F>;

    fn check_ref(&self) -> Result<&Self::Checked> {
        self.0.validate()?;
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified hyperparameter set ready for fitting a random forest
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForestValidParams<F> {
    n_estimators: usize,
    bootstrap: bool,
    tree: DecisionTreeValidParams<F>,
}

impl<F: Float> RandomForestValidParams<F> {
    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    pub fn bootstrap(&self) -> bool {
        self.bootstrap
    }

    /// Hyperparameters shared by every tree of the forest.
    pub fn tree(&self) -> &DecisionTreeValidParams<F> {
        &self.tree
    }

    pub fn random_state(&self) -> u64 {
        self.tree.random_state
    }
}

/// A hyper-parameter set during construction
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForestParams<F>(RandomForestValidParams<F>);

impl<F: Float> Default for RandomForestParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> RandomForestParams<F> {
    pub fn new() -> RandomForestParams<F> {
        Self(RandomForestValidParams {
            n_estimators: 100,
            bootstrap: true,
            tree: DecisionTreeParams::new().0,
        })
    }

    /// Set the number of trees.
    ///
    /// Defaults to `100` if not set.
    pub fn n_estimators(mut self, n_estimators: usize) -> Self {
        self.0.n_estimators = n_estimators;
        self
    }

    /// Whether each tree sees a bootstrap sample instead of the whole
    /// training set.
    /// Defaults to `true` if not set.
    pub fn bootstrap(mut self, bootstrap: bool) -> Self {
        self.0.bootstrap = bootstrap;
        self
    }

    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.0.tree.max_depth = max_depth;
        self
    }

    pub fn min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.0.tree.min_samples_split = min_samples_split;
        self
    }

    pub fn min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.0.tree.min_samples_leaf = min_samples_leaf;
        self
    }

    pub fn max_features(mut self, max_features: Option<usize>) -> Self {
        self.0.tree.max_features = max_features;
        self
    }

    /// Seed from which the bootstrap samples and the per-tree seeds are drawn.
    ///
    /// Defaults to `0` if not set.
    pub fn random_state(mut self, random_state: u64) -> Self {
        self.0.tree.random_state = random_state;
        self
    }
}

impl<F: Float> ParamGuard for RandomForestParams<F> {
    type Checked = RandomForestValidParams<F>;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.n_estimators == 0 {
            return Err(EstimatorError::InvalidNEstimators(0));
        }
        self.0.tree.validate()?;
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified hyperparameter set ready for gradient boosting
#[derive(Debug, Clone, PartialEq)]
pub struct GradientBoostingValidParams<F> {
    n_estimators: usize,
    learning_rate: F,
    subsample: F,
    tree: DecisionTreeValidParams<F>,
}

impl<F: Float> GradientBoostingValidParams<F> {
    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    pub fn learning_rate(&self) -> F {
        self.learning_rate
    }

    pub fn subsample(&self) -> F {
        self.subsample
    }

    pub fn tree(&self) -> &DecisionTreeValidParams<F> {
        &self.tree
    }

    pub fn random_state(&self) -> u64 {
        self.tree.random_state
    }
}

/// A hyper-parameter set during construction
///
/// Least-squares gradient boosting: every stage fits a shallow tree to the
/// residuals of the current ensemble.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientBoostingParams<F>(GradientBoostingValidParams<F>);

impl<F: Float> Default for GradientBoostingParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> GradientBoostingParams<F> {
    pub fn new() -> GradientBoostingParams<F> {
        Self(GradientBoostingValidParams {
            n_estimators: 100,
            learning_rate: F::cast(0.1),
            subsample: F::one(),
            tree: DecisionTreeParams::new().max_depth(Some(3)).0,
        })
    }

    /// Set the number of boosting stages.
    ///
    /// Defaults to `100` if not set.
    pub fn n_estimators(mut self, n_estimators: usize) -> Self {
        self.0.n_estimators = n_estimators;
        self
    }

    /// Set the shrinkage applied to each stage.
    ///
    /// Defaults to `0.1` if not set.
    pub fn learning_rate(mut self, learning_rate: F) -> Self {
        self.0.learning_rate = learning_rate;
        self
    }

    /// Fraction of the training rows drawn, without replacement, for each
    /// stage. `1` disables subsampling.
    /// Defaults to `1` if not set.
    pub fn subsample(mut self, subsample: F) -> Self {
        self.0.subsample = subsample;
        self
    }

    /// Defaults to `Some(3)` if not set.
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.0.tree.max_depth = max_depth;
        self
    }

    pub fn min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.0.tree.min_samples_leaf = min_samples_leaf;
        self
    }

    pub fn random_state(mut self, random_state: u64) -> Self {
        self.0.tree.random_state = random_state;
        self
    }
}

impl<F: Float> ParamGuard for GradientBoostingParams<F> {
    type Checked = GradientBoostingValidParams<F>;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let params = &self.0;
        if params.n_estimators == 0 {
            Err(EstimatorError::InvalidNEstimators(0))
        } else if !(params.learning_rate > F::zero()) || !params.learning_rate.is_finite() {
            Err(EstimatorError::InvalidLearningRate(
                params.learning_rate.to_f32().unwrap_or(f32::NAN),
            ))
        } else if !(params.subsample > F::zero() && params.subsample <= F::one()) {
            Err(EstimatorError::InvalidSubsample(
                params.subsample.to_f32().unwrap_or(f32::NAN),
            ))
        } else {
            params.tree.validate()?;
            Ok(params)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified hyperparameter set ready for AdaBoost.R2
#[derive(Debug, Clone, PartialEq)]
pub struct AdaBoostValidParams<F> {
    n_estimators: usize,
    learning_rate: F,
    tree: DecisionTreeValidParams<F>,
}

impl<F: Float> AdaBoostValidParams<F> {
    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    pub fn learning_rate(&self) -> F {
        self.learning_rate
    }

    pub fn tree(&self) -> &DecisionTreeValidParams<F> {
        &self.tree
    }

    pub fn random_state(&self) -> u64 {
        self.tree.random_state
    }
}

/// A hyper-parameter set during construction
///
/// AdaBoost.R2 with the linear loss, boosting depth-limited regression trees
/// fitted on weighted bootstrap samples.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaBoostParams<F>(AdaBoostValidParams<F>);

impl<F: Float> Default for AdaBoostParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> AdaBoostParams<F> {
    pub fn new() -> AdaBoostParams<F> {
        Self(AdaBoostValidParams {
            n_estimators: 50,
            learning_rate: F::one(),
            tree: DecisionTreeParams::new().max_depth(Some(3)).0,
        })
    }

    /// Set the maximum number of boosting stages. Boosting may stop earlier.
    ///
    /// Defaults to `50` if not set.
    pub fn n_estimators(mut self, n_estimators: usize) -> Self {
        self.0.n_estimators = n_estimators;
        self
    }

    /// Defaults to `1` if not set.
    pub fn learning_rate(mut self, learning_rate: F) -> Self {
        self.0.learning_rate = learning_rate;
        self
    }

    /// Depth of the boosted trees.
    ///
    /// Defaults to `Some(3)` if not set.
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.0.tree.max_depth = max_depth;
        self
    }

    pub fn random_state(mut self, random_state: u64) -> Self {
        self.0.tree.random_state = random_state;
        self
    }
}

impl<F: Float> ParamGuard for AdaBoostParams<F> {
    type Checked = AdaBoostValidParams<F>;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let params = &self.0;
        if params.n_estimators == 0 {
            Err(EstimatorError::InvalidNEstimators(0))
        } else if !(params.learning_rate > F::zero()) || !params.learning_rate.is_finite() {
            Err(EstimatorError::InvalidLearningRate(
                params.learning_rate.to_f32().unwrap_or(f32::NAN),
            ))
        } else {
            params.tree.validate()?;
            Ok(params)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified hyperparameter set ready for a nearest-neighbour regressor
#[derive(Debug, Clone, PartialEq)]
pub struct KNeighborsValidParams<F> {
    n_neighbors: usize,
    marker: PhantomData<F>,
}

impl<F: Float> KNeighborsValidParams<F> {
    pub fn n_neighbors(&self) -> usize {
        self.n_neighbors
    }
}

/// A hyper-parameter set during construction
#[derive(Debug, Clone, PartialEq)]
pub struct KNeighborsParams<F>(KNeighborsValidParams<F>);

impl<F: Float> Default for KNeighborsParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> KNeighborsParams<F> {
    pub fn new() -> KNeighborsParams<F> {
        Self(KNeighborsValidParams {
            n_neighbors: 5,
            marker: PhantomData,
        })
    }

    /// Set the number of neighbours averaged for each prediction.
    ///
    /// Defaults to `5` if not set.
    pub fn n_neighbors(mut self, n_neighbors: usize) -> Self {
        self.0.n_neighbors = n_neighbors;
        self
    }
}

impl<F: Float> ParamGuard for KNeighborsParams<F> {
    type Checked = KNeighborsValidParams<F>;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.n_neighbors == 0 {
            Err(EstimatorError::InvalidNNeighbors(0))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// How a [`DummyRegressor`](crate::estimators::dummy::DummyRegressor) picks
/// its constant prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DummyStrategy<F> {
    Mean,
    Median,
    Constant(F),
}

/// A verified hyperparameter set for a constant-prediction baseline
#[derive(Debug, Clone, PartialEq)]
pub struct DummyValidParams<F> {
    strategy: DummyStrategy<F>,
}

impl<F: Float> DummyValidParams<F> {
    pub fn strategy(&self) -> DummyStrategy<F> {
        self.strategy
    }
}

/// A hyper-parameter set during construction
#[derive(Debug, Clone, PartialEq)]
pub struct DummyParams<F>(DummyValidParams<F>);

impl<F: Float> Default for DummyParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> DummyParams<F> {
    pub fn new() -> DummyParams<F> {
        Self(DummyValidParams {
            strategy: DummyStrategy::Mean,
        })
    }

    /// Defaults to [`DummyStrategy::Mean`] if not set.
    pub fn strategy(mut self, strategy: DummyStrategy<F>) -> Self {
        self.0.strategy = strategy;
        self
    }
}

impl<F: Float> ParamGuard for DummyParams<F> {
    type Checked = DummyValidParams<F>;

    fn check_ref(&self) -> Result<&Self::Checked> {
        match self.0.strategy {
            DummyStrategy::Constant(value) if !value.is_finite() => Err(
                EstimatorError::InvalidConstant(value.to_f32().unwrap_or(f32::NAN)),
            ),
            _ => Ok(&self.0),
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
