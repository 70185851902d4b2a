use ndarray::{Array1, ArrayBase, ArrayView2, Data, Ix1, Ix2};
use serde::{Deserialize, Serialize};

use super::boosting::{AdaBoostRegressor, GradientBoostingRegressor};
use super::dummy::DummyRegressor;
use super::error::{EstimatorError, Result};
use super::forest::RandomForestRegressor;
use super::hyperparams::{
    AdaBoostParams, DecisionTreeParams, DummyParams, GradientBoostingParams, KNeighborsParams,
    LinearRegressionParams, RandomForestParams,
};
use super::linear::LinearRegression;
use super::neighbors::KNeighborsRegressor;
use super::param_guard::ParamGuard;
use super::traits::{Fit, Predict};
use super::tree::DecisionTreeRegressor;
use crate::datasets::DatasetBase;
use crate::Float;

/// An untrained estimator of any supported family, as stored in a
/// [`ModelRegistry`](crate::registry::ModelRegistry).
#[derive(Debug, Clone, PartialEq)]
pub enum ModelSpec<F> {
    Linear(LinearRegressionParams<F>),
    DecisionTree(DecisionTreeParams<F>),
    RandomForest(RandomForestParams<F>),
    GradientBoosting(GradientBoostingParams<F>),
    AdaBoost(AdaBoostParams<F>),
    KNeighbors(KNeighborsParams<F>),
    Dummy(DummyParams<F>),
}

/// A fitted estimator of any supported family. This is the object written to
/// the model artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FittedModel<F> {
    Linear(LinearRegression<F>),
    DecisionTree(DecisionTreeRegressor<F>),
    RandomForest(RandomForestRegressor<F>),
    GradientBoosting(GradientBoostingRegressor<F>),
    AdaBoost(AdaBoostRegressor<F>),
    KNeighbors(KNeighborsRegressor<F>),
    Dummy(DummyRegressor<F>),
}

impl<F: Float> ModelSpec<F> {
    /// Short identifier of the estimator family.
    pub fn kind(&self) -> &'static str {
        match self {
            ModelSpec::Linear(_) => "linear_regression",
            ModelSpec::DecisionTree(_) => "decision_tree",
            ModelSpec::RandomForest(_) => "random_forest",
            ModelSpec::GradientBoosting(_) => "gradient_boosting",
            ModelSpec::AdaBoost(_) => "adaboost",
            ModelSpec::KNeighbors(_) => "k_neighbors",
            ModelSpec::Dummy(_) => "dummy",
        }
    }

    /// Validates the hyperparameters without fitting anything.
    pub fn validate(&self) -> Result<()> {
        match self {
            ModelSpec::Linear(params) => params.check_ref().map(|_| ()),
            ModelSpec::DecisionTree(params) => params.check_ref().map(|_| ()),
            ModelSpec::RandomForest(params) => params.check_ref().map(|_| ()),
            ModelSpec::GradientBoosting(params) => params.check_ref().map(|_| ()),
            ModelSpec::AdaBoost(params) => params.check_ref().map(|_| ()),
            ModelSpec::KNeighbors(params) => params.check_ref().map(|_| ()),
            ModelSpec::Dummy(params) => params.check_ref().map(|_| ()),
        }
    }
}

impl<F: Float, D: Data<Elem = F>, T: Data<Elem = F>>
    Fit<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>, EstimatorError> for ModelSpec<F>
{
    type Object = FittedModel<F>;

    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>) -> Result<Self::Object> {
        let model = match self {
            ModelSpec::Linear(params) => FittedModel::Linear(params.check_ref()?.fit(dataset)?),
            ModelSpec::DecisionTree(params) => {
                FittedModel::DecisionTree(params.check_ref()?.fit(dataset)?)
            }
            ModelSpec::RandomForest(params) => {
                FittedModel::RandomForest(params.check_ref()?.fit(dataset)?)
            }
            ModelSpec::GradientBoosting(params) => {
                FittedModel::GradientBoosting(params.check_ref()?.fit(dataset)?)
            }
            ModelSpec::AdaBoost(params) => FittedModel::AdaBoost(params.check_ref()?.fit(dataset)?),
            ModelSpec::KNeighbors(params) => {
                FittedModel::KNeighbors(params.check_ref()?.fit(dataset)?)
            }
            ModelSpec::Dummy(params) => FittedModel::Dummy(params.check_ref()?.fit(dataset)?),
        };
        Ok(model)
    }
}

impl<F: Float> FittedModel<F> {
    /// Short identifier of the estimator family, matching [`ModelSpec::kind`].
    pub fn kind(&self) -> &'static str {
        match self {
            FittedModel::Linear(_) => "linear_regression",
            FittedModel::DecisionTree(_) => "decision_tree",
            FittedModel::RandomForest(_) => "random_forest",
            FittedModel::GradientBoosting(_) => "gradient_boosting",
            FittedModel::AdaBoost(_) => "adaboost",
            FittedModel::KNeighbors(_) => "k_neighbors",
            FittedModel::Dummy(_) => "dummy",
        }
    }
}

impl<F: Float> Predict<F> for FittedModel<F> {
    fn n_features(&self) -> usize {
        match self {
            FittedModel::Linear(model) => model.n_features(),
            FittedModel::DecisionTree(model) => model.n_features(),
            FittedModel::RandomForest(model) => model.n_features(),
            FittedModel::GradientBoosting(model) => model.n_features(),
            FittedModel::AdaBoost(model) => model.n_features(),
            FittedModel::KNeighbors(model) => model.n_features(),
            FittedModel::Dummy(model) => model.n_features(),
        }
    }

    fn predict_view(&self, records: ArrayView2<F>) -> Array1<F> {
        match self {
            FittedModel::Linear(model) => model.predict_view(records),
            FittedModel::DecisionTree(model) => model.predict_view(records),
            FittedModel::RandomForest(model) => model.predict_view(records),
            FittedModel::GradientBoosting(model) => model.predict_view(records),
            FittedModel::AdaBoost(model) => model.predict_view(records),
            FittedModel::KNeighbors(model) => model.predict_view(records),
            FittedModel::Dummy(model) => model.predict_view(records),
        }
    }
}

macro_rules! impl_from_params {
    ($($params:ty => $variant:ident,)*) => {
        $(
            impl<F: Float> From<$params> for ModelSpec<F> {
                fn from(params: $params) -> Self {
                    ModelSpec::$variant(params)
                }
            }
        )*
    };
}

impl_from_params! {
    LinearRegressionParams<F> => Linear,
    DecisionTreeParams<F> => DecisionTree,
    RandomForestParams<F> => RandomForest,
    GradientBoostingParams<F> => GradientBoosting,
    AdaBoostParams<F> => AdaBoost,
    KNeighborsParams<F> => KNeighbors,
    DummyParams<F> => Dummy,
}
