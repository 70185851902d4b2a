use ndarray::{array, Array1, Array2};

use super::hyperparams::*;
use super::tree::TreeNode;
use super::*;
use crate::datasets::{DatasetBase, DenseDataset};
use crate::helpers::test_helpers::*;

fn linear_dataset() -> DenseDataset<f64> {
    let (x, y) = generate_linear_data(60, &[2., 3.], 7);
    DatasetBase::new(x, y + 1.5)
}

#[test]
fn test_linear_regression_recovers_coefficients() {
    let dataset = linear_dataset();
    let model = LinearRegression::params().fit(&dataset).unwrap();

    assert_array_all_close(model.coefficients().view(), array![2., 3.].view(), 1e-8);
    approx::assert_abs_diff_eq!(model.intercept(), 1.5, epsilon = 1e-8);

    let predictions = model.predict(dataset.design_matrix()).unwrap();
    assert_array_all_close(predictions.view(), dataset.targets().view(), 1e-8);
}

#[test]
fn test_linear_regression_without_intercept() {
    let x = array![[1.], [2.], [3.]];
    let y = array![2., 4., 6.];
    let dataset = DatasetBase::new(x, y);
    let model = LinearRegression::params()
        .fit_intercept(false)
        .fit(&dataset)
        .unwrap();
    assert_array_all_close(model.coefficients().view(), array![2.].view(), 1e-12);
    assert_eq!(model.intercept(), 0.);
}

#[test]
fn test_linear_regression_collinear_columns() {
    // The third column duplicates the first one.
    let x = array![[1., 0., 1.], [2., 1., 2.], [3., 5., 3.], [4., 2., 4.]];
    let y = x.column(0).to_owned() * 2. + x.column(1).to_owned();
    let dataset = DatasetBase::new(x, y);
    let model = LinearRegression::params().fit(&dataset).unwrap();
    let predictions = model.predict(dataset.design_matrix()).unwrap();
    assert_array_all_close(predictions.view(), dataset.targets().view(), 1e-8);
}

#[test]
fn test_constant_feature_gets_zero_coefficient() {
    let x = array![[1., 5.], [2., 5.], [3., 5.]];
    let y = array![1., 2., 3.];
    let model = LinearRegression::params()
        .fit(&DatasetBase::new(x, y))
        .unwrap();
    assert_array_all_close(model.coefficients().view(), array![1., 0.].view(), 1e-10);
}

#[test]
fn test_predict_rejects_wrong_feature_count() {
    let model = LinearRegression::params().fit(&linear_dataset()).unwrap();
    let err = model.predict(&Array2::<f64>::zeros((2, 3))).unwrap_err();
    assert_eq!(
        err,
        EstimatorError::FeatureMismatch {
            expected: 2,
            actual: 3
        }
    );
}

#[test]
fn test_fit_rejects_non_finite_values() {
    let x = array![[1., f64::NAN], [2., 3.]];
    let y = array![1., 2.];
    let err = LinearRegression::params()
        .fit(&DatasetBase::new(x, y))
        .unwrap_err();
    assert_eq!(err, EstimatorError::NonFinite("design matrix"));
}

#[test]
fn test_fit_rejects_empty_dataset() {
    let dataset = DatasetBase::new(Array2::<f64>::zeros((0, 2)), Array1::<f64>::zeros(0));
    let err = DecisionTreeRegressor::params().fit(&dataset).unwrap_err();
    assert_eq!(err, EstimatorError::EmptyDataset);
}

#[test]
fn test_decision_tree_memorizes_training_set() {
    let (x, y) = generate_random_data(40, 3);
    let dataset = DatasetBase::new(x, y);
    let tree = DecisionTreeRegressor::params()
        .random_state(42)
        .fit(&dataset)
        .unwrap();
    let predictions = tree.predict(dataset.design_matrix()).unwrap();
    assert_eq!(&predictions, dataset.targets());
    assert_eq!(tree.n_leaves(), 40);
}

#[test]
fn test_decision_tree_step_function() {
    let x = array![[0.], [1.], [2.], [3.], [10.], [11.], [12.], [13.]];
    let y = array![1., 1., 1., 1., 5., 5., 5., 5.];
    let tree = DecisionTreeRegressor::params()
        .max_depth(Some(1))
        .fit(&DatasetBase::new(x, y))
        .unwrap();

    assert_eq!(tree.depth(), 1);
    match &tree.nodes()[0] {
        TreeNode::Split { threshold, .. } => assert_eq!(*threshold, 6.5),
        other => panic!("expected a split at the root, got {:?}", other),
    }
    let predictions = tree.predict(&array![[-4.], [6.], [7.], [100.]]).unwrap();
    assert_eq!(predictions, array![1., 1., 5., 5.]);
}

#[test]
fn test_decision_tree_respects_depth_and_leaf_size() {
    let (x, y) = generate_random_data(100, 4);
    let dataset = DatasetBase::new(x, y);
    let tree = DecisionTreeRegressor::params()
        .max_depth(Some(3))
        .min_samples_leaf(10)
        .fit(&dataset)
        .unwrap();
    assert!(tree.depth() <= 3);
    for node in tree.nodes() {
        if let TreeNode::Leaf { n_samples, .. } = node {
            assert!(*n_samples >= 10);
        }
    }
}

#[test]
fn test_decision_tree_is_deterministic() {
    let (x, y) = generate_random_data(50, 5);
    let dataset = DatasetBase::new(x, y);
    let params = DecisionTreeRegressor::params().max_features(Some(2)).random_state(3);
    let first = params.fit(&dataset).unwrap();
    let second = params.fit(&dataset).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_pure_targets_give_single_leaf() {
    let x = array![[1.], [2.], [3.]];
    let y = array![4., 4., 4.];
    let tree = DecisionTreeRegressor::params()
        .fit(&DatasetBase::new(x, y))
        .unwrap();
    assert_eq!(tree.nodes().len(), 1);
    assert_eq!(tree.depth(), 0);
}

#[test]
fn test_random_forest_fits_linear_signal() {
    let dataset = linear_dataset();
    let forest = RandomForestRegressor::params()
        .n_estimators(20)
        .random_state(42)
        .fit(&dataset)
        .unwrap();
    assert_eq!(forest.trees().len(), 20);

    let predictions = forest.predict(dataset.design_matrix()).unwrap();
    let score = crate::metrics::r2_score(dataset.targets().view(), predictions.view()).unwrap();
    assert!(score > 0.9, "score {}", score);
}

#[test]
fn test_random_forest_same_seed_same_model() {
    let dataset = linear_dataset();
    let params = RandomForestRegressor::params().n_estimators(5).random_state(42);
    assert_eq!(params.fit(&dataset).unwrap(), params.fit(&dataset).unwrap());
}

#[test]
fn test_gradient_boosting_reduces_training_error() {
    let dataset = linear_dataset();
    let weak = GradientBoostingRegressor::params()
        .n_estimators(5)
        .fit(&dataset)
        .unwrap();
    let strong = GradientBoostingRegressor::params()
        .n_estimators(100)
        .fit(&dataset)
        .unwrap();
    assert_eq!(strong.n_stages(), 100);

    let y = dataset.targets().view();
    let weak_score =
        crate::metrics::r2_score(y, weak.predict(dataset.design_matrix()).unwrap().view()).unwrap();
    let strong_score =
        crate::metrics::r2_score(y, strong.predict(dataset.design_matrix()).unwrap().view()).unwrap();
    assert!(strong_score > weak_score);
    assert!(strong_score > 0.98, "score {}", strong_score);
}

#[test]
fn test_gradient_boosting_subsample() {
    let dataset = linear_dataset();
    let model = GradientBoostingRegressor::params()
        .n_estimators(30)
        .subsample(0.5)
        .random_state(1)
        .fit(&dataset)
        .unwrap();
    let predictions = model.predict(dataset.design_matrix()).unwrap();
    let score = crate::metrics::r2_score(dataset.targets().view(), predictions.view()).unwrap();
    assert!(score > 0.8, "score {}", score);
}

#[test]
fn test_adaboost_fits_linear_signal() {
    let dataset = linear_dataset();
    let model = AdaBoostRegressor::params()
        .random_state(42)
        .fit(&dataset)
        .unwrap();
    assert!(model.n_stages() >= 1);
    assert_eq!(model.n_stages(), model.estimator_weights().len());

    let predictions = model.predict(dataset.design_matrix()).unwrap();
    let score = crate::metrics::r2_score(dataset.targets().view(), predictions.view()).unwrap();
    assert!(score > 0.8, "score {}", score);
}

#[test]
fn test_adaboost_predictions_stay_within_target_range() {
    let (x, y) = generate_random_data(40, 2);
    let dataset = DatasetBase::new(x, y);
    let params = AdaBoostRegressor::params().n_estimators(10).random_state(5);
    let model = params.fit(&dataset).unwrap();
    assert_eq!(model, params.fit(&dataset).unwrap());

    let lo = dataset.targets().fold(f64::INFINITY, |acc, &v| acc.min(v));
    let hi = dataset.targets().fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
    let predictions = model.predict(&array![[0., 0.], [3., -3.], [-10., 10.]]).unwrap();
    assert!(predictions.iter().all(|&p| p >= lo && p <= hi));
}

#[test]
fn test_k_neighbors_average() {
    let x = array![[0.], [1.], [2.], [10.]];
    let y = array![0., 1., 2., 10.];
    let model = KNeighborsRegressor::params()
        .n_neighbors(2)
        .fit(&DatasetBase::new(x, y))
        .unwrap();
    let predictions = model.predict(&array![[0.4], [9.]]).unwrap();
    assert_array_all_close(predictions.view(), array![0.5, 6.].view(), 1e-12);
}

#[test]
fn test_k_neighbors_ties_prefer_earlier_rows() {
    let x = array![[-1.], [1.], [3.]];
    let y = array![10., 20., 30.];
    let model = KNeighborsRegressor::params()
        .n_neighbors(1)
        .fit(&DatasetBase::new(x, y))
        .unwrap();
    assert_eq!(model.predict(&array![[0.]]).unwrap(), array![10.]);
}

#[test]
fn test_k_neighbors_needs_enough_samples() {
    let x = array![[0.], [1.]];
    let y = array![0., 1.];
    let err = KNeighborsRegressor::params()
        .fit(&DatasetBase::new(x, y))
        .unwrap_err();
    assert_eq!(
        err,
        EstimatorError::NotEnoughSamples {
            n_neighbors: 5,
            n_samples: 2
        }
    );
}

#[test]
fn test_dummy_strategies() {
    let x = array![[0.], [1.], [2.], [3.]];
    let y = array![1., 2., 3., 10.];
    let dataset = DatasetBase::new(x, y);

    let mean = DummyRegressor::params().fit(&dataset).unwrap();
    assert_eq!(mean.constant(), 4.);
    let median = DummyRegressor::params()
        .strategy(DummyStrategy::Median)
        .fit(&dataset)
        .unwrap();
    assert_eq!(median.constant(), 2.5);
    let constant = DummyRegressor::params()
        .strategy(DummyStrategy::Constant(-1.))
        .fit(&dataset)
        .unwrap();
    assert_eq!(constant.predict(&array![[5.], [6.]]).unwrap(), array![-1., -1.]);
}

macro_rules! invalid_params_tests {
    ($($name:ident: $params:expr => $err:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let spec: ModelSpec<f64> = $params.into();
                assert_eq!(spec.validate().unwrap_err(), $err);
            }
        )*
    };
}

invalid_params_tests! {
    test_invalid_min_samples_split: DecisionTreeParams::new().min_samples_split(1)
        => EstimatorError::InvalidMinSamplesSplit(1),
    test_invalid_max_depth: DecisionTreeParams::new().max_depth(Some(0))
        => EstimatorError::InvalidMaxDepth(0),
    test_invalid_forest_size: RandomForestParams::new().n_estimators(0)
        => EstimatorError::InvalidNEstimators(0),
    test_invalid_forest_leaf: RandomForestParams::new().min_samples_leaf(0)
        => EstimatorError::InvalidMinSamplesLeaf(0),
    test_invalid_learning_rate: GradientBoostingParams::<f64>::new().learning_rate(0.)
        => EstimatorError::InvalidLearningRate(0.),
    test_invalid_subsample: GradientBoostingParams::<f64>::new().subsample(1.5)
        => EstimatorError::InvalidSubsample(1.5),
    test_invalid_adaboost_stages: AdaBoostParams::<f64>::new().n_estimators(0)
        => EstimatorError::InvalidNEstimators(0),
    test_invalid_neighbors: KNeighborsParams::new().n_neighbors(0)
        => EstimatorError::InvalidNNeighbors(0),
    test_invalid_constant: DummyParams::new().strategy(DummyStrategy::Constant(f64::INFINITY))
        => EstimatorError::InvalidConstant(f32::INFINITY),
}

#[test]
fn test_model_spec_fit_and_kind() {
    let dataset = linear_dataset();
    let spec: ModelSpec<f64> = LinearRegressionParams::new().into();
    assert_eq!(spec.kind(), "linear_regression");

    let fitted = spec.fit(&dataset).unwrap();
    assert_eq!(fitted.kind(), "linear_regression");
    assert_eq!(fitted.n_features(), 2);
    let predictions = fitted.predict(dataset.design_matrix()).unwrap();
    assert_array_all_close(predictions.view(), dataset.targets().view(), 1e-8);
}

#[test]
fn test_model_spec_surfaces_param_errors_on_fit() {
    let spec: ModelSpec<f64> = KNeighborsParams::new().n_neighbors(0).into();
    assert_eq!(
        spec.fit(&linear_dataset()).unwrap_err(),
        EstimatorError::InvalidNNeighbors(0)
    );
}

#[test]
fn test_param_guard_is_valid() {
    assert!(KNeighborsParams::<f64>::new().is_valid());
    assert!(!KNeighborsParams::<f64>::new().n_neighbors(0).is_valid());
    assert!(!RandomForestParams::<f64>::new().max_features(Some(0)).is_valid());
}
