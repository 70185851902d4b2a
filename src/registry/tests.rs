use super::*;
use crate::estimators::hyperparams::DummyParams;

#[test]
fn test_default_registry_order() {
    let registry = ModelRegistry::<f64>::default_regressors(42);
    assert_eq!(registry.len(), 6);
    assert_eq!(registry.names().collect::<Vec<_>>(), DEFAULT_MODEL_NAMES);
    assert_eq!(registry.get(LINEAR_REGRESSION).unwrap().kind(), "linear_regression");
    assert_eq!(registry.get(KNN_REGRESSOR).unwrap().kind(), "k_neighbors");
    assert!(registry.get("XGBRegressor").is_none());
}

#[test]
fn test_default_registry_is_seeded() {
    let registry = ModelRegistry::<f64>::default_regressors(7);
    let expected: ModelSpec<f64> = RandomForestParams::new().random_state(7).into();
    assert_eq!(registry.get(RANDOM_FOREST), Some(&expected));
    assert_ne!(registry, ModelRegistry::default_regressors(8));
}

#[test]
fn test_register_rejects_duplicates() {
    let mut registry = ModelRegistry::<f64>::new();
    assert!(registry.is_empty());
    registry
        .register("baseline", DummyParams::new().into())
        .unwrap();
    let err = registry
        .register("baseline", LinearRegressionParams::new().into())
        .unwrap_err();
    assert!(matches!(err, TrainerError::DuplicateModel(name) if name == "baseline"));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("baseline").unwrap().kind(), "dummy");
}

#[test]
fn test_with_model_keeps_insertion_order() {
    let registry = ModelRegistry::<f64>::new()
        .with_model("b", LinearRegressionParams::new())
        .unwrap()
        .with_model("a", DummyParams::new())
        .unwrap();
    let names: Vec<_> = registry.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["b", "a"]);
}

#[test]
fn test_from_names() {
    let registry =
        ModelRegistry::<f64>::from_names(&[LINEAR_REGRESSION, DECISION_TREE], 42).unwrap();
    assert_eq!(
        registry.names().collect::<Vec<_>>(),
        [LINEAR_REGRESSION, DECISION_TREE]
    );

    let err = ModelRegistry::<f64>::from_names(&["CatBoosting Regressor"], 42).unwrap_err();
    assert!(matches!(err, TrainerError::UnknownModel(_)));

    let err =
        ModelRegistry::<f64>::from_names(&[DECISION_TREE, DECISION_TREE], 42).unwrap_err();
    assert!(matches!(err, TrainerError::DuplicateModel(_)));
}
