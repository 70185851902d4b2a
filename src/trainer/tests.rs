use ndarray::{array, Array2};
use tempfile::tempdir;

use super::*;
use crate::datasets::DatasetError;
use crate::estimators::hyperparams::{DummyParams, LinearRegressionParams};
use crate::helpers::test_helpers::{generate_linear_data, stack_target};
use crate::persist::load_artifact;

fn config_in(dir: &std::path::Path) -> TrainerConfig {
    TrainerConfig {
        artifact_path: dir.join("artifacts").join("model.bin"),
        ..TrainerConfig::default()
    }
}

fn matrices() -> (Array2<f64>, Array2<f64>) {
    let (x, y) = generate_linear_data(60, &[2., 3.], 11);
    let train = stack_target(x.view(), y.view());
    let (x, y) = generate_linear_data(20, &[2., 3.], 12);
    let test = stack_target(x.view(), y.view());
    (train, test)
}

#[test]
fn test_subset_of_default_models() {
    let dir = tempdir().unwrap();
    let config = TrainerConfig {
        models: Some(vec![
            "Decision Tree".to_string(),
            "Linear Regression".to_string(),
        ]),
        ..config_in(dir.path())
    };
    let (train, test) = matrices();
    let outcome = ModelTrainer::new(config)
        .initiate_model_trainer(&train, &test)
        .unwrap();

    assert_eq!(outcome.model_name, "Linear Regression");
    assert!(outcome.score > 0.999);
    assert_eq!(
        outcome.report.names().collect::<Vec<_>>(),
        ["Decision Tree", "Linear Regression"]
    );
    let artifact = load_artifact(&outcome.artifact_path).unwrap();
    assert_eq!(artifact.metadata.model_name, "Linear Regression");
    assert_eq!(artifact.metadata.score, outcome.score);
    assert_eq!(artifact.metadata.n_features, 2);
}

#[test]
fn test_no_acceptable_model_writes_nothing() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());
    let registry = ModelRegistry::new()
        .with_model("Baseline", DummyParams::new())
        .unwrap();
    let (train, test) = matrices();

    let err = ModelTrainer::with_registry(config.clone(), registry)
        .initiate_model_trainer(&train, &test)
        .unwrap_err();
    assert!(matches!(err, TrainerError::NoAcceptableModel { ref model, .. } if model == "Baseline"));
    assert!(!config.artifact_path.exists());
}

#[test]
fn test_dataset_errors_come_first() {
    let dir = tempdir().unwrap();
    let trainer = ModelTrainer::new(config_in(dir.path()));

    let err = trainer
        .initiate_model_trainer(&array![[1., 2., 3.]], &array![[1., 2.]])
        .unwrap_err();
    assert!(matches!(
        err,
        TrainerError::Dataset(DatasetError::ColumnMismatch { train: 3, test: 2 })
    ));

    let err = trainer
        .initiate_model_trainer(&array![[1.], [2.]], &array![[1.], [2.]])
        .unwrap_err();
    assert!(matches!(
        err,
        TrainerError::Dataset(DatasetError::TooFewColumns { .. })
    ));
}

#[test]
fn test_unknown_model_name() {
    let dir = tempdir().unwrap();
    let config = TrainerConfig {
        models: Some(vec!["XGBRegressor".to_string()]),
        ..config_in(dir.path())
    };
    let (train, test) = matrices();
    let err = ModelTrainer::new(config)
        .initiate_model_trainer(&train, &test)
        .unwrap_err();
    assert!(matches!(err, TrainerError::UnknownModel(name) if name == "XGBRegressor"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = TrainerConfig {
        min_score: f64::INFINITY,
        ..TrainerConfig::default()
    };
    let (train, test) = matrices();
    let err = ModelTrainer::new(config)
        .initiate_model_trainer(&train, &test)
        .unwrap_err();
    assert!(matches!(err, TrainerError::Config(_)));
}

#[test]
fn test_persist_error_names_the_path() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let config = TrainerConfig {
        artifact_path: blocker.join("model.bin"),
        ..TrainerConfig::default()
    };
    let registry = ModelRegistry::new()
        .with_model("Linear Regression", LinearRegressionParams::new())
        .unwrap();
    let (train, test) = matrices();

    let err = ModelTrainer::with_registry(config, registry)
        .initiate_model_trainer(&train, &test)
        .unwrap_err();
    match err {
        TrainerError::Persist { path, .. } => assert_eq!(path, blocker.join("model.bin")),
        other => panic!("unexpected error {:?}", other),
    }
}
