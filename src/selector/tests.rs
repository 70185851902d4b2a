use ndarray::array;

use super::*;
use crate::datasets::DatasetBase;
use crate::estimators::hyperparams::DummyStrategy;
use crate::estimators::{DummyRegressor, Fit};
use crate::evaluator::Candidate;

fn constant_model(value: f64) -> FittedModel<f64> {
    let dataset = DatasetBase::new(array![[0.], [1.]], array![0., 1.]);
    let model = DummyRegressor::params()
        .strategy(DummyStrategy::Constant(value))
        .fit(&dataset)
        .unwrap();
    FittedModel::Dummy(model)
}

fn evaluation(scores: &[(&str, f64)]) -> Evaluation<f64> {
    scores
        .iter()
        .enumerate()
        .map(|(idx, (name, score))| Candidate {
            name: name.to_string(),
            model: constant_model(idx as f64),
            score: *score,
        })
        .collect::<Vec<_>>()
        .into()
}

#[test]
fn test_selects_argmax() {
    let selection = Selector::default()
        .select(evaluation(&[("a", 0.7), ("b", 0.95), ("c", 0.8)]))
        .unwrap();
    assert_eq!(selection.name, "b");
    assert_eq!(selection.score, 0.95);
    assert_eq!(selection.model, constant_model(1.));
    assert_eq!(selection.report.len(), 3);
}

#[test]
fn test_ties_go_to_first_registered() {
    let selection = Selector::default()
        .select(evaluation(&[("a", 0.9), ("b", 0.9)]))
        .unwrap();
    assert_eq!(selection.name, "a");
    assert_eq!(selection.model, constant_model(0.));
}

#[test]
fn test_below_threshold_fails() {
    let err = Selector::default()
        .select(evaluation(&[("a", 0.59), ("b", 0.2)]))
        .unwrap_err();
    match err {
        TrainerError::NoAcceptableModel {
            model,
            score,
            threshold,
        } => {
            assert_eq!(model, "a");
            assert_eq!(score, 0.59);
            assert_eq!(threshold, DEFAULT_MIN_SCORE);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_threshold_is_inclusive() {
    let selection = Selector::default()
        .select(evaluation(&[("a", 0.60)]))
        .unwrap();
    assert_eq!(selection.name, "a");
}

#[test]
fn test_custom_threshold() {
    let selector = Selector::new(0.99);
    assert_eq!(selector.min_score(), 0.99);
    assert!(selector.select(evaluation(&[("a", 0.95)])).is_err());
}

#[test]
fn test_nan_never_wins() {
    let selection = Selector::default()
        .select(evaluation(&[("a", f64::NAN), ("b", 0.8)]))
        .unwrap();
    assert_eq!(selection.name, "b");

    let err = Selector::default()
        .select(evaluation(&[("a", f64::NAN)]))
        .unwrap_err();
    assert!(matches!(err, TrainerError::NoAcceptableModel { model, .. } if model == "a"));
}

#[test]
fn test_empty_evaluation() {
    let err = Selector::default().select(evaluation(&[])).unwrap_err();
    assert!(matches!(err, TrainerError::NoCandidates));
}
