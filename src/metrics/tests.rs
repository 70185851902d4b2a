use approx::assert_abs_diff_eq;
use ndarray::{array, Array1};
use ndarray_stats::errors::MultiInputError;

use super::*;

#[test]
fn test_r2_perfect_prediction() {
    let y = array![1., 2., 3., 4.];
    assert_eq!(r2_score(y.view(), y.view()).unwrap(), 1.);
}

#[test]
fn test_r2_mean_prediction_scores_zero() {
    let y = array![1., 2., 3., 4.];
    let pred = Array1::from_elem(4, 2.5);
    assert_abs_diff_eq!(r2_score(y.view(), pred.view()).unwrap(), 0., epsilon = 1e-12);
}

#[test]
fn test_r2_known_value() {
    let y = array![3., -0.5, 2., 7.];
    let pred = array![2.5, 0., 2., 8.];
    assert_abs_diff_eq!(
        r2_score(y.view(), pred.view()).unwrap(),
        0.948_608_137,
        epsilon = 1e-9
    );
}

#[test]
fn test_r2_can_be_negative() {
    let y = array![1., 2., 3.];
    let pred = array![3., 2., 1.];
    assert_abs_diff_eq!(r2_score(y.view(), pred.view()).unwrap(), -3., epsilon = 1e-12);
}

#[test]
fn test_r2_constant_targets() {
    let y = array![2., 2., 2.];
    assert_eq!(r2_score(y.view(), y.view()).unwrap(), 1.);
    let pred = array![2., 2., 3.];
    assert_eq!(r2_score(y.view(), pred.view()).unwrap(), 0.);
}

#[test]
fn test_r2_rejects_bad_input() {
    let empty = Array1::<f64>::zeros(0);
    assert_eq!(
        r2_score(empty.view(), empty.view()).unwrap_err(),
        MetricError::Input(MultiInputError::EmptyInput)
    );

    let y = array![1., 2., 3.];
    let pred = array![1., 2.];
    assert!(matches!(
        r2_score(y.view(), pred.view()).unwrap_err(),
        MetricError::Input(MultiInputError::ShapeMismatch(_))
    ));
}

#[test]
fn test_mse_and_mae() {
    let y = array![3., -0.5, 2., 7.];
    let pred = array![2.5, 0., 2., 8.];
    assert_abs_diff_eq!(mean_squared_error(y.view(), pred.view()).unwrap(), 0.375);
    assert_abs_diff_eq!(mean_absolute_error(y.view(), pred.view()).unwrap(), 0.5);
}
