//! Regression metrics computed on held-out predictions.

use ndarray::{Array1, ArrayView1};
use ndarray_stats::errors::MultiInputError;
use ndarray_stats::DeviationExt;
use num_traits::Signed;
use thiserror::Error;

use crate::Float;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    #[error(transparent)]
    Input(#[from] MultiInputError),
}

/// Coefficient of determination `1 - SS_res / SS_tot`.
///
/// A constant `y_true` has `SS_tot = 0`, in which case a perfect prediction
/// scores 1 and anything else scores 0.
pub fn r2_score<F: Float + Signed>(
    y_true: ArrayView1<F>,
    y_pred: ArrayView1<F>,
) -> Result<F, MetricError> {
    let ss_res = y_true.sq_l2_dist(&y_pred)?;
    let mean = y_true.mean().ok_or(MultiInputError::EmptyInput)?;
    let ss_tot = y_true.sq_l2_dist(&Array1::from_elem(y_true.len(), mean))?;

    if ss_tot == F::zero() {
        return Ok(if ss_res == F::zero() {
            F::one()
        } else {
            F::zero()
        });
    }
    Ok(F::one() - ss_res / ss_tot)
}

pub fn mean_squared_error<F: Float + Signed>(
    y_true: ArrayView1<F>,
    y_pred: ArrayView1<F>,
) -> Result<f64, MetricError> {
    Ok(y_true.mean_sq_err(&y_pred)?)
}

pub fn mean_absolute_error<F: Float + Signed>(
    y_true: ArrayView1<F>,
    y_pred: ArrayView1<F>,
) -> Result<f64, MetricError> {
    Ok(y_true.mean_abs_err(&y_pred)?)
}
