use ndarray::{Array1, ArrayBase, ArrayView2, Axis, Data, Ix1, Ix2};
use serde::{Deserialize, Serialize};

use super::error::{EstimatorError, Result};
use super::hyperparams::{LinearRegressionParams, LinearRegressionValidParams};
use super::traits::{check_dataset, Fit, Predict};
use crate::datasets::DatasetBase;
use crate::helpers::helpers::solve_lin_sys;
use crate::Float;

/// The ordinary least squares estimator
///
/// Solves the normal equations of the centered problem, so that the intercept
/// is recovered from the feature and target means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression<F> {
    coefficients: Array1<F>,
    intercept: F,
}

impl<F: Float> LinearRegression<F> {
    /// This method instantiates a linear regression with default parameters.
    pub fn params() -> LinearRegressionParams<F> {
        LinearRegressionParams::new()
    }

    /// This method is a getter for the coefficients vector.
    pub fn coefficients(&self) -> &Array1<F> {
        &self.coefficients
    }

    pub fn intercept(&self) -> F {
        self.intercept
    }
}

/// This implements the least squares fit for dense design matrices.
impl<F: Float, D: Data<Elem = F>, T: Data<Elem = F>>
    Fit<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>, EstimatorError> for LinearRegressionValidParams<F>
{
    type Object = LinearRegression<F>;

    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>) -> Result<Self::Object> {
        check_dataset(dataset)?;
        let X = dataset.design_matrix();
        let y = dataset.targets();
        let n_features = X.ncols();

        let (x_mean, y_mean) = if self.fit_intercept() {
            (
                X.mean_axis(Axis(0)).ok_or(EstimatorError::EmptyDataset)?,
                y.mean().ok_or(EstimatorError::EmptyDataset)?,
            )
        } else {
            (Array1::zeros(n_features), F::zero())
        };

        let Xc = X - &x_mean;
        let yc = y - y_mean;
        let gram = Xc.t().dot(&Xc);
        let Xty = Xc.t().dot(&yc);

        let max_diag = gram.diag().fold(F::zero(), |acc, &v| acc.max(v.abs()));
        let tolerance = max_diag * F::cast(n_features) * F::epsilon() * F::cast(16.);
        let coefficients = solve_lin_sys(gram.view(), Xty.view(), tolerance);
        let intercept = y_mean - x_mean.dot(&coefficients);

        Ok(LinearRegression {
            coefficients,
            intercept,
        })
    }
}

impl<F: Float> Predict<F> for LinearRegression<F> {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_view(&self, records: ArrayView2<F>) -> Array1<F> {
        records.dot(&self.coefficients) + self.intercept
    }
}
