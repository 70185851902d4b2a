use ndarray::{Array1, ArrayBase, ArrayView2, Data, Ix1, Ix2};
use serde::{Deserialize, Serialize};

use super::error::{EstimatorError, Result};
use super::hyperparams::{DummyParams, DummyStrategy, DummyValidParams};
use super::traits::{check_dataset, Fit, Predict};
use crate::datasets::DatasetBase;
use crate::helpers::helpers::median;
use crate::Float;

/// Constant-prediction baseline
///
/// Ignores the features entirely. Any useful model should beat it, and it
/// scores an R² of exactly zero on its own training set with the mean strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DummyRegressor<F> {
    constant: F,
    n_features: usize,
}

impl<F: Float> DummyRegressor<F> {
    pub fn params() -> DummyParams<F> {
        DummyParams::new()
    }

    pub fn constant(&self) -> F {
        self.constant
    }
}

impl<F: Float, D: Data<Elem = F>, T: Data<Elem = F>>
    Fit<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>, EstimatorError> for DummyValidParams<F>
{
    type Object = DummyRegressor<F>;

    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>) -> Result<Self::Object> {
        check_dataset(dataset)?;
        let targets = dataset.targets();
        let constant = match self.strategy() {
            DummyStrategy::Mean => targets.mean().ok_or(EstimatorError::EmptyDataset)?,
            DummyStrategy::Median => median(targets.view()),
            DummyStrategy::Constant(value) => value,
        };
        Ok(DummyRegressor {
            constant,
            n_features: dataset.n_features(),
        })
    }
}

impl<F: Float> Predict<F> for DummyRegressor<F> {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_view(&self, records: ArrayView2<F>) -> Array1<F> {
        Array1::from_elem(records.nrows(), self.constant)
    }
}
