use ndarray::{Array1, Array2, ArrayBase, ArrayView2, Data, Ix1, Ix2};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::error::{EstimatorError, Result};
use super::hyperparams::{KNeighborsParams, KNeighborsValidParams};
use super::traits::{check_dataset, Fit, Predict};
use crate::datasets::DatasetBase;
use crate::helpers::helpers::argsort_by;
use crate::Float;

/// The k-nearest neighbours regressor
///
/// Keeps a copy of the training set and predicts the mean target of the `k`
/// closest rows in Euclidean distance. Distance ties go to the earlier row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KNeighborsRegressor<F> {
    n_neighbors: usize,
    records: Array2<F>,
    targets: Array1<F>,
}

impl<F: Float> KNeighborsRegressor<F> {
    /// This method instantiates a nearest neighbours model with default parameters.
    pub fn params() -> KNeighborsParams<F> {
        KNeighborsParams::new()
    }

    pub fn n_neighbors(&self) -> usize {
        self.n_neighbors
    }
}

impl<F: Float, D: Data<Elem = F>, T: Data<Elem = F>>
    Fit<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>, EstimatorError> for KNeighborsValidParams<F>
{
    type Object = KNeighborsRegressor<F>;

    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>) -> Result<Self::Object> {
        check_dataset(dataset)?;
        if dataset.n_samples() < self.n_neighbors() {
            return Err(EstimatorError::NotEnoughSamples {
                n_neighbors: self.n_neighbors(),
                n_samples: dataset.n_samples(),
            });
        }
        Ok(KNeighborsRegressor {
            n_neighbors: self.n_neighbors(),
            records: dataset.design_matrix().to_owned(),
            targets: dataset.targets().to_owned(),
        })
    }
}

impl<F: Float> Predict<F> for KNeighborsRegressor<F> {
    fn n_features(&self) -> usize {
        self.records.ncols()
    }

    fn predict_view(&self, records: ArrayView2<F>) -> Array1<F> {
        let k = F::cast(self.n_neighbors);
        records
            .rows()
            .into_iter()
            .map(|query| {
                let distances: Array1<F> = self
                    .records
                    .rows()
                    .into_iter()
                    .map(|row| {
                        row.iter()
                            .zip(query.iter())
                            .map(|(&a, &b)| (a - b) * (a - b))
                            .sum::<F>()
                    })
                    .collect();
                let order = argsort_by(&distances, |a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
                let sum: F = order
                    .iter()
                    .take(self.n_neighbors)
                    .map(|&idx| self.targets[idx])
                    .sum();
                sum / k
            })
            .collect()
    }
}
