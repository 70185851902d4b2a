use ndarray::{Array1, ArrayBase, ArrayView2, Data, Ix1, Ix2};

use super::error::{EstimatorError, Result};
use crate::datasets::{DatasetBase, DesignMatrix, Targets};
use crate::Float;

/// Fit trait
///
/// The fittable trait allows an estimator to be fitted to a dataset (a combination
/// of design matrix and targets). Fitting never mutates the hyperparameters: the
/// learnt parameters live in the returned object.
pub trait Fit<DM: DesignMatrix, T: Targets, E: std::error::Error> {
    type Object;

    fn fit(&self, dataset: &DatasetBase<DM, T>) -> std::result::Result<Self::Object, E>;
}

/// Predict trait
///
/// Implemented by fitted models. `predict` checks the feature count of the
/// records before delegating to `predict_view`.
pub trait Predict<F: Float> {
    /// Number of features seen during fit.
    fn n_features(&self) -> usize;

    /// Predicts one target per row. The caller guarantees that `records` has
    /// `n_features()` columns.
    fn predict_view(&self, records: ArrayView2<F>) -> Array1<F>;

    fn predict<S: Data<Elem = F>>(&self, records: &ArrayBase<S, Ix2>) -> Result<Array1<F>> {
        if records.ncols() != self.n_features() {
            return Err(EstimatorError::FeatureMismatch {
                expected: self.n_features(),
                actual: records.ncols(),
            });
        }
        Ok(self.predict_view(records.view()))
    }
}

/// Checks that a dataset can be fitted: non-empty, aligned and finite.
pub(crate) fn check_dataset<F, D, T>(dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>) -> Result<()>
where
    F: Float,
    D: Data<Elem = F>,
    T: Data<Elem = F>,
{
    let records = dataset.design_matrix();
    let targets = dataset.targets();
    if records.nrows() != targets.len() {
        return Err(EstimatorError::LengthMismatch {
            records: records.nrows(),
            targets: targets.len(),
        });
    }
    if records.nrows() == 0 || records.ncols() == 0 {
        return Err(EstimatorError::EmptyDataset);
    }
    if !records.iter().all(|x| x.is_finite()) {
        return Err(EstimatorError::NonFinite("design matrix"));
    }
    if !targets.iter().all(|y| y.is_finite()) {
        return Err(EstimatorError::NonFinite("targets"));
    }
    Ok(())
}
