use super::error::EstimatorError;
use super::traits::Fit;
use crate::datasets::{DatasetBase, DesignMatrix, Targets};

/// Unchecked estimator hyperparameters.
///
/// Builders such as [`DecisionTreeParams`](super::hyperparams::DecisionTreeParams)
/// accept any value; the checked set is only handed out once every value is
/// in range. Fitting the unchecked builder runs the check first, so an
/// out-of-range value surfaces as an [`EstimatorError`] from `fit`.
pub trait ParamGuard {
    /// The hyperparameter set an estimator is actually fitted with
    type Checked;

    /// Validates in place and borrows the checked set.
    fn check_ref(&self) -> Result<&Self::Checked, EstimatorError>;

    /// Validates and converts into the checked set. Must accept exactly the
    /// values `check_ref` accepts.
    fn check(self) -> Result<Self::Checked, EstimatorError>;

    /// Validation only, for callers that never fit (registries, config).
    fn is_valid(&self) -> bool {
        self.check_ref().is_ok()
    }
}

impl<DM: DesignMatrix, T: Targets, P: ParamGuard> Fit<DM, T, EstimatorError> for P
where
    P::Checked: Fit<DM, T, EstimatorError>,
{
    type Object = <P::Checked as Fit<DM, T, EstimatorError>>::Object;

    fn fit(&self, dataset: &DatasetBase<DM, T>) -> Result<Self::Object, EstimatorError> {
        self.check_ref()?.fit(dataset)
    }
}
