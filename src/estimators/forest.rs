use ndarray::{Array1, ArrayBase, ArrayView2, Data, Ix1, Ix2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::error::{EstimatorError, Result};
use super::hyperparams::{RandomForestParams, RandomForestValidParams};
use super::traits::{check_dataset, Fit, Predict};
use super::tree::{grow_tree, DecisionTreeRegressor};
use crate::datasets::DatasetBase;
use crate::Float;

/// The random forest regressor
///
/// Averages regression trees grown on bootstrap samples of the training set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor<F> {
    trees: Vec<DecisionTreeRegressor<F>>,
    n_features: usize,
}

impl<F: Float> RandomForestRegressor<F> {
    /// This method instantiates a random forest with default parameters.
    pub fn params() -> RandomForestParams<F> {
        RandomForestParams::new()
    }

    pub fn trees(&self) -> &[DecisionTreeRegressor<F>] {
        &self.trees
    }
}

impl<F: Float, D: Data<Elem = F>, T: Data<Elem = F>>
    Fit<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>, EstimatorError> for RandomForestValidParams<F>
{
    type Object = RandomForestRegressor<F>;

    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>) -> Result<Self::Object> {
        check_dataset(dataset)?;
        let records = dataset.design_matrix().view();
        let targets = dataset.targets().view();
        let n_samples = dataset.n_samples();
        let mut rng = SmallRng::seed_from_u64(self.random_state());

        let trees = (0..self.n_estimators())
            .map(|_| {
                let seed: u64 = rng.gen();
                let rows: Vec<usize> = if self.bootstrap() {
                    (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
                } else {
                    (0..n_samples).collect()
                };
                grow_tree(records, targets, rows, self.tree(), seed)
            })
            .collect();

        Ok(RandomForestRegressor {
            trees,
            n_features: dataset.n_features(),
        })
    }
}

impl<F: Float> Predict<F> for RandomForestRegressor<F> {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_view(&self, records: ArrayView2<F>) -> Array1<F> {
        let mut sum = Array1::<F>::zeros(records.nrows());
        for tree in &self.trees {
            sum += &tree.predict_view(records);
        }
        sum / F::cast(self.trees.len())
    }
}
