use ndarray::{Array1, ArrayBase, ArrayView2, Data, Ix1, Ix2};
use rand::rngs::SmallRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::error::{EstimatorError, Result};
use super::hyperparams::{
    AdaBoostParams, AdaBoostValidParams, GradientBoostingParams, GradientBoostingValidParams,
};
use super::traits::{check_dataset, Fit, Predict};
use super::tree::{grow_tree, DecisionTreeRegressor};
use crate::datasets::DatasetBase;
use crate::helpers::helpers::weighted_median;
use crate::Float;

/// The gradient boosting regressor
///
/// Least-squares boosting: starting from the mean target, each stage adds a
/// shrunk regression tree fitted to the current residuals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostingRegressor<F> {
    init: F,
    learning_rate: F,
    trees: Vec<DecisionTreeRegressor<F>>,
    n_features: usize,
}

impl<F: Float> GradientBoostingRegressor<F> {
    /// This method instantiates a gradient boosting model with default parameters.
    pub fn params() -> GradientBoostingParams<F> {
        GradientBoostingParams::new()
    }

    pub fn n_stages(&self) -> usize {
        self.trees.len()
    }
}

impl<F: Float, D: Data<Elem = F>, T: Data<Elem = F>>
    Fit<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>, EstimatorError> for GradientBoostingValidParams<F>
{
    type Object = GradientBoostingRegressor<F>;

    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>) -> Result<Self::Object> {
        check_dataset(dataset)?;
        let records = dataset.design_matrix().view();
        let targets = dataset.targets().view();
        let n_samples = dataset.n_samples();
        let mut rng = SmallRng::seed_from_u64(self.random_state());

        let init = targets.mean().ok_or(EstimatorError::EmptyDataset)?;
        let mut raw = Array1::from_elem(n_samples, init);
        let n_subsample = if self.subsample() < F::one() {
            let n: usize = (self.subsample() * F::cast(n_samples))
                .floor()
                .to_usize()
                .unwrap_or(n_samples);
            n.max(1)
        } else {
            n_samples
        };

        let mut trees = Vec::with_capacity(self.n_estimators());
        for _ in 0..self.n_estimators() {
            let residuals = &targets - &raw;
            let rows: Vec<usize> = if n_subsample < n_samples {
                let mut rows = index::sample(&mut rng, n_samples, n_subsample).into_vec();
                rows.sort_unstable();
                rows
            } else {
                (0..n_samples).collect()
            };
            let seed: u64 = rng.gen();
            let tree = grow_tree(records, residuals.view(), rows, self.tree(), seed);
            raw.scaled_add(self.learning_rate(), &tree.predict_view(records));
            trees.push(tree);
        }

        Ok(GradientBoostingRegressor {
            init,
            learning_rate: self.learning_rate(),
            trees,
            n_features: dataset.n_features(),
        })
    }
}

impl<F: Float> Predict<F> for GradientBoostingRegressor<F> {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_view(&self, records: ArrayView2<F>) -> Array1<F> {
        let mut raw = Array1::from_elem(records.nrows(), self.init);
        for tree in &self.trees {
            raw.scaled_add(self.learning_rate, &tree.predict_view(records));
        }
        raw
    }
}

/// The AdaBoost.R2 regressor
///
/// Reference: H. Drucker, "Improving Regressors using Boosting Techniques", 1997.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaBoostRegressor<F> {
    trees: Vec<DecisionTreeRegressor<F>>,
    weights: Vec<F>,
    n_features: usize,
}

impl<F: Float> AdaBoostRegressor<F> {
    /// This method instantiates an AdaBoost model with default parameters.
    pub fn params() -> AdaBoostParams<F> {
        AdaBoostParams::new()
    }

    pub fn n_stages(&self) -> usize {
        self.trees.len()
    }

    pub fn estimator_weights(&self) -> &[F] {
        &self.weights
    }
}

impl<F: Float, D: Data<Elem = F>, T: Data<Elem = F>>
    Fit<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>, EstimatorError> for AdaBoostValidParams<F>
{
    type Object = AdaBoostRegressor<F>;

    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>) -> Result<Self::Object> {
        check_dataset(dataset)?;
        let records = dataset.design_matrix().view();
        let targets = dataset.targets().view();
        let n_samples = dataset.n_samples();
        let mut rng = SmallRng::seed_from_u64(self.random_state());
        let learning_rate = self.learning_rate();

        let mut sample_weight = vec![F::one() / F::cast(n_samples); n_samples];
        let mut trees = Vec::with_capacity(self.n_estimators());
        let mut weights = Vec::with_capacity(self.n_estimators());

        for stage in 0..self.n_estimators() {
            let rows = weighted_bootstrap(&mut rng, &sample_weight);
            let seed: u64 = rng.gen();
            let tree = grow_tree(records, targets, rows, self.tree(), seed);

            let errors: Vec<F> = tree
                .predict_view(records)
                .iter()
                .zip(targets.iter())
                .map(|(&p, &y)| (p - y).abs())
                .collect();
            let error_max = errors.iter().fold(F::zero(), |acc, &e| acc.max(e));
            let losses: Vec<F> = if error_max > F::zero() {
                errors.iter().map(|&e| e / error_max).collect()
            } else {
                errors
            };
            let estimator_error: F = sample_weight
                .iter()
                .zip(losses.iter())
                .map(|(&w, &l)| w * l)
                .sum();

            if estimator_error <= F::zero() {
                // perfect fit
                trees.push(tree);
                weights.push(F::one());
                break;
            }
            if estimator_error >= F::cast(0.5) {
                // worse than chance: only the very first stage is kept
                if stage == 0 {
                    trees.push(tree);
                    weights.push(F::one());
                }
                break;
            }

            let beta = estimator_error / (F::one() - estimator_error);
            trees.push(tree);
            weights.push(learning_rate * (F::one() / beta).ln());

            if stage + 1 < self.n_estimators() {
                for (w, &l) in sample_weight.iter_mut().zip(losses.iter()) {
                    *w *= beta.powf((F::one() - l) * learning_rate);
                }
                let total: F = sample_weight.iter().copied().sum();
                if !(total > F::zero()) {
                    break;
                }
                for w in sample_weight.iter_mut() {
                    *w /= total;
                }
            }
        }

        Ok(AdaBoostRegressor {
            trees,
            weights,
            n_features: dataset.n_features(),
        })
    }
}

impl<F: Float> Predict<F> for AdaBoostRegressor<F> {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_view(&self, records: ArrayView2<F>) -> Array1<F> {
        let stage_predictions: Vec<Array1<F>> = self
            .trees
            .iter()
            .map(|tree| tree.predict_view(records))
            .collect();
        let mut column = vec![F::zero(); self.trees.len()];
        Array1::from_shape_fn(records.nrows(), |i| {
            for (slot, predictions) in column.iter_mut().zip(stage_predictions.iter()) {
                *slot = predictions[i];
            }
            weighted_median(&column, &self.weights)
        })
    }
}

/// Draws `n` row indices with probabilities proportional to `weights` by
/// inverting the cumulative distribution.
fn weighted_bootstrap<F: Float, R: Rng>(rng: &mut R, weights: &[F]) -> Vec<usize> {
    let n = weights.len();
    let mut cdf = Vec::with_capacity(n);
    let mut acc = F::zero();
    for &w in weights {
        acc += w;
        cdf.push(acc);
    }
    (0..n)
        .map(|_| {
            let u = F::cast(rng.gen::<f64>()) * acc;
            cdf.partition_point(|&c| c <= u).min(n - 1)
        })
        .collect()
}
