use ndarray::{Array1, ArrayBase, ArrayView1, ArrayView2, Data, Ix1, Ix2};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::error::{EstimatorError, Result};
use super::hyperparams::{DecisionTreeParams, DecisionTreeValidParams};
use super::traits::{check_dataset, Fit, Predict};
use crate::datasets::DatasetBase;
use crate::Float;

/// A node of a fitted regression tree. Children are indices into the node
/// arena of the owning [`DecisionTreeRegressor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNode<F> {
    Leaf {
        value: F,
        n_samples: usize,
    },
    Split {
        feature: usize,
        threshold: F,
        left: usize,
        right: usize,
    },
}

/// The decision tree regressor
///
/// Samples with `x[feature] <= threshold` go to the left child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeRegressor<F> {
    nodes: Vec<TreeNode<F>>,
    n_features: usize,
}

impl<F: Float> DecisionTreeRegressor<F> {
    /// This method instantiates a decision tree with default parameters.
    pub fn params() -> DecisionTreeParams<F> {
        DecisionTreeParams::new()
    }

    pub fn nodes(&self) -> &[TreeNode<F>] {
        &self.nodes
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, TreeNode::Leaf { .. }))
            .count()
    }

    /// Length of the longest root-to-leaf path, a lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(0usize, 0usize)];
        while let Some((idx, depth)) = stack.pop() {
            match &self.nodes[idx] {
                TreeNode::Leaf { .. } => max_depth = max_depth.max(depth),
                TreeNode::Split { left, right, .. } => {
                    stack.push((*left, depth + 1));
                    stack.push((*right, depth + 1));
                }
            }
        }
        max_depth
    }

    /// Routes a single sample down to its leaf value.
    pub fn predict_row(&self, row: ArrayView1<F>) -> F {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value, .. } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

impl<F: Float, D: Data<Elem = F>, T: Data<Elem = F>>
    Fit<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>, EstimatorError> for DecisionTreeValidParams<F>
{
    type Object = DecisionTreeRegressor<F>;

    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>) -> Result<Self::Object> {
        check_dataset(dataset)?;
        let rows: Vec<usize> = (0..dataset.n_samples()).collect();
        Ok(grow_tree(
            dataset.design_matrix().view(),
            dataset.targets().view(),
            rows,
            self,
            self.random_state(),
        ))
    }
}

impl<F: Float> Predict<F> for DecisionTreeRegressor<F> {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_view(&self, records: ArrayView2<F>) -> Array1<F> {
        records
            .rows()
            .into_iter()
            .map(|row| self.predict_row(row))
            .collect()
    }
}

/// A pending node: its arena index, the range of `rows` it owns and its depth.
struct Task {
    node: usize,
    start: usize,
    end: usize,
    depth: usize,
}

struct BestSplit<F> {
    feature: usize,
    threshold: F,
    proxy: F,
}

/// Grows a tree on the given training rows. `rows` may contain duplicates,
/// which is how bootstrap samples are passed in by the ensembles.
pub(crate) fn grow_tree<F: Float>(
    records: ArrayView2<F>,
    targets: ArrayView1<F>,
    mut rows: Vec<usize>,
    params: &DecisionTreeValidParams<F>,
    seed: u64,
) -> DecisionTreeRegressor<F> {
    let n_features = records.ncols();
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut features: Vec<usize> = (0..n_features).collect();
    let n_candidates = params
        .max_features()
        .map_or(n_features, |k| k.min(n_features));

    let mut nodes = vec![leaf_for(targets, &rows)];
    let mut stack = vec![Task {
        node: 0,
        start: 0,
        end: rows.len(),
        depth: 0,
    }];

    while let Some(task) = stack.pop() {
        let node_rows = &rows[task.start..task.end];
        let n_node = node_rows.len();
        let depth_reached = params.max_depth().map_or(false, |d| task.depth >= d);
        if depth_reached || n_node < params.min_samples_split() || is_pure(targets, node_rows) {
            continue;
        }

        features.shuffle(&mut rng);
        let split = match find_best_split(
            records,
            targets,
            node_rows,
            &features[..n_candidates],
            params.min_samples_leaf(),
        ) {
            Some(split) => split,
            None => continue,
        };

        let mid = task.start
            + partition(&mut rows[task.start..task.end], |&r| {
                records[[r, split.feature]] <= split.threshold
            });

        let left = nodes.len();
        nodes.push(leaf_for(targets, &rows[task.start..mid]));
        let right = nodes.len();
        nodes.push(leaf_for(targets, &rows[mid..task.end]));
        nodes[task.node] = TreeNode::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        stack.push(Task {
            node: right,
            start: mid,
            end: task.end,
            depth: task.depth + 1,
        });
        stack.push(Task {
            node: left,
            start: task.start,
            end: mid,
            depth: task.depth + 1,
        });
    }

    DecisionTreeRegressor { nodes, n_features }
}

fn leaf_for<F: Float>(targets: ArrayView1<F>, rows: &[usize]) -> TreeNode<F> {
    let value = if is_pure(targets, rows) {
        rows.first().map_or(F::zero(), |&r| targets[r])
    } else {
        let sum: F = rows.iter().map(|&r| targets[r]).sum();
        sum / F::cast(rows.len())
    };
    TreeNode::Leaf {
        value,
        n_samples: rows.len(),
    }
}

fn is_pure<F: Float>(targets: ArrayView1<F>, rows: &[usize]) -> bool {
    match rows.first() {
        Some(&first) => rows.iter().all(|&r| targets[r] == targets[first]),
        None => true,
    }
}

/// Scans the candidate features in order and keeps the split maximizing
/// `sum_left^2 / n_left + sum_right^2 / n_right`, which is equivalent to
/// minimizing the children's sum of squared errors. Only a strictly better
/// split replaces the current best one.
fn find_best_split<F: Float>(
    records: ArrayView2<F>,
    targets: ArrayView1<F>,
    rows: &[usize],
    features: &[usize],
    min_samples_leaf: usize,
) -> Option<BestSplit<F>> {
    let n = rows.len();
    let total: F = rows.iter().map(|&r| targets[r]).sum();
    let mut best: Option<BestSplit<F>> = None;
    let mut pairs: Vec<(F, F)> = Vec::with_capacity(n);

    for &feature in features {
        pairs.clear();
        pairs.extend(rows.iter().map(|&r| (records[[r, feature]], targets[r])));
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let mut left_sum = F::zero();
        for i in 0..n - 1 {
            left_sum += pairs[i].1;
            let n_left = i + 1;
            let n_right = n - n_left;
            if pairs[i + 1].0 <= pairs[i].0 {
                continue;
            }
            if n_left < min_samples_leaf || n_right < min_samples_leaf {
                continue;
            }
            let right_sum = total - left_sum;
            let proxy = left_sum * left_sum / F::cast(n_left)
                + right_sum * right_sum / F::cast(n_right);
            if best.as_ref().map_or(true, |b| proxy > b.proxy) {
                let (lo, hi) = (pairs[i].0, pairs[i + 1].0);
                let mut threshold = (lo + hi) / F::cast(2.);
                if threshold >= hi {
                    threshold = lo;
                }
                best = Some(BestSplit {
                    feature,
                    threshold,
                    proxy,
                });
            }
        }
    }
    best
}

/// Moves the elements satisfying `pred` to the front and returns their count.
fn partition<P: Fn(&usize) -> bool>(rows: &mut [usize], pred: P) -> usize {
    let mut boundary = 0;
    for i in 0..rows.len() {
        if pred(&rows[i]) {
            rows.swap(boundary, i);
            boundary += 1;
        }
    }
    boundary
}
