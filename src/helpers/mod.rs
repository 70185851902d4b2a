#[cfg(test)]
mod tests;

/// This module contains the numerical building blocks shared by the
/// estimators.
pub mod helpers {
    use crate::Float;
    use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Data, Ix1};
    use std::cmp::Ordering;

    /// This is a helper method that sorts the indices of an array based on some
    /// `compare` closure. The sort is stable so that equal elements keep their
    /// original order, which the nearest-neighbour search relies upon to break
    /// distance ties by training row.
    /// Reference: `https://github.com/rust-ndarray/ndarray/issues/1145`
    pub fn argsort_by<S, F>(arr: &ArrayBase<S, Ix1>, mut compare: F) -> Vec<usize>
    where
        S: Data,
        F: FnMut(&S::Elem, &S::Elem) -> Ordering,
    {
        let mut indices: Vec<usize> = (0..arr.len()).collect();
        indices.sort_by(move |&i, &j| compare(&arr[i], &arr[j]));
        indices
    }

    /// This function solves the symmetric positive semi-definite system `A x = b`
    /// using Gauss-Jordan elimination with partial pivoting. Columns whose pivot
    /// falls below `tolerance` are linearly dependent on earlier ones: they are
    /// skipped and their coordinate is set to zero, which yields a basic
    /// least-squares solution for rank-deficient normal equations.
    pub fn solve_lin_sys<F: Float>(A: ArrayView2<F>, b: ArrayView1<F>, tolerance: F) -> Array1<F> {
        // Concatenation
        let size = b.len();
        let mut system = Array2::<F>::zeros((size, size + 1));
        for i in 0..size {
            for j in 0..(size + 1) {
                system[[i, j]] = if j == size { b[i] } else { A[[i, j]] };
            }
        }

        let mut pivots: Vec<(usize, usize)> = Vec::with_capacity(size);
        let mut row = 0;
        for col in 0..size {
            if row == size {
                break;
            }
            let (best_row, best_val) = (row..size)
                .map(|r| (r, system[[r, col]].abs()))
                .fold((row, F::zero()), |acc, cur| if cur.1 > acc.1 { cur } else { acc });
            if best_val <= tolerance {
                continue;
            }
            if best_row != row {
                for k in 0..(size + 1) {
                    system.swap([row, k], [best_row, k]);
                }
            }

            let pivot = system[[row, col]];
            for k in 0..(size + 1) {
                system[[row, k]] /= pivot;
            }
            for r in 0..size {
                if r == row {
                    continue;
                }
                let factor = system[[r, col]];
                if factor == F::zero() {
                    continue;
                }
                for k in 0..(size + 1) {
                    let delta = factor * system[[row, k]];
                    system[[r, k]] -= delta;
                }
            }
            pivots.push((row, col));
            row += 1;
        }

        let mut x = Array1::<F>::zeros(size);
        for (r, c) in pivots {
            x[c] = system[[r, size]];
        }
        x
    }

    /// Returns the value at which the cumulative weight first reaches half of
    /// the total weight.
    pub fn weighted_median<F: Float>(values: &[F], weights: &[F]) -> F {
        debug_assert_eq!(values.len(), weights.len());
        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&i, &j| {
            values[i]
                .partial_cmp(&values[j])
                .unwrap_or(Ordering::Equal)
        });
        let total: F = weights.iter().copied().sum();
        let half = total * F::cast(0.5);
        let mut cumulative = F::zero();
        for &idx in order.iter() {
            cumulative += weights[idx];
            if cumulative >= half {
                return values[idx];
            }
        }
        order.last().map(|&idx| values[idx]).unwrap_or_else(F::zero)
    }

    /// Plain median, averaging the two middle values for an even length.
    pub fn median<F: Float>(values: ArrayView1<F>) -> F {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let n = sorted.len();
        if n == 0 {
            return F::zero();
        }
        if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / F::cast(2.)
        }
    }
}

/// This module contains helpers functions to efficiently write tests.
pub mod test_helpers {
    use crate::Float;
    use approx::AbsDiffEq;
    use ndarray::prelude::*;
    use ndarray::{concatenate, Array1, Array2, ArrayView1, ArrayView2};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal, Uniform};

    pub fn assert_array_all_close<F>(x: ArrayView1<F>, y: ArrayView1<F>, delta: F)
    where
        F: Float + AbsDiffEq<Epsilon = F>,
    {
        assert_eq!(x.len(), y.len());
        for i in 0..x.len() {
            if x[i].abs_diff_ne(&y[i], delta) {
                panic!("x: {}, y: {} ; with precision level {}", x[i], y[i], delta);
            }
        }
    }

    pub fn assert_array2d_all_close<F>(x: ArrayView2<F>, y: ArrayView2<F>, delta: F)
    where
        F: Float + AbsDiffEq<Epsilon = F>,
    {
        assert_eq!(x.shape()[0], y.shape()[0]);
        assert_eq!(x.shape()[1], y.shape()[1]);
        for i in 0..x.shape()[0] {
            for j in 0..x.shape()[1] {
                if x[[i, j]].abs_diff_ne(&y[[i, j]], delta) {
                    panic!(
                        "x: {}, y: {} ; with precision level {}",
                        x[[i, j]],
                        y[[i, j]],
                        delta
                    );
                }
            }
        }
    }

    pub fn fill_random_vector(capacity: usize, seed: u64) -> Vec<f64> {
        let mut r = StdRng::seed_from_u64(seed);
        let normal = Normal::new(0., 1.).unwrap();

        let mut data_x: Vec<f64> = Vec::with_capacity(capacity);
        for _ in 0..data_x.capacity() {
            data_x.push(normal.sample(&mut r));
        }
        data_x
    }

    pub fn generate_random_data(n_samples: usize, n_features: usize) -> (Array2<f64>, Array1<f64>) {
        let data_x = fill_random_vector(n_samples * n_features, 42);
        let data_w = fill_random_vector(n_features, 43);
        let data_e = fill_random_vector(n_samples, 44);
        let X = Array2::from_shape_vec((n_samples, n_features), data_x).unwrap();
        let true_w = Array1::from_shape_vec(n_features, data_w).unwrap();
        let noise = Array1::from_shape_vec(n_samples, data_e).unwrap();
        let y = X.dot(&true_w) + noise * 0.1;

        (X, y)
    }

    /// Features drawn uniformly in `[0, 10)`, target `y = X w` without noise.
    pub fn generate_linear_data(n_samples: usize, weights: &[f64], seed: u64) -> (Array2<f64>, Array1<f64>) {
        let mut r = StdRng::seed_from_u64(seed);
        let uniform = Uniform::new(0., 10.);
        let n_features = weights.len();
        let X = Array2::from_shape_fn((n_samples, n_features), |_| uniform.sample(&mut r));
        let y = X.dot(&Array1::from(weights.to_vec()));
        (X, y)
    }

    /// Glues a design matrix and its targets into the layout the pipeline
    /// consumes: features followed by the target as the last column.
    pub fn stack_target(X: ArrayView2<f64>, y: ArrayView1<f64>) -> Array2<f64> {
        concatenate![Axis(1), X, y.insert_axis(Axis(1))]
    }
}
