use super::helpers::*;
use super::test_helpers::*;
use ndarray::{array, Array1};

#[test]
fn test_argsort_by_is_stable() {
    let arr = array![3., 1., 2., 1.];
    let order = argsort_by(&arr, |a: &f64, b: &f64| a.partial_cmp(b).unwrap());
    assert_eq!(order, vec![1, 3, 2, 0]);
}

#[test]
fn test_solve_lin_sys() {
    let A = array![[26., 8., 15.], [8., 14., 5.], [15., 5., 14.]];
    let b = array![1., 1., 1.];
    let x = solve_lin_sys(A.view(), b.view(), 1e-12);
    let ans = array![-0.0225, 0.0575, 0.075];
    assert_array_all_close(x.view(), ans.view(), 1e-4);
    assert_array_all_close(A.dot(&x).view(), b.view(), 1e-10);
}

#[test]
fn test_solve_lin_sys_needs_pivoting() {
    let A = array![[0., 2.], [3., 1.]];
    let b = array![4., 5.];
    let x = solve_lin_sys(A.view(), b.view(), 1e-12);
    assert_array_all_close(x.view(), array![1., 2.].view(), 1e-12);
}

#[test]
fn test_solve_lin_sys_rank_deficient() {
    // Second column duplicates the first one.
    let A = array![[2., 2.], [2., 2.]];
    let b = array![4., 4.];
    let x = solve_lin_sys(A.view(), b.view(), 1e-12);
    assert_array_all_close(x.view(), array![2., 0.].view(), 1e-12);
}

#[test]
fn test_solve_lin_sys_zero_matrix() {
    let A = array![[0., 0.], [0., 0.]];
    let b = array![0., 0.];
    let x = solve_lin_sys(A.view(), b.view(), 1e-12);
    assert_eq!(x, Array1::<f64>::zeros(2));
}

#[test]
fn test_weighted_median() {
    let values = [3., 1., 2.];
    assert_eq!(weighted_median(&values, &[1., 1., 1.]), 2.);
    assert_eq!(weighted_median(&values, &[10., 1., 1.]), 3.);
    assert_eq!(weighted_median(&values, &[0., 5., 1.]), 1.);
}

#[test]
fn test_median() {
    assert_eq!(median(array![5., 1., 3.].view()), 3.);
    assert_eq!(median(array![4., 1., 3., 2.].view()), 2.5);
}

#[test]
fn test_stack_target() {
    let x = array![[1., 2.], [3., 4.]];
    let y = array![5., 6.];
    assert_eq!(stack_target(x.view(), y.view()), array![[1., 2., 5.], [3., 4., 6.]]);
}
