#![allow(non_snake_case)]

//! Train a family of regressors on a train/test split, score each one on the
//! held-out data with the coefficient of determination and persist the best.
//!
//! The pipeline is linear: [`registry`] → [`evaluator`] → [`selector`] →
//! [`persist`], orchestrated by [`trainer::ModelTrainer`].

use ndarray::ScalarOperand;

use num_traits::{AsPrimitive, FromPrimitive, NumAssignOps, NumCast};

use std::cmp::PartialOrd;
use std::fmt;
use std::iter::Sum;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

/// Float point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point
/// number and implement them for 32bit and 64bit float points.
/// Ref: https://github.com/rust-ml/linfa/blob/master/src/dataset/mod.rs#L36
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Sum
    + NumAssignOps
    + AsPrimitive<f64>
    + for<'a> AddAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> DivAssign<&'a Self>
    + ScalarOperand
    + approx::AbsDiffEq<Epsilon = Self>
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

pub mod config;
pub mod datasets;
pub mod error;
pub mod estimators;
pub mod evaluator;
pub mod helpers;
pub mod logging;
pub mod metrics;
pub mod persist;
pub mod registry;
pub mod selector;
pub mod trainer;

pub use error::TrainerError;
pub use trainer::{ModelTrainer, TrainingOutcome};
