use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use thiserror::Error;

mod impl_datasets;
mod impl_design_matrix;
mod impl_targets;

pub use impl_datasets::split_features_target;


/// A design matrix paired with a single regression target per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBase<DM, T>
where
    DM: DesignMatrix,
{
    pub design_matrix: DM,
    pub targets: T,
}

pub type DenseDataset<F> = DatasetBase<Array2<F>, Array1<F>>;
pub type DatasetView<'a, F> = DatasetBase<ArrayView2<'a, F>, ArrayView1<'a, F>>;

pub trait DesignMatrix: Sized {
    type Elem;

    fn n_samples(&self) -> usize;
    fn n_features(&self) -> usize;
}

pub trait Targets: Sized {
    type Elem;

    fn n_samples(&self) -> usize;
}

/// Error variants raised while turning raw matrices into datasets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("{which} matrix has no rows")]
    Empty { which: &'static str },
    #[error("{which} matrix has {n_columns} column(s), need at least one feature and the target")]
    TooFewColumns {
        which: &'static str,
        n_columns: usize,
    },
    #[error("train matrix has {train} columns but test matrix has {test}")]
    ColumnMismatch { train: usize, test: usize },
    #[error("design matrix has {records} rows but there are {targets} targets")]
    LengthMismatch { records: usize, targets: usize },
}

/// The train and test halves of a pre-split matrix, each already separated
/// into features and the trailing target column.
#[derive(Debug, Clone)]
pub struct TrainTestSplit<'a, F> {
    pub train: DatasetView<'a, F>,
    pub test: DatasetView<'a, F>,
}
