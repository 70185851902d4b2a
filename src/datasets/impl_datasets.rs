use super::{
    DatasetBase, DatasetError, DatasetView, DesignMatrix, DenseDataset, Targets, TrainTestSplit,
};
use ndarray::{ArrayBase, ArrayView2, Axis, Data, Ix1, Ix2};

/// This implementation block provides a method for the creation of datasets
/// from dense matrices.
impl<F, D: Data<Elem = F>, T: Data<Elem = F>> From<(ArrayBase<D, Ix2>, ArrayBase<T, Ix1>)>
    for DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>
{
    fn from(data: (ArrayBase<D, Ix2>, ArrayBase<T, Ix1>)) -> Self {
        DatasetBase {
            design_matrix: data.0,
            targets: data.1,
        }
    }
}

/// This implementation block provides methods to get record and target objects
/// from the dataset.
impl<DM: DesignMatrix, T: Targets> DatasetBase<DM, T> {
    /// This method instantiates a new dataset from a design matrix and targets.
    pub fn new(design_matrix: DM, targets: T) -> DatasetBase<DM, T> {
        DatasetBase {
            design_matrix,
            targets,
        }
    }

    /// Like [`DatasetBase::new`] but refuses a design matrix and targets of
    /// different lengths.
    pub fn try_new(design_matrix: DM, targets: T) -> Result<DatasetBase<DM, T>, DatasetError> {
        if design_matrix.n_samples() != targets.n_samples() {
            return Err(DatasetError::LengthMismatch {
                records: design_matrix.n_samples(),
                targets: targets.n_samples(),
            });
        }
        Ok(DatasetBase::new(design_matrix, targets))
    }

    /// This method is a getter for the targets.
    pub fn targets(&self) -> &T {
        &self.targets
    }

    /// This method is a getter for the design matrix.
    pub fn design_matrix(&self) -> &DM {
        &self.design_matrix
    }

    pub fn n_samples(&self) -> usize {
        self.design_matrix.n_samples()
    }

    pub fn n_features(&self) -> usize {
        self.design_matrix.n_features()
    }
}

impl<F, D: Data<Elem = F>, T: Data<Elem = F>> DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>> {
    /// Borrows the dataset without copying the underlying arrays.
    pub fn view(&self) -> DatasetView<'_, F> {
        DatasetBase::new(self.design_matrix.view(), self.targets.view())
    }
}

impl<F: Clone> DenseDataset<F> {
    /// Builds an owned dataset from a matrix whose last column is the target.
    pub fn from_matrix<S: Data<Elem = F>>(
        matrix: &ArrayBase<S, Ix2>,
    ) -> Result<DenseDataset<F>, DatasetError> {
        let view = split_features_target(matrix.view(), "input")?;
        Ok(DatasetBase::new(
            view.design_matrix.to_owned(),
            view.targets.to_owned(),
        ))
    }
}

/// Splits a matrix into its feature columns and its trailing target column.
pub fn split_features_target<'a, F>(
    matrix: ArrayView2<'a, F>,
    which: &'static str,
) -> Result<DatasetView<'a, F>, DatasetError> {
    let n_columns = matrix.len_of(Axis(1));
    if n_columns < 2 {
        return Err(DatasetError::TooFewColumns { which, n_columns });
    }
    if matrix.len_of(Axis(0)) == 0 {
        return Err(DatasetError::Empty { which });
    }
    let (features, target) = matrix.split_at(Axis(1), n_columns - 1);
    Ok(DatasetBase::new(features, target.index_axis_move(Axis(1), 0)))
}

impl<'a, F> TrainTestSplit<'a, F> {
    /// Splits both matrices into features and targets, checking that they
    /// share the same column layout.
    pub fn from_matrices<S1, S2>(
        train: &'a ArrayBase<S1, Ix2>,
        test: &'a ArrayBase<S2, Ix2>,
    ) -> Result<TrainTestSplit<'a, F>, DatasetError>
    where
        S1: Data<Elem = F>,
        S2: Data<Elem = F>,
    {
        let (train_columns, test_columns) = (train.ncols(), test.ncols());
        if train_columns != test_columns {
            return Err(DatasetError::ColumnMismatch {
                train: train_columns,
                test: test_columns,
            });
        }
        Ok(TrainTestSplit {
            train: split_features_target(train.view(), "train")?,
            test: split_features_target(test.view(), "test")?,
        })
    }

    pub fn n_features(&self) -> usize {
        self.train.n_features()
    }
}

