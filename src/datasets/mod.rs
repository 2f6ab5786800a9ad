use ndarray::{Array1, Array2};


mod frame;
mod impl_datasets;
mod loader;
mod split;

pub use frame::{Column, ColumnValues, DType, DataFrame};
pub use loader::{read_csv, read_csv_from};
pub use split::{train_test_split, MIN_SAMPLES};

/// A design matrix and its row-aligned targets
///
/// This is the unit every estimator is fitted on. The feature names record the
/// column order of the design matrix so that fitted coefficients can be mapped
/// back to the columns they were learned from.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBase<F> {
    records: Array2<F>,
    targets: Array1<F>,
    feature_names: Vec<String>,
}
