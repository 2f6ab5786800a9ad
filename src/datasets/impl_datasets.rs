use super::DatasetBase;
use crate::Float;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// This implementation block provides a method for the creation of datasets
/// from dense matrices.
impl<F: Float> From<(Array2<F>, Array1<F>)> for DatasetBase<F> {
    fn from(data: (Array2<F>, Array1<F>)) -> Self {
        DatasetBase::new(data.0, data.1)
    }
}

/// This implementation block provides methods to get record and target objects
/// from the dataset.
impl<F: Float> DatasetBase<F> {
    /// This method instantiates a new dataset from a design matrix and targets.
    /// Features are named `x0`, `x1`, ... until [`DatasetBase::with_feature_names`]
    /// is called.
    pub fn new(records: Array2<F>, targets: Array1<F>) -> DatasetBase<F> {
        let feature_names = (0..records.ncols()).map(|j| format!("x{}", j)).collect();
        DatasetBase {
            records,
            targets,
            feature_names,
        }
    }

    /// Replaces the feature names. Extra names are ignored and missing ones
    /// keep their default name.
    pub fn with_feature_names<S: Into<String>>(mut self, names: Vec<S>) -> Self {
        for (slot, name) in self.feature_names.iter_mut().zip(names) {
            *slot = name.into();
        }
        self
    }

    /// This method is a getter for the design matrix.
    pub fn records(&self) -> ArrayView2<F> {
        self.records.view()
    }

    /// This method is a getter for the targets.
    pub fn targets(&self) -> ArrayView1<F> {
        self.targets.view()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn n_samples(&self) -> usize {
        self.records.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.records.ncols()
    }

    /// Shape of the design matrix, `(n_samples, n_features)`.
    pub fn shape(&self) -> (usize, usize) {
        self.records.dim()
    }

    /// Builds a new dataset holding the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> DatasetBase<F> {
        DatasetBase {
            records: self.records.select(Axis(0), indices),
            targets: self.targets.select(Axis(0), indices),
            feature_names: self.feature_names.clone(),
        }
    }
}
