use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::DatasetBase;
use crate::error::{EdaError, Result};
use crate::Float;

/// Smallest dataset that can be split into a training and a test partition.
pub const MIN_SAMPLES: usize = 5;

/// Splits a dataset into a training and a test partition.
///
/// Row indices are shuffled with a [`StdRng`] seeded by `seed`; the first
/// `ceil(test_size * n_samples)` shuffled rows form the test partition and the
/// remaining rows the training partition. The same seed and the same number
/// of rows always yield the same partition.
pub fn train_test_split<F: Float>(
    dataset: &DatasetBase<F>,
    test_size: f64,
    seed: u64,
) -> Result<(DatasetBase<F>, DatasetBase<F>)> {
    if !(test_size > 0. && test_size < 1.) {
        return Err(EdaError::InvalidParameter(format!(
            "test size must lie in (0, 1), got {}",
            test_size
        )));
    }

    let n_samples = dataset.n_samples();
    if n_samples < MIN_SAMPLES {
        return Err(EdaError::InsufficientData {
            rows: n_samples,
            required: MIN_SAMPLES,
        });
    }

    let n_test = usize::min((test_size * n_samples as f64).ceil() as usize, n_samples);
    let n_train = n_samples - n_test;
    if n_test == 0 || n_train == 0 {
        return Err(EdaError::InsufficientData {
            rows: n_samples,
            required: MIN_SAMPLES,
        });
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_indices, train_indices) = indices.split_at(n_test);
    debug!(
        "Split {} rows into {} training and {} test rows (seed {})",
        n_samples, n_train, n_test, seed
    );
    Ok((
        dataset.select_rows(train_indices),
        dataset.select_rows(test_indices),
    ))
}
