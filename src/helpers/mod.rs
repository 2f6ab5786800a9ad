
/// This module implements the proximal operator of the L1 penalty.
pub mod prox {
    use crate::Float;

    /// The soft-thresholding operator is the proximal operator used by
    /// [`L1`](crate::penalties::L1).
    pub fn soft_thresholding<F: Float>(x: F, threshold: F) -> F {
        if x > threshold {
            x - threshold
        } else if x < -threshold {
            x + threshold
        } else {
            F::zero()
        }
    }
}

/// This module contains the dense linear algebra routines used by the
/// closed-form estimators.
pub mod linalg {
    use crate::estimators::error::{EstimatorError, Result};
    use crate::Float;
    use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

    /// Computes the lower-triangular Cholesky factor `L` of a symmetric
    /// positive-definite matrix, `A = L Lᵀ`.
    pub fn cholesky_factorization<F: Float>(A: ArrayView2<F>) -> Result<Array2<F>> {
        let n = A.nrows();
        if A.ncols() != n {
            return Err(EstimatorError::ShapeMismatch {
                expected: n,
                found: A.ncols(),
            });
        }

        let mut L = Array2::<F>::zeros((n, n));
        for j in 0..n {
            let mut diag = A[[j, j]];
            for k in 0..j {
                diag -= L[[j, k]] * L[[j, k]];
            }
            if diag <= F::zero() || !diag.is_finite() {
                return Err(EstimatorError::SingularMatrix);
            }
            let L_jj = diag.sqrt();
            L[[j, j]] = L_jj;

            for i in (j + 1)..n {
                let mut off_diag = A[[i, j]];
                for k in 0..j {
                    off_diag -= L[[i, k]] * L[[j, k]];
                }
                L[[i, j]] = off_diag / L_jj;
            }
        }
        Ok(L)
    }

    /// Solves `L x = b` for a lower-triangular `L`.
    pub fn forward_substitution<F: Float>(L: ArrayView2<F>, b: ArrayView1<F>) -> Result<Array1<F>> {
        let n = b.len();
        let mut x = Array1::<F>::zeros(n);
        for i in 0..n {
            if L[[i, i]] == F::zero() {
                return Err(EstimatorError::SingularMatrix);
            }
            let mut acc = b[i];
            for k in 0..i {
                acc -= L[[i, k]] * x[k];
            }
            x[i] = acc / L[[i, i]];
        }
        Ok(x)
    }

    /// Solves `U x = b` for an upper-triangular `U`.
    pub fn backward_substitution<F: Float>(U: ArrayView2<F>, b: ArrayView1<F>) -> Result<Array1<F>> {
        let n = b.len();
        let mut x = Array1::<F>::zeros(n);
        for i in (0..n).rev() {
            if U[[i, i]] == F::zero() {
                return Err(EstimatorError::SingularMatrix);
            }
            let mut acc = b[i];
            for k in (i + 1)..n {
                acc -= U[[i, k]] * x[k];
            }
            x[i] = acc / U[[i, i]];
        }
        Ok(x)
    }

    /// Solves the symmetric positive-definite system `A x = b` through a
    /// Cholesky factorization followed by two triangular solves.
    pub fn solve_cholesky<F: Float>(A: ArrayView2<F>, b: ArrayView1<F>) -> Result<Array1<F>> {
        if b.len() != A.nrows() {
            return Err(EstimatorError::ShapeMismatch {
                expected: A.nrows(),
                found: b.len(),
            });
        }
        let L = cholesky_factorization(A)?;
        let z = forward_substitution(L.view(), b)?;
        backward_substitution(L.t(), z.view())
    }
}

/// This module contains helper functions shared by the estimators.
pub mod helpers {
    use crate::Float;
    use ndarray::Data;
    use ndarray::{ArrayBase, ArrayView1, ArrayView2, Ix1};
    use std::cmp::Ordering;

    /// This function computes the maximum regularization hyperparameter value
    /// for the Lasso. A regularization hyperparameter value larger than this
    /// maximum value yields a null solution.
    pub fn compute_alpha_max<F: Float>(X: ArrayView2<F>, y: ArrayView1<F>) -> F {
        let n_samples = F::cast(X.shape()[0]);
        let Xty = X.t().dot(&y);
        let alpha_max = Xty.fold(F::zero(), |max_val, &x| x.abs().max(max_val));
        alpha_max / n_samples
    }

    /// This is a helper method that sorts the indices of an array based on some
    /// `compare` closure. It is used to rank the features of the working set
    /// and to order correlations.
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
}

/// This module contains helpers functions to efficiently write tests and
/// benchmarks.
pub mod test_helpers {
    use crate::Float;
    use approx::AbsDiffEq;
    use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ShapeBuilder};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};
    use std::path::Path;

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
        assert_eq!(x.shape(), y.shape());
        for ((i, j), &x_ij) in x.indexed_iter() {
            if x_ij.abs_diff_ne(&y[[i, j]], delta) {
                panic!(
                    "x: {}, y: {} at ({}, {}) ; with precision level {}",
                    x_ij,
                    y[[i, j]],
                    i,
                    j,
                    delta
                );
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
        let X = Array2::from_shape_vec((n_samples, n_features).f(), data_x).unwrap();
        let true_w = Array1::from_shape_vec(n_features, data_w).unwrap();
        let noise = Array1::from_shape_vec(n_samples, data_e).unwrap();
        let y = X.dot(&true_w) + noise;

        (X, y)
    }

    /// Draws `RM`, `LSTAT` and `PTRATIO` columns with housing-like scales.
    pub fn generate_housing_features(n_samples: usize, seed: u64) -> Array2<f64> {
        let mut r = StdRng::seed_from_u64(seed);
        let rooms = Normal::new(6.3, 0.7).unwrap();
        let lower_status = Normal::new(12.6, 7.1).unwrap();
        let ptratio = Normal::new(18.5, 2.2).unwrap();

        let mut X = Array2::<f64>::zeros((n_samples, 3));
        for mut row in X.rows_mut() {
            row[0] = rooms.sample(&mut r);
            row[1] = lower_status.sample(&mut r);
            row[2] = ptratio.sample(&mut r);
        }
        X
    }

    /// Writes a housing-like table with a header row to `path`: the columns
    /// `CRIM`, `RM`, `LSTAT`, `PTRATIO`, `CHAS` and `MEDV`, where
    /// `MEDV = 3 RM - 2 LSTAT + PTRATIO + 5` plus gaussian noise of standard
    /// deviation `noise`.
    pub fn write_housing_csv<P: AsRef<Path>>(
        path: P,
        n_samples: usize,
        noise: f64,
        seed: u64,
    ) -> csv::Result<()> {
        let X = generate_housing_features(n_samples, seed);
        let mut r = StdRng::seed_from_u64(seed + 1);
        let crime = Normal::<f64>::new(3.6, 8.6).unwrap();
        let error = Normal::<f64>::new(0., noise).unwrap();

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["CRIM", "RM", "LSTAT", "PTRATIO", "CHAS", "MEDV"])?;
        for (i, row) in X.rows().into_iter().enumerate() {
            let medv = 3. * row[0] - 2. * row[1] + row[2] + 5. + error.sample(&mut r);
            writer.write_record(&[
                format!("{:.5}", crime.sample(&mut r).abs()),
                row[0].to_string(),
                row[1].to_string(),
                row[2].to_string(),
                match i % 7 {
                    0 => "1".to_string(),
                    _ => "0".to_string(),
                },
                medv.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Exact linear target `MEDV = 3 RM - 2 LSTAT + PTRATIO + 5` without noise.
    pub fn generate_linear_housing_data(n_samples: usize) -> (Array2<f64>, Array1<f64>) {
        let X = generate_housing_features(n_samples, 42);
        let y = X.map_axis(ndarray::Axis(1), |row| {
            3. * row[0] - 2. * row[1] + row[2] + 5.
        });
        (X, y)
    }
}
