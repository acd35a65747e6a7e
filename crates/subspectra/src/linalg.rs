//! Dense Hermitian linear algebra on top of `nalgebra`.
//!
//! All spectra leaving this module are sorted descending. Real symmetric
//! inputs are carried as complex matrices with zero imaginary part, so one
//! code path serves the complex Hermitian and the real diagonal cases.
//!
//! ## Orthogonal complements
//!
//! Two constructions for an orthonormal basis of u⊥:
//!
//! - [`null_space_complement`]: eigenvectors of the rank-one Gram matrix `u uᴴ`
//!   belonging to the zero eigenvalue. Reports `Err` when the recovered basis
//!   has the wrong size or is not orthogonal to u.
//! - [`qr_complement`]: Householder QR of the n×(n+1) matrix `[u | I]`. Q is
//!   unitary with first column proportional to u; the remaining columns span u⊥.
//!
//! [`orthogonal_complement`] tries the first and falls back to the second.

use crate::error::{Result, SpectraError};
use crate::utils::{argsort_descending, sort_descending, COMPLEMENT_ORTHOGONALITY, MIN_DIRECTION_NORM};
use nalgebra::{DMatrix, DVector, SymmetricEigen, QR};
use num_complex::Complex64;
use tracing::debug;

/// Eigendecomposition with eigenvalues sorted descending
#[derive(Debug, Clone)]
pub struct HermitianEigen {
    /// Eigenvalues, largest first
    pub eigenvalues: Vec<f64>,
    /// Orthonormal eigenvectors; column `j` belongs to `eigenvalues[j]`
    pub eigenvectors: DMatrix<Complex64>,
}

/// Full eigendecomposition of a Hermitian matrix, sorted descending.
pub fn hermitian_eigen(matrix: &DMatrix<Complex64>) -> HermitianEigen {
    if matrix.nrows() == 0 {
        return HermitianEigen {
            eigenvalues: Vec::new(),
            eigenvectors: DMatrix::zeros(0, 0),
        };
    }

    let eigen = SymmetricEigen::new(matrix.clone());
    let raw: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
    let order = argsort_descending(&raw);

    HermitianEigen {
        eigenvalues: order.iter().map(|&i| raw[i]).collect(),
        eigenvectors: eigen.eigenvectors.select_columns(order.iter()),
    }
}

/// Eigenvalues of a Hermitian matrix, sorted descending.
pub fn eigenvalues_descending(matrix: &DMatrix<Complex64>) -> Vec<f64> {
    if matrix.nrows() == 0 {
        return Vec::new();
    }
    let mut values: Vec<f64> = matrix.symmetric_eigenvalues().iter().copied().collect();
    sort_descending(&mut values);
    values
}

/// `(M + Mᴴ) / 2`
pub fn hermitian_part(matrix: &DMatrix<Complex64>) -> DMatrix<Complex64> {
    (matrix + matrix.adjoint()).unscale(2.0)
}

/// Compression `Vᴴ M V` of `matrix` onto the columns of `basis`, symmetrised.
pub fn compress(matrix: &DMatrix<Complex64>, basis: &DMatrix<Complex64>) -> DMatrix<Complex64> {
    let compressed = basis.adjoint() * matrix * basis;
    hermitian_part(&compressed)
}

/// `diag(values)` as a complex matrix
pub fn diagonal_matrix(values: &[f64]) -> DMatrix<Complex64> {
    let diag = DVector::from_iterator(values.len(), values.iter().map(|&v| Complex64::new(v, 0.0)));
    DMatrix::from_diagonal(&diag)
}

/// Squared magnitudes of `u` in the given orthonormal basis: `|Vᴴu|²`
pub fn projection_weights(basis: &DMatrix<Complex64>, u: &DVector<Complex64>) -> Vec<f64> {
    (basis.adjoint() * u).iter().map(|c| c.norm_sqr()).collect()
}

/// Orthonormal basis of u⊥ from the null space of `uᴴ`.
///
/// The Gram matrix `u uᴴ` has one eigenvalue `‖u‖²` and `n - 1` zeros; the
/// eigenvectors of the zero cluster span u⊥. Eigenvalues up to `√ε · ‖u‖²`
/// count as zero.
pub fn null_space_complement(u: &DVector<Complex64>) -> Result<DMatrix<Complex64>> {
    let n = u.len();
    if n == 0 {
        return Err(SpectraError::invalid_parameter("u", "must be non-empty"));
    }

    let norm = u.norm();
    if !norm.is_finite() || norm <= MIN_DIRECTION_NORM {
        return Err(SpectraError::numerical_instability(format!(
            "direction norm {:.3e} is not usable",
            norm
        )));
    }

    let gram = u * u.adjoint();
    let eigen = SymmetricEigen::new(gram);
    let threshold = f64::EPSILON.sqrt() * norm * norm;

    let kernel: Vec<usize> = eigen
        .eigenvalues
        .iter()
        .enumerate()
        .filter(|(_, v)| v.abs() <= threshold)
        .map(|(i, _)| i)
        .collect();

    if kernel.len() != n - 1 {
        return Err(SpectraError::rank_deficient(n - 1, kernel.len()));
    }

    let basis = eigen.eigenvectors.select_columns(kernel.iter());
    let leak = (basis.adjoint() * u)
        .iter()
        .map(|c| c.norm())
        .fold(0.0, f64::max);
    if leak > COMPLEMENT_ORTHOGONALITY * norm {
        return Err(SpectraError::numerical_instability(format!(
            "null-space basis leaks {:.3e} onto u",
            leak
        )));
    }

    Ok(basis)
}

/// Orthonormal basis of u⊥ from a full QR decomposition.
///
/// Never fails: Householder QR of `[u | I]` always yields a unitary Q whose
/// first column spans u.
pub fn qr_complement(u: &DVector<Complex64>) -> DMatrix<Complex64> {
    let n = u.len();
    if n == 0 {
        return DMatrix::zeros(0, 0);
    }

    let one = Complex64::new(1.0, 0.0);
    let zero = Complex64::new(0.0, 0.0);
    let augmented = DMatrix::from_fn(n, n + 1, |i, j| match j {
        0 => u[i],
        _ if i + 1 == j => one,
        _ => zero,
    });

    let q = QR::new(augmented).q();
    q.columns(1, n - 1).into_owned()
}

/// Orthonormal basis of u⊥: null-space construction, QR on failure.
pub fn orthogonal_complement(u: &DVector<Complex64>) -> DMatrix<Complex64> {
    match null_space_complement(u) {
        Ok(basis) => basis,
        Err(err) => {
            debug!(error = %err, dim = u.len(), "null-space complement rejected, using QR");
            qr_complement(u)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn real_vector(values: &[f64]) -> DVector<Complex64> {
        DVector::from_iterator(values.len(), values.iter().map(|&v| Complex64::new(v, 0.0)))
    }

    fn assert_orthonormal_complement(basis: &DMatrix<Complex64>, u: &DVector<Complex64>) {
        let n = u.len();
        assert_eq!(basis.shape(), (n, n - 1));

        let gram = basis.adjoint() * basis;
        for i in 0..n - 1 {
            for j in 0..n - 1 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(gram[(i, j)].re, expected, epsilon = 1e-12);
                assert_abs_diff_eq!(gram[(i, j)].im, 0.0, epsilon = 1e-12);
            }
        }

        let leak = basis.adjoint() * u;
        for c in leak.iter() {
            assert!(c.norm() < 1e-12);
        }
    }

    #[test]
    fn test_eigen_diagonal_sorted_descending() {
        let m = diagonal_matrix(&[1.0, 4.0, 2.0, 3.0]);
        let eig = hermitian_eigen(&m);
        assert_eq!(eig.eigenvalues.len(), 4);
        for (got, want) in eig.eigenvalues.iter().zip([4.0, 3.0, 2.0, 1.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
        // Column 0 belongs to eigenvalue 4, which sits at index 1
        assert_abs_diff_eq!(eig.eigenvectors[(1, 0)].norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_eigenvalues_descending_matches_full() {
        let m = DMatrix::from_row_slice(
            2,
            2,
            &[
                Complex64::new(2.0, 0.0),
                Complex64::new(0.0, 1.0),
                Complex64::new(0.0, -1.0),
                Complex64::new(2.0, 0.0),
            ],
        );
        let values = eigenvalues_descending(&m);
        assert_abs_diff_eq!(values[0], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(values[1], 1.0, epsilon = 1e-12);
        assert!(eigenvalues_descending(&DMatrix::zeros(0, 0)).is_empty());
    }

    #[test]
    fn test_eigenvectors_reconstruct_matrix() {
        let m = DMatrix::from_row_slice(
            3,
            3,
            &[
                Complex64::new(1.0, 0.0),
                Complex64::new(0.5, 0.5),
                Complex64::new(0.0, 0.0),
                Complex64::new(0.5, -0.5),
                Complex64::new(-2.0, 0.0),
                Complex64::new(1.0, 0.0),
                Complex64::new(0.0, 0.0),
                Complex64::new(1.0, 0.0),
                Complex64::new(3.0, 0.0),
            ],
        );
        let eig = hermitian_eigen(&m);
        let lambda = diagonal_matrix(&eig.eigenvalues);
        let rebuilt = &eig.eigenvectors * lambda * eig.eigenvectors.adjoint();
        for (a, b) in rebuilt.iter().zip(m.iter()) {
            assert!((a - b).norm() < 1e-10);
        }
    }

    #[test]
    fn test_null_space_complement() {
        let u = real_vector(&[0.6, 0.0, 0.8]);
        let basis = null_space_complement(&u).unwrap();
        assert_orthonormal_complement(&basis, &u);
    }

    #[test]
    fn test_null_space_rejects_zero_vector() {
        let u = real_vector(&[0.0, 0.0, 0.0]);
        assert!(matches!(
            null_space_complement(&u),
            Err(SpectraError::NumericalInstability { .. })
        ));
    }

    #[test]
    fn test_qr_complement_complex() {
        let mut u = DVector::from_vec(vec![
            Complex64::new(0.3, -0.2),
            Complex64::new(0.0, 0.9),
            Complex64::new(-0.4, 0.1),
            Complex64::new(0.2, 0.0),
        ]);
        let norm = u.norm();
        u.unscale_mut(norm);
        let basis = qr_complement(&u);
        assert_orthonormal_complement(&basis, &u);
    }

    #[test]
    fn test_qr_complement_with_zero_entry() {
        let u = real_vector(&[0.0, 1.0, 0.0]);
        let basis = qr_complement(&u);
        assert_orthonormal_complement(&basis, &u);
    }

    #[test]
    fn test_orthogonal_complement_falls_back() {
        // A zero direction defeats the null-space routine; QR still returns n - 1 columns.
        let u = real_vector(&[0.0, 0.0]);
        let basis = orthogonal_complement(&u);
        assert_eq!(basis.shape(), (2, 1));
    }

    #[test]
    fn test_projection_weights_sum_to_one() {
        let u = real_vector(&[0.6, 0.0, 0.8]);
        let w = projection_weights(&DMatrix::identity(3, 3), &u);
        assert_abs_diff_eq!(w[0], 0.36, epsilon = 1e-15);
        assert_abs_diff_eq!(w[1], 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_compress_is_hermitian() {
        let m = diagonal_matrix(&[3.0, 1.0, -2.0]);
        let u = real_vector(&[1.0 / 3f64.sqrt(); 3]);
        let basis = qr_complement(&u);
        let b = compress(&m, &basis);
        assert_eq!(b.shape(), (2, 2));
        assert_eq!(b, b.adjoint());
    }
}
