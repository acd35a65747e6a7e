//! Principal submatrices and their spectra.
//!
//! Index subsets are visited in lexicographic order so that flattened
//! multisets are reproducible before their final sort.

use crate::error::{Result, SpectraError};
use crate::linalg::eigenvalues_descending;
use crate::utils::{binomial, complement_indices, sort_descending, IndexSubsets};
use nalgebra::DMatrix;
use num_complex::Complex64;

/// Principal submatrix on the rows/columns listed in `keep`
pub fn principal_submatrix(matrix: &DMatrix<Complex64>, keep: &[usize]) -> DMatrix<Complex64> {
    matrix.select_rows(keep.iter()).select_columns(keep.iter())
}

/// Spectrum (descending) of the principal submatrix left after deleting
/// the rows/columns in `excluded`.
pub fn principal_submatrix_eigenvalues(
    matrix: &DMatrix<Complex64>,
    excluded: &[usize],
) -> Result<Vec<f64>> {
    let n = matrix.nrows();
    if let Some(&bad) = excluded.iter().find(|&&i| i >= n) {
        return Err(SpectraError::invalid_parameter(
            "excluded",
            format!("index {} out of range for dimension {}", bad, n),
        ));
    }
    let keep = complement_indices(n, excluded);
    Ok(eigenvalues_descending(&principal_submatrix(matrix, &keep)))
}

/// Spectra of the n deleted-one-index submatrices; entry `k` has row/column `k` removed.
pub fn deleted_index_spectra(matrix: &DMatrix<Complex64>) -> Vec<Vec<f64>> {
    let n = matrix.nrows();
    (0..n)
        .map(|k| {
            let keep = complement_indices(n, &[k]);
            eigenvalues_descending(&principal_submatrix(matrix, &keep))
        })
        .collect()
}

/// The multiset Xₛ(A): eigenvalues of every size-`s` principal submatrix,
/// concatenated in lexicographic subset order and then sorted descending.
///
/// Length is `C(n, s) · s`. Cost is `C(n, s)` eigendecompositions of s×s
/// matrices, so callers should keep n small (interactive use stays below 20).
pub fn all_size_s_spectra(matrix: &DMatrix<Complex64>, s: usize) -> Result<Vec<f64>> {
    let n = matrix.nrows();
    if matrix.ncols() != n {
        return Err(SpectraError::dimension_mismatch(n, matrix.ncols()));
    }
    if s == 0 || s > n {
        return Err(SpectraError::invalid_parameter(
            "s",
            format!("submatrix size must lie in 1..={}, got {}", n, s),
        ));
    }

    let count = binomial(n, s)
        .and_then(|c| usize::try_from(c).ok())
        .and_then(|c| c.checked_mul(s))
        .ok_or_else(|| {
            SpectraError::invalid_parameter(
                "s",
                format!("C({}, {}) submatrix spectra do not fit in memory", n, s),
            )
        })?;

    let mut values = Vec::new();
    values.try_reserve_exact(count).map_err(|_| {
        SpectraError::invalid_parameter(
            "s",
            format!("cannot allocate {} eigenvalues for C({}, {})", count, n, s),
        )
    })?;
    for subset in IndexSubsets::new(n, s) {
        values.extend(eigenvalues_descending(&principal_submatrix(matrix, &subset)));
    }
    sort_descending(&mut values);
    Ok(values)
}
