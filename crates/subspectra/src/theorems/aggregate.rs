//! Theorem 1.4: aggregate bounds over all (n−1)-sized principal submatrices.
//!
//! With λ the spectrum of A (descending, 1-indexed) and μ_{k,j} the j-th
//! eigenvalue of A with row/column k deleted, for 1 ≤ l ≤ r ≤ n−1:
//!
//! ```text
//! (r−l+1)·λ_l + (n−1)·Σ_{j=l}^{r} λ_{j+1}
//!     ≤ Σ_k Σ_{j=l}^{r} μ_{k,j} ≤
//! (n−1)·Σ_{j=l}^{r} λ_j + (r−l+1)·λ_{r+1}
//! ```

use super::{CheckOutcome, Theorem};
use crate::error::{Result, SpectraError};
use crate::linalg::eigenvalues_descending;
use crate::submatrix::deleted_index_spectra;
use crate::utils::window_sum;
use nalgebra::DMatrix;
use num_complex::Complex64;
use serde::Serialize;

/// Outcome of one aggregate bounds check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateBoundsResult {
    /// Matrix dimension
    pub n: usize,
    /// Window start (1-indexed)
    pub l: usize,
    /// Window end (1-indexed)
    pub r: usize,
    /// Whether `lower_bound - ε ≤ observed_sum ≤ upper_bound + ε`
    pub passed: bool,
    /// Σ_k Σ_{j=l}^{r} μ_{k,j}
    pub observed_sum: f64,
    /// Lower bound
    pub lower_bound: f64,
    /// Upper bound
    pub upper_bound: f64,
    /// max(0, lower − observed, observed − upper) when failing, else 0
    pub violation: f64,
}

impl CheckOutcome for AggregateBoundsResult {
    fn theorem(&self) -> Theorem {
        Theorem::AggregateBounds
    }

    fn passed(&self) -> bool {
        self.passed
    }

    fn violation(&self) -> f64 {
        self.violation
    }
}

pub(crate) fn validate_window(n: usize, l: usize, r: usize) -> Result<()> {
    if n < 2 {
        return Err(SpectraError::invalid_parameter("n", "must be >= 2"));
    }
    if l < 1 || l > r || r > n - 1 {
        return Err(SpectraError::invalid_parameter(
            "window",
            format!("need 1 <= l <= r <= {}, got l={} r={}", n - 1, l, r),
        ));
    }
    Ok(())
}

fn square_dimension(matrix: &DMatrix<Complex64>) -> Result<usize> {
    let n = matrix.nrows();
    if matrix.ncols() != n {
        return Err(SpectraError::dimension_mismatch(n, matrix.ncols()));
    }
    Ok(n)
}

fn evaluate_window(
    lambdas: &[f64],
    spectra: &[Vec<f64>],
    l: usize,
    r: usize,
    tolerance: f64,
) -> AggregateBoundsResult {
    let n = lambdas.len();
    let width = (r - l + 1) as f64;
    let degree = (n - 1) as f64;

    let observed_sum: f64 = spectra.iter().map(|mu| window_sum(mu, l - 1, r - 1)).sum();

    // λ_{j+1} for j = l..=r is lambdas[l..=r] in 0-indexed terms
    let lower_bound = width * lambdas[l - 1] + degree * window_sum(lambdas, l, r);
    let upper_bound = degree * window_sum(lambdas, l - 1, r - 1) + width * lambdas[r];

    let passed =
        lower_bound - tolerance <= observed_sum && observed_sum <= upper_bound + tolerance;
    let violation = if passed {
        0.0
    } else {
        (lower_bound - observed_sum)
            .max(observed_sum - upper_bound)
            .max(0.0)
    };

    AggregateBoundsResult {
        n,
        l,
        r,
        passed,
        observed_sum,
        lower_bound,
        upper_bound,
        violation,
    }
}

/// Check Theorem 1.4 for a given Hermitian matrix and 1-indexed window `[l, r]`.
pub fn aggregate_bounds_for(
    matrix: &DMatrix<Complex64>,
    l: usize,
    r: usize,
    tolerance: f64,
) -> Result<AggregateBoundsResult> {
    let n = square_dimension(matrix)?;
    validate_window(n, l, r)?;

    let lambdas = eigenvalues_descending(matrix);
    let spectra = deleted_index_spectra(matrix);
    Ok(evaluate_window(&lambdas, &spectra, l, r, tolerance))
}

/// Evaluate Theorem 1.4 for many windows of one matrix.
///
/// Windows run over `1 ≤ l ≤ r ≤ n−1` in row-major order and every
/// `stride`-th one is kept; `None` uses `max(1, n²/12)`, which keeps about a
/// dozen windows regardless of n. The n submatrix spectra are computed once.
pub fn aggregate_window_sweep(
    matrix: &DMatrix<Complex64>,
    stride: Option<usize>,
    tolerance: f64,
) -> Result<Vec<AggregateBoundsResult>> {
    let n = square_dimension(matrix)?;
    if n < 2 {
        return Err(SpectraError::invalid_parameter("n", "must be >= 2"));
    }
    let stride = stride.unwrap_or((n * n) / 12).max(1);

    let lambdas = eigenvalues_descending(matrix);
    let spectra = deleted_index_spectra(matrix);

    Ok((1..n)
        .flat_map(|l| (l..n).map(move |r| (l, r)))
        .step_by(stride)
        .map(|(l, r)| evaluate_window(&lambdas, &spectra, l, r, tolerance))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::diagonal_matrix;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_diagonal_window_one() {
        let m = diagonal_matrix(&[4.0, 3.0, 2.0, 1.0]);
        let res = aggregate_bounds_for(&m, 1, 1, 1e-7).unwrap();
        assert!(res.passed);
        assert_eq!(res.violation, 0.0);
        assert_abs_diff_eq!(res.observed_sum, 15.0, epsilon = 1e-12);
        assert_abs_diff_eq!(res.lower_bound, 13.0, epsilon = 1e-12);
        assert_abs_diff_eq!(res.upper_bound, 15.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_bad_window() {
        let m = diagonal_matrix(&[4.0, 3.0, 2.0, 1.0]);
        assert!(aggregate_bounds_for(&m, 0, 1, 1e-7).is_err());
        assert!(aggregate_bounds_for(&m, 3, 2, 1e-7).is_err());
        assert!(aggregate_bounds_for(&m, 1, 4, 1e-7).is_err());
    }

    #[test]
    fn test_reports_violation_when_bounds_broken() {
        // Shifting the observed sum by hand must trip the upper bound.
        let lambdas = [4.0, 3.0, 2.0, 1.0];
        let spectra = vec![vec![30.0, 2.0, 1.0], vec![4.0, 2.0, 1.0]];
        let res = evaluate_window(&lambdas, &spectra, 1, 1, 1e-7);
        assert!(!res.passed);
        assert_abs_diff_eq!(res.violation, 34.0 - 15.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sweep_covers_all_windows_with_unit_stride() {
        let m = diagonal_matrix(&[5.0, 3.0, 2.0, 0.0, -1.0]);
        let results = aggregate_window_sweep(&m, Some(1), 1e-7).unwrap();
        assert_eq!(results.len(), 10);
        assert_eq!((results[0].l, results[0].r), (1, 1));
        assert_eq!((results[9].l, results[9].r), (4, 4));
        assert!(results.iter().all(|r| r.passed));
    }

    #[test]
    fn test_sweep_default_stride() {
        let m = diagonal_matrix(&[6.0, 5.0, 4.0, 3.0, 2.0, 1.0, 0.0]);
        // 21 windows, stride 49 / 12 = 4
        let results = aggregate_window_sweep(&m, None, 1e-7).unwrap();
        assert_eq!(results.len(), 6);
    }
}
