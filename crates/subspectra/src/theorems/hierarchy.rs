//! Theorem 4.1: spectral hierarchy.
//!
//! For 1 ≤ k < m < n, `C(m−1, k−1)` copies of Xₘ(A) majorize
//! `C(n−k, m−k)` copies of Xₖ(A): the descending prefix sums of the left
//! multiset dominate those of the right, with equal totals.

use super::{CheckOutcome, Theorem};
use crate::error::{Result, SpectraError};
use crate::submatrix::all_size_s_spectra;
use crate::utils::{binomial, repeat_each, running_difference};
use nalgebra::DMatrix;
use num_complex::Complex64;
use serde::Serialize;

/// Outcome of one hierarchy check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyResult {
    /// Matrix dimension
    pub n: usize,
    /// Larger submatrix size
    pub m: usize,
    /// Smaller submatrix size
    pub k: usize,
    /// Whether every prefix difference is ≥ −ε and the totals agree within ε
    pub passed: bool,
    /// `C(m−1, k−1)` copies of Xₘ(A), descending
    pub left: Vec<f64>,
    /// `C(n−k, m−k)` copies of Xₖ(A), descending
    pub right: Vec<f64>,
    /// Smallest prefix-sum difference (left − right)
    pub min_difference: f64,
    /// Difference of the full sums
    pub total_difference: f64,
    /// |min_difference| when failing, else 0
    pub violation: f64,
}

impl CheckOutcome for HierarchyResult {
    fn theorem(&self) -> Theorem {
        Theorem::Hierarchy
    }

    fn passed(&self) -> bool {
        self.passed
    }

    fn violation(&self) -> f64 {
        self.violation
    }
}

pub(crate) fn validate_sizes(n: usize, m: usize, k: usize) -> Result<()> {
    if !(1 <= k && k < m && m < n) {
        return Err(SpectraError::invalid_parameter(
            "sizes",
            format!("need 1 <= k < m < n, got n={} m={} k={}", n, m, k),
        ));
    }
    Ok(())
}

/// Copies `C(a, b)` of a multiset of size `len`, checked for overflow.
fn replication(len: usize, a: usize, b: usize) -> Result<usize> {
    binomial(a, b)
        .and_then(|c| usize::try_from(c).ok())
        .filter(|&c| len.checked_mul(c).is_some())
        .ok_or_else(|| {
            SpectraError::invalid_parameter(
                "sizes",
                format!("C({}, {}) copies of {} values overflow", a, b, len),
            )
        })
}

/// Check Theorem 4.1 for a given Hermitian matrix and sizes `m > k`.
pub fn hierarchy_for(
    matrix: &DMatrix<Complex64>,
    m: usize,
    k: usize,
    tolerance: f64,
) -> Result<HierarchyResult> {
    let n = matrix.nrows();
    validate_sizes(n, m, k)?;

    let x_m = all_size_s_spectra(matrix, m)?;
    let x_k = all_size_s_spectra(matrix, k)?;

    let left = repeat_each(&x_m, replication(x_m.len(), m - 1, k - 1)?);
    let right = repeat_each(&x_k, replication(x_k.len(), n - k, m - k)?);
    if left.len() != right.len() {
        return Err(SpectraError::dimension_mismatch(left.len(), right.len()));
    }

    // Prefix sums of left and right each grow with the sequence length;
    // accumulating their difference keeps the error at the scale of the terms.
    let (min_difference, total_difference) = running_difference(&left, &right);

    let passed = min_difference >= -tolerance && total_difference.abs() < tolerance;
    let violation = if passed { 0.0 } else { min_difference.abs() };

    Ok(HierarchyResult {
        n,
        m,
        k,
        passed,
        left,
        right,
        min_difference,
        total_difference,
        violation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::diagonal_matrix;

    #[test]
    fn test_replicated_lengths_match() {
        let m = diagonal_matrix(&[6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
        let res = hierarchy_for(&m, 4, 2, 1e-7).unwrap();
        assert_eq!(res.left.len(), 180);
        assert_eq!(res.right.len(), 180);
        assert!(res.passed);
        assert_eq!(res.violation, 0.0);
    }

    #[test]
    fn test_diagonal_totals_agree() {
        let m = diagonal_matrix(&[3.0, -1.0, 2.0, 0.5]);
        let res = hierarchy_for(&m, 3, 1, 1e-7).unwrap();
        assert!(res.total_difference.abs() < 1e-10);
        assert!(res.min_difference >= -1e-10);
    }

    #[test]
    fn test_large_sequences_pass_at_tight_tolerance() {
        use crate::sampler::random_hermitian;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        // Sequences of ~4.8e5 values; the running totals reach ~1e5
        for seed in 0..2 {
            let mut rng = StdRng::seed_from_u64(seed);
            let a = random_hermitian(&mut rng, 14);
            let res = hierarchy_for(&a, 7, 4, 1e-7).unwrap();
            assert!(
                res.passed,
                "seed={} min={:e} total={:e}",
                seed, res.min_difference, res.total_difference
            );
            assert!(res.total_difference.abs() < 1e-7);
        }
    }

    #[test]
    fn test_replication_overflow_rejected() {
        assert!(replication(usize::MAX, 10, 5).is_err());
        assert_eq!(replication(4, 3, 1).unwrap(), 3);
    }

    #[test]
    fn test_rejects_bad_sizes() {
        let m = diagonal_matrix(&[3.0, 2.0, 1.0, 0.0]);
        assert!(hierarchy_for(&m, 2, 2, 1e-7).is_err());
        assert!(hierarchy_for(&m, 4, 1, 1e-7).is_err());
        assert!(hierarchy_for(&m, 2, 0, 1e-7).is_err());
    }
}
