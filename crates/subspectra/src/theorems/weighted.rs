//! Theorem 2.2: weighted bounds for a rank-one compression.
//!
//! With λ (descending) the spectrum of A, w the weights of u in A's
//! eigenbasis, μ the spectrum of A compressed onto u⊥, and 0-indexed
//! `l ≤ r ≤ n−2`:
//!
//! ```text
//! U_l     = Σ_{i≥l} w_i
//! L_{r+1} = Σ_{i≤r+1} w_i
//! lhs = Σ_{j=l+1}^{r+1} λ_j + Σ_{j=l+1}^{r+1} (w_j / L_{r+1})(λ_l − λ_j)
//! rhs = Σ_{j=l}^{r} λ_j − Σ_{j=l}^{r} (w_j / U_l)(λ_j − λ_{r+1})
//! lhs ≤ Σ_{j=l}^{r} μ_j ≤ rhs
//! ```
//!
//! When either weight mass falls below the configured floor the bound is
//! undefined and the check passes trivially with every quantity zero.

use super::{CheckOutcome, Theorem};
use crate::config::Tolerances;
use crate::error::{Result, SpectraError};
use crate::projection::{ProjectionMode, ProjectionSample};
use crate::utils::window_sum;
use serde::Serialize;

/// Outcome of one weighted projection check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedProjectionResult {
    /// Matrix dimension
    pub n: usize,
    /// How the sample was drawn
    pub mode: ProjectionMode,
    /// Window start (0-indexed)
    pub l: usize,
    /// Window end as requested (0-indexed)
    pub requested_r: usize,
    /// Window end actually used
    pub r: usize,
    /// `r = n−1` was lowered to `n−2`
    pub window_clamped: bool,
    /// A weight mass vanished and the trivial pass was taken
    pub short_circuited: bool,
    /// Whether `lhs − ε ≤ observed_sum ≤ rhs + ε`
    pub passed: bool,
    /// Σ_{j=l}^{r} μ_j
    pub observed_sum: f64,
    /// Lower bound
    pub lhs: f64,
    /// Upper bound
    pub rhs: f64,
    /// max(0, lhs − observed, observed − rhs) when failing, else 0
    pub violation: f64,
}

impl CheckOutcome for WeightedProjectionResult {
    fn theorem(&self) -> Theorem {
        Theorem::WeightedProjection
    }

    fn passed(&self) -> bool {
        self.passed
    }

    fn violation(&self) -> f64 {
        self.violation
    }
}

/// Validate a 0-indexed window and return the effective (possibly clamped) end.
pub(crate) fn effective_window(n: usize, l: usize, r: usize) -> Result<usize> {
    if n < 2 {
        return Err(SpectraError::invalid_parameter("n", "must be >= 2"));
    }
    if r > n - 1 {
        return Err(SpectraError::invalid_parameter(
            "r",
            format!("must be <= {}, got {}", n - 1, r),
        ));
    }
    let r_eff = r.min(n - 2);
    if l > r_eff {
        return Err(SpectraError::invalid_parameter(
            "l",
            format!("must be <= {} (effective r), got {}", r_eff, l),
        ));
    }
    Ok(r_eff)
}

/// Check Theorem 2.2 on a projection sample with 0-indexed window `[l, r]`.
///
/// `r = n−1` is accepted and lowered to `n−2`; the result records this in
/// `window_clamped`.
pub fn weighted_projection_for(
    sample: &ProjectionSample,
    l: usize,
    r: usize,
    tolerances: &Tolerances,
) -> Result<WeightedProjectionResult> {
    let n = sample.dimension();
    let r_eff = effective_window(n, l, r)?;
    if sample.weights.len() != n {
        return Err(SpectraError::dimension_mismatch(n, sample.weights.len()));
    }
    if sample.projected.len() + 1 != n {
        return Err(SpectraError::dimension_mismatch(n - 1, sample.projected.len()));
    }

    let lambda = &sample.eigenvalues;
    let w = &sample.weights;
    let mu = &sample.projected;

    let mut result = WeightedProjectionResult {
        n,
        mode: sample.mode,
        l,
        requested_r: r,
        r: r_eff,
        window_clamped: r_eff != r,
        short_circuited: false,
        passed: true,
        observed_sum: 0.0,
        lhs: 0.0,
        rhs: 0.0,
        violation: 0.0,
    };

    let upper_mass: f64 = w[l..].iter().sum();
    let lower_mass: f64 = w[..=r_eff + 1].iter().sum();
    if upper_mass < tolerances.weight_mass_floor || lower_mass < tolerances.weight_mass_floor {
        result.short_circuited = true;
        return Ok(result);
    }

    let observed_sum = window_sum(mu, l, r_eff);

    let tail = lambda[r_eff + 1];
    let rhs = window_sum(lambda, l, r_eff)
        - (l..=r_eff)
            .map(|j| w[j] / upper_mass * (lambda[j] - tail))
            .sum::<f64>();

    let head = lambda[l];
    let lhs = window_sum(lambda, l + 1, r_eff + 1)
        + (l + 1..=r_eff + 1)
            .map(|j| w[j] / lower_mass * (head - lambda[j]))
            .sum::<f64>();

    let eps = tolerances.weighted;
    let passed = lhs - eps <= observed_sum && observed_sum <= rhs + eps;
    let violation = if passed {
        0.0
    } else {
        (lhs - observed_sum).max(observed_sum - rhs).max(0.0)
    };

    result.passed = passed;
    result.observed_sum = observed_sum;
    result.lhs = lhs;
    result.rhs = rhs;
    result.violation = violation;
    Ok(result)
}
