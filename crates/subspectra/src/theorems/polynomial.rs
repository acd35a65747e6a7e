//! Lemma 3.1: the compressed spectrum as polynomial roots.
//!
//! For λ (descending) and weights w the polynomial
//!
//! ```text
//! P(x) = Σᵢ wᵢ · Πⱼ≠ᵢ (λⱼ − x)
//! ```
//!
//! vanishes at every eigenvalue μ of the compression onto u⊥. Unlike the
//! secular equation it has no denominators, so repeated λ and zero weights
//! are covered too.

use super::{CheckOutcome, Theorem};
use crate::config::Tolerances;
use crate::error::{Result, SpectraError};
use crate::projection::{ProjectionMode, ProjectionSample};
use serde::{Deserialize, Serialize};

/// `P(x) = Σᵢ wᵢ Πⱼ≠ᵢ (λⱼ − x)` held as its defining data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecularPolynomial {
    /// wᵢ
    pub weights: Vec<f64>,
    /// λⱼ
    pub eigenvalues: Vec<f64>,
}

impl SecularPolynomial {
    /// Build from weights and eigenvalues of equal length
    pub fn new(weights: Vec<f64>, eigenvalues: Vec<f64>) -> Result<Self> {
        if weights.len() != eigenvalues.len() {
            return Err(SpectraError::dimension_mismatch(eigenvalues.len(), weights.len()));
        }
        Ok(Self {
            weights,
            eigenvalues,
        })
    }

    /// Degree n − 1 (0 for an empty polynomial)
    pub fn degree(&self) -> usize {
        self.eigenvalues.len().saturating_sub(1)
    }

    /// Evaluate P at `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        self.weights
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                self.eigenvalues
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .fold(w, |acc, (_, &lambda)| acc * (lambda - x))
            })
            .sum()
    }

    /// Evaluate P at each point
    pub fn evaluate_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }
}

/// Outcome of one polynomial lemma check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolynomialLemmaResult {
    /// Matrix dimension
    pub n: usize,
    /// How the sample was drawn
    pub mode: ProjectionMode,
    /// Whether `max_residual` is below the residual tolerance
    pub passed: bool,
    /// λ, descending
    pub eigenvalues: Vec<f64>,
    /// μ, descending
    pub projected_eigenvalues: Vec<f64>,
    /// P, for plotting
    pub polynomial: SecularPolynomial,
    /// Suggested x-range: the spectrum span padded by 10% on both sides
    pub plot_range: (f64, f64),
    /// max |P(μ)| divided by the residual scale
    pub max_residual: f64,
}

impl CheckOutcome for PolynomialLemmaResult {
    fn theorem(&self) -> Theorem {
        Theorem::PolynomialLemma
    }

    fn passed(&self) -> bool {
        self.passed
    }

    fn violation(&self) -> f64 {
        if self.passed {
            0.0
        } else {
            self.max_residual
        }
    }
}

/// `mean(|λ|)^(n−2)` for n > 2, else 1; reset to 1 below `floor`.
fn residual_scale(eigenvalues: &[f64], floor: f64) -> f64 {
    let n = eigenvalues.len();
    if n <= 2 {
        return 1.0;
    }
    let mean_abs = eigenvalues.iter().map(|x| x.abs()).sum::<f64>() / n as f64;
    let scale = mean_abs.powi((n - 2) as i32);
    if scale < floor {
        1.0
    } else {
        scale
    }
}

fn plot_range(eigenvalues: &[f64]) -> (f64, f64) {
    let (top, bottom) = match (eigenvalues.first(), eigenvalues.last()) {
        (Some(&top), Some(&bottom)) => (top, bottom),
        _ => return (-1.0, 1.0),
    };
    let mut padding = (top - bottom) * 0.1;
    if padding == 0.0 {
        padding = 1.0;
    }
    (bottom - padding, top + padding)
}

/// Check Lemma 3.1 on a projection sample.
///
/// Residuals are divided by `mean|λ|^(n−2)`. At high degree this grows more
/// slowly than `|P|` near tightly clustered roots, so normal-mode draws at
/// n ≈ 19–20 exceed the default residual tolerance in roughly 1–2% of trials
/// even though the lemma holds. Raise `Tolerances::residual` for such sizes.
pub fn polynomial_lemma_for(
    sample: &ProjectionSample,
    tolerances: &Tolerances,
) -> Result<PolynomialLemmaResult> {
    let n = sample.dimension();
    if n < 2 {
        return Err(SpectraError::invalid_parameter("n", "must be >= 2"));
    }
    if sample.projected.len() + 1 != n {
        return Err(SpectraError::dimension_mismatch(n - 1, sample.projected.len()));
    }

    let polynomial = SecularPolynomial::new(sample.weights.clone(), sample.eigenvalues.clone())?;
    let scale = residual_scale(&sample.eigenvalues, tolerances.residual_scale_floor);
    let max_residual = polynomial
        .evaluate_many(&sample.projected)
        .into_iter()
        .map(f64::abs)
        .fold(0.0, f64::max)
        / scale;

    Ok(PolynomialLemmaResult {
        n,
        mode: sample.mode,
        passed: max_residual < tolerances.residual,
        eigenvalues: sample.eigenvalues.clone(),
        projected_eigenvalues: sample.projected.clone(),
        plot_range: plot_range(&sample.eigenvalues),
        polynomial,
        max_residual,
    })
}
