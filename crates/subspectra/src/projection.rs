//! Rank-one compressions: a spectrum λ, weights w and the spectrum μ of the
//! matrix compressed onto u⊥.
//!
//! Normal mode samples a Hermitian A and a random u; the weights are the
//! squared coordinates of u in A's eigenbasis. Stress mode skips A and works
//! with `diag(λ)` directly, where λ has forced repeats and u has a forced zero
//! or near-zero coordinate.

use crate::config::StressProfile;
use crate::error::{Result, SpectraError};
use crate::linalg::{
    compress, diagonal_matrix, eigenvalues_descending, hermitian_eigen, orthogonal_complement,
    projection_weights, qr_complement,
};
use crate::sampler::{
    adversarial_weight_vector, degenerate_spectrum, random_hermitian, random_unit_vector,
    SpectrumValues,
};
use nalgebra::DVector;
use num_complex::Complex64;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a projection sample is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Random Hermitian matrix and random direction
    Normal,
    /// Repeated eigenvalues and vanishing weights
    Stress,
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionMode::Normal => write!(f, "normal"),
            ProjectionMode::Stress => write!(f, "stress"),
        }
    }
}

/// Spectrum, weights and compressed spectrum of one draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSample {
    /// How the sample was produced
    pub mode: ProjectionMode,
    /// λ, length n, descending
    pub eigenvalues: Vec<f64>,
    /// w, length n, nonnegative, sums to 1
    pub weights: Vec<f64>,
    /// μ, length n - 1, descending
    pub projected: Vec<f64>,
}

impl ProjectionSample {
    /// Build a sample from precomputed parts, checking lengths and ordering.
    pub fn from_parts(
        mode: ProjectionMode,
        eigenvalues: Vec<f64>,
        weights: Vec<f64>,
        projected: Vec<f64>,
    ) -> Result<Self> {
        let n = eigenvalues.len();
        if n < 2 {
            return Err(SpectraError::invalid_parameter("eigenvalues", "need at least 2"));
        }
        if weights.len() != n {
            return Err(SpectraError::dimension_mismatch(n, weights.len()));
        }
        if projected.len() != n - 1 {
            return Err(SpectraError::dimension_mismatch(n - 1, projected.len()));
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(SpectraError::invalid_parameter(
                "weights",
                "must be finite and nonnegative",
            ));
        }
        let descending = |v: &[f64]| v.windows(2).all(|w| w[0] >= w[1]);
        if !descending(&eigenvalues) || !descending(&projected) {
            return Err(SpectraError::invalid_parameter(
                "eigenvalues",
                "spectra must be sorted descending",
            ));
        }
        Ok(Self {
            mode,
            eigenvalues,
            weights,
            projected,
        })
    }

    /// Normal mode: random Hermitian A, random unit u, weights `|Vᴴu|²`,
    /// μ = spectrum of `V⊥ᴴ A V⊥` with V⊥ from a full QR of u.
    pub fn normal<R: Rng + ?Sized>(rng: &mut R, n: usize, complex: bool) -> Self {
        let a = random_hermitian(rng, n);
        let eigen = hermitian_eigen(&a);
        let u = random_unit_vector(rng, n, complex);

        let weights = projection_weights(&eigen.eigenvectors, &u);
        let perp = qr_complement(&u);
        let projected = eigenvalues_descending(&compress(&a, &perp));

        Self {
            mode: ProjectionMode::Normal,
            eigenvalues: eigen.eigenvalues,
            weights,
            projected,
        }
    }

    /// Stress mode: λ from [`degenerate_spectrum`], u from
    /// [`adversarial_weight_vector`], weights `u²`, μ = spectrum of
    /// `V⊥ᵀ diag(λ) V⊥` with V⊥ from [`orthogonal_complement`].
    pub fn stress<R: Rng + ?Sized>(
        rng: &mut R,
        n: usize,
        profile: &StressProfile,
        values: SpectrumValues,
    ) -> Self {
        let eigenvalues = degenerate_spectrum(rng, n, profile, values);
        let u_real = adversarial_weight_vector(rng, n, profile);

        let weights: Vec<f64> = u_real.iter().map(|x| x * x).collect();
        let u: DVector<Complex64> = u_real.map(|x| Complex64::new(x, 0.0));
        let perp = orthogonal_complement(&u);
        let projected = eigenvalues_descending(&compress(&diagonal_matrix(&eigenvalues), &perp));

        Self {
            mode: ProjectionMode::Stress,
            eigenvalues,
            weights,
            projected,
        }
    }

    /// Matrix dimension n
    pub fn dimension(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Total weight mass; 1 up to rounding for sampled data
    pub fn weight_mass(&self) -> f64 {
        self.weights.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn interlaces(lambda: &[f64], mu: &[f64]) -> bool {
        // Cauchy interlacing: λ_j ≥ μ_j ≥ λ_{j+1}
        mu.iter()
            .enumerate()
            .all(|(j, &m)| lambda[j] + 1e-9 >= m && m + 1e-9 >= lambda[j + 1])
    }

    #[test]
    fn test_normal_sample_shapes() {
        let mut rng = StdRng::seed_from_u64(21);
        let sample = ProjectionSample::normal(&mut rng, 7, true);
        assert_eq!(sample.mode, ProjectionMode::Normal);
        assert_eq!(sample.dimension(), 7);
        assert_eq!(sample.weights.len(), 7);
        assert_eq!(sample.projected.len(), 6);
        assert_abs_diff_eq!(sample.weight_mass(), 1.0, epsilon = 1e-12);
        assert!(interlaces(&sample.eigenvalues, &sample.projected));
    }

    #[test]
    fn test_stress_sample_interlaces() {
        let mut rng = StdRng::seed_from_u64(22);
        let profile = StressProfile::default();
        for _ in 0..25 {
            let sample = ProjectionSample::stress(&mut rng, 6, &profile, SpectrumValues::Continuous);
            assert_eq!(sample.projected.len(), 5);
            assert_abs_diff_eq!(sample.weight_mass(), 1.0, epsilon = 1e-12);
            assert!(interlaces(&sample.eigenvalues, &sample.projected));
        }
    }

    #[test]
    fn test_stress_zero_weight_keeps_eigenvalue() {
        let mut rng = StdRng::seed_from_u64(23);
        let profile = StressProfile {
            zero_weight_probability: 1.0,
            tiny_weight_probability: 0.0,
            duplicate_probability: 0.0,
            ..Default::default()
        };
        let sample = ProjectionSample::stress(&mut rng, 5, &profile, SpectrumValues::Continuous);
        let zero = sample.weights.iter().position(|&w| w == 0.0).unwrap();
        let kept = sample.eigenvalues[zero];
        assert!(sample.projected.iter().any(|&m| (m - kept).abs() < 1e-9));
    }

    #[test]
    fn test_from_parts_validation() {
        let ok = ProjectionSample::from_parts(
            ProjectionMode::Stress,
            vec![3.0, 1.0],
            vec![0.5, 0.5],
            vec![2.0],
        );
        assert!(ok.is_ok());

        let short = ProjectionSample::from_parts(
            ProjectionMode::Stress,
            vec![3.0, 1.0],
            vec![1.0],
            vec![2.0],
        );
        assert!(matches!(short, Err(SpectraError::DimensionMismatch { .. })));

        let unsorted = ProjectionSample::from_parts(
            ProjectionMode::Stress,
            vec![1.0, 3.0],
            vec![0.5, 0.5],
            vec![2.0],
        );
        assert!(unsorted.is_err());
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(ProjectionMode::Normal.to_string(), "normal");
        assert_eq!(ProjectionMode::Stress.to_string(), "stress");
    }
}
