//! Randomized entry points.
//!
//! [`SpectralVerifier`] owns a configuration and a random generator, draws
//! the inputs each statement needs and delegates to the deterministic
//! checkers in [`crate::theorems`]. Parameters are validated before anything
//! is drawn, so a rejected call leaves the generator untouched.

use crate::config::VerifierConfig;
use crate::error::{Result, SpectraError};
use crate::projection::{ProjectionMode, ProjectionSample};
use crate::sampler::{random_hermitian, SpectrumValues};
use crate::theorems::aggregate::validate_window;
use crate::theorems::hierarchy::validate_sizes;
use crate::theorems::weighted::effective_window;
use crate::theorems::{
    aggregate_bounds_for, aggregate_window_sweep, hierarchy_for, polynomial_lemma_for,
    weighted_projection_for, AggregateBoundsResult, CheckOutcome, HierarchyResult,
    PolynomialLemmaResult, WeightedProjectionResult,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

/// Draws random inputs and runs the checkers on them
#[derive(Debug, Clone)]
pub struct SpectralVerifier<R = StdRng> {
    config: VerifierConfig,
    rng: R,
}

impl SpectralVerifier<StdRng> {
    /// Create a verifier, seeding from `config.seed` or from entropy.
    pub fn new(config: VerifierConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::from_rng(config, rng)
    }

    /// Default configuration with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: VerifierConfig::default().with_seed(seed),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SpectralVerifier<StdRng> {
    fn default() -> Self {
        Self {
            config: VerifierConfig::default(),
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> SpectralVerifier<R> {
    /// Use a caller-supplied generator; `config.seed` is ignored.
    pub fn from_rng(config: VerifierConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    /// Active configuration
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// The underlying generator
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Theorem 1.4 on a fresh random Hermitian matrix, 1-indexed window `[l, r]`.
    pub fn check_aggregate_bounds(
        &mut self,
        n: usize,
        l: usize,
        r: usize,
    ) -> Result<AggregateBoundsResult> {
        validate_window(n, l, r)?;
        let a = random_hermitian(&mut self.rng, n);
        let result = aggregate_bounds_for(&a, l, r, self.config.tolerances.aggregate)?;
        debug!(
            n,
            l,
            r,
            observed = result.observed_sum,
            lower = result.lower_bound,
            upper = result.upper_bound,
            passed = result.passed,
            "aggregate bounds"
        );
        report(&result);
        Ok(result)
    }

    /// Theorem 1.4 over every `stride`-th window `(l, r)` of one random matrix.
    pub fn check_window_sweep(
        &mut self,
        n: usize,
        stride: Option<usize>,
    ) -> Result<Vec<AggregateBoundsResult>> {
        if n < 2 {
            return Err(SpectraError::invalid_parameter("n", "must be >= 2"));
        }
        let a = random_hermitian(&mut self.rng, n);
        let results = aggregate_window_sweep(&a, stride, self.config.tolerances.aggregate)?;
        debug!(
            n,
            windows = results.len(),
            failed = results.iter().filter(|r| !r.passed).count(),
            "window sweep"
        );
        results.iter().for_each(report);
        Ok(results)
    }

    /// Theorem 4.1 on a fresh random Hermitian matrix.
    pub fn check_hierarchy(&mut self, n: usize, m: usize, k: usize) -> Result<HierarchyResult> {
        validate_sizes(n, m, k)?;
        let a = random_hermitian(&mut self.rng, n);
        let result = hierarchy_for(&a, m, k, self.config.tolerances.hierarchy)?;
        debug!(
            n,
            m,
            k,
            length = result.left.len(),
            min_difference = result.min_difference,
            total_difference = result.total_difference,
            passed = result.passed,
            "hierarchy"
        );
        report(&result);
        Ok(result)
    }

    /// Draw a projection sample in the given mode.
    ///
    /// Stress spectra use `values`; normal mode ignores it.
    pub fn sample_projection(
        &mut self,
        n: usize,
        mode: ProjectionMode,
        values: SpectrumValues,
    ) -> Result<ProjectionSample> {
        if n < 2 {
            return Err(SpectraError::invalid_parameter("n", "must be >= 2"));
        }
        Ok(match mode {
            ProjectionMode::Normal => {
                ProjectionSample::normal(&mut self.rng, n, self.config.complex_projection)
            }
            ProjectionMode::Stress => {
                ProjectionSample::stress(&mut self.rng, n, &self.config.stress, values)
            }
        })
    }

    /// Theorem 2.2 on a fresh sample, 0-indexed window `[l, r]`.
    pub fn check_weighted_projection(
        &mut self,
        n: usize,
        l: usize,
        r: usize,
        mode: ProjectionMode,
    ) -> Result<WeightedProjectionResult> {
        effective_window(n, l, r)?;
        let sample = self.sample_projection(n, mode, SpectrumValues::Continuous)?;
        let result = weighted_projection_for(&sample, l, r, &self.config.tolerances)?;
        if result.window_clamped {
            debug!(n, requested = r, used = result.r, "weighted window end clamped");
        }
        debug!(
            n,
            l,
            r = result.r,
            %mode,
            observed = result.observed_sum,
            lhs = result.lhs,
            rhs = result.rhs,
            short_circuited = result.short_circuited,
            passed = result.passed,
            "weighted projection"
        );
        report(&result);
        Ok(result)
    }

    /// Lemma 3.1 on a fresh sample.
    pub fn check_polynomial_lemma(
        &mut self,
        n: usize,
        mode: ProjectionMode,
    ) -> Result<PolynomialLemmaResult> {
        let sample = self.sample_projection(n, mode, SpectrumValues::Integer)?;
        let result = polynomial_lemma_for(&sample, &self.config.tolerances)?;
        debug!(
            n,
            %mode,
            max_residual = result.max_residual,
            passed = result.passed,
            "polynomial lemma"
        );
        report(&result);
        Ok(result)
    }
}

fn report<O: CheckOutcome>(outcome: &O) {
    if !outcome.passed() {
        warn!(
            theorem = outcome.theorem().label(),
            violation = outcome.violation(),
            "check failed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut a = SpectralVerifier::with_seed(42);
        let mut b = SpectralVerifier::with_seed(42);
        let ra = a.check_aggregate_bounds(5, 2, 3).unwrap();
        let rb = b.check_aggregate_bounds(5, 2, 3).unwrap();
        assert_eq!(ra, rb);

        let wa = a.check_weighted_projection(6, 1, 3, ProjectionMode::Stress).unwrap();
        let wb = b.check_weighted_projection(6, 1, 3, ProjectionMode::Stress).unwrap();
        assert_eq!(wa, wb);
    }

    #[test]
    fn test_rejected_call_does_not_draw() {
        let mut a = SpectralVerifier::with_seed(9);
        let mut b = SpectralVerifier::with_seed(9);
        assert!(a.check_aggregate_bounds(4, 3, 2).is_err());
        assert!(a.check_hierarchy(4, 2, 2).is_err());
        assert!(a.check_weighted_projection(4, 0, 4, ProjectionMode::Normal).is_err());
        assert!(a.check_polynomial_lemma(1, ProjectionMode::Normal).is_err());
        assert!(a.check_window_sweep(1, None).is_err());
        assert!(a.check_window_sweep(0, Some(3)).is_err());

        let ra = a.check_hierarchy(5, 3, 2).unwrap();
        let rb = b.check_hierarchy(5, 3, 2).unwrap();
        assert_eq!(ra, rb);
    }

    #[test]
    fn test_window_sweep_is_seeded() {
        let mut a = SpectralVerifier::with_seed(31);
        let mut b = SpectralVerifier::with_seed(31);
        let ra = a.check_window_sweep(6, Some(1)).unwrap();
        assert_eq!(ra.len(), 15);
        assert!(ra.iter().all(|r| r.passed));
        assert_eq!(ra, b.check_window_sweep(6, Some(1)).unwrap());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = VerifierConfig::default();
        config.tolerances.residual = -1.0;
        assert!(SpectralVerifier::new(config).is_err());
    }

    #[test]
    fn test_new_uses_config_seed() {
        let mut a = SpectralVerifier::new(VerifierConfig::default().with_seed(5)).unwrap();
        let mut b = SpectralVerifier::with_seed(5);
        assert_eq!(
            a.check_polynomial_lemma(5, ProjectionMode::Normal).unwrap(),
            b.check_polynomial_lemma(5, ProjectionMode::Normal).unwrap()
        );
    }

    #[test]
    fn test_random_checks_pass() {
        let mut verifier = SpectralVerifier::with_seed(2024);
        for n in 3..8 {
            assert!(verifier.check_aggregate_bounds(n, 1, n - 1).unwrap().passed);
            assert!(verifier
                .check_weighted_projection(n, 0, n - 2, ProjectionMode::Normal)
                .unwrap()
                .passed);
            assert!(verifier.check_polynomial_lemma(n, ProjectionMode::Normal).unwrap().passed);
        }
        assert!(verifier.check_hierarchy(6, 4, 2).unwrap().passed);
    }

    #[test]
    fn test_sample_projection_respects_mode() {
        let mut verifier = SpectralVerifier::with_seed(3);
        let s = verifier
            .sample_projection(5, ProjectionMode::Stress, SpectrumValues::Integer)
            .unwrap();
        assert_eq!(s.mode, ProjectionMode::Stress);
        assert!(s.eigenvalues.iter().all(|x| x.fract() == 0.0));
    }
}
