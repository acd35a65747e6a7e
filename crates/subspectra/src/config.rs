//! Configuration for the spectral checkers

use crate::error::{Result, SpectraError};
use serde::{Deserialize, Serialize};

/// Pass/fail tolerances for each checker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Slack on both sides of the aggregate (Theorem 1.4) bounds
    pub aggregate: f64,
    /// Slack for the majorization prefix sums and total (Theorem 4.1)
    pub hierarchy: f64,
    /// Slack on both sides of the weighted projection (Theorem 2.2) bounds
    pub weighted: f64,
    /// Maximum normalized polynomial residual (Lemma 3.1)
    pub residual: f64,
    /// Weight mass below which the weighted bound is treated as undefined
    pub weight_mass_floor: f64,
    /// Residual normalization below which the scale is reset to 1
    pub residual_scale_floor: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            aggregate: 1e-7,
            hierarchy: 1e-7,
            weighted: 1e-9,
            residual: 1e-4,
            weight_mass_floor: 1e-12,
            residual_scale_floor: 1e-6,
        }
    }
}

impl Tolerances {
    /// Validate that every tolerance is finite and strictly positive
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("aggregate", self.aggregate),
            ("hierarchy", self.hierarchy),
            ("weighted", self.weighted),
            ("residual", self.residual),
            ("weight_mass_floor", self.weight_mass_floor),
            ("residual_scale_floor", self.residual_scale_floor),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(SpectraError::invalid_config(format!(
                    "tolerance '{}' must be finite and > 0, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Perturbations applied in stress mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StressProfile {
    /// Stress eigenvalues are drawn from `(-value_bound, value_bound)`
    pub value_bound: i32,
    /// Probability of forcing two or three equal adjacent eigenvalues
    pub duplicate_probability: f64,
    /// Probability of forcing one coordinate of u to exactly zero
    pub zero_weight_probability: f64,
    /// Probability of forcing one coordinate of u to `tiny_weight`
    pub tiny_weight_probability: f64,
    /// Value used for the near-zero coordinate
    pub tiny_weight: f64,
}

impl Default for StressProfile {
    fn default() -> Self {
        Self {
            value_bound: 10,
            duplicate_probability: 0.5,
            zero_weight_probability: 0.3,
            tiny_weight_probability: 0.3,
            tiny_weight: 1e-8,
        }
    }
}

impl StressProfile {
    /// Validate probabilities and ranges
    pub fn validate(&self) -> Result<()> {
        if self.value_bound <= 0 {
            return Err(SpectraError::invalid_config("value_bound must be > 0"));
        }
        let probabilities = [
            ("duplicate_probability", self.duplicate_probability),
            ("zero_weight_probability", self.zero_weight_probability),
            ("tiny_weight_probability", self.tiny_weight_probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(SpectraError::invalid_config(format!(
                    "{} must lie in [0, 1], got {}",
                    name, p
                )));
            }
        }
        if self.zero_weight_probability + self.tiny_weight_probability > 1.0 {
            return Err(SpectraError::invalid_config(
                "zero_weight_probability + tiny_weight_probability must be <= 1",
            ));
        }
        if !self.tiny_weight.is_finite() || self.tiny_weight < 0.0 {
            return Err(SpectraError::invalid_config("tiny_weight must be finite and >= 0"));
        }
        Ok(())
    }
}

/// Top-level configuration for [`SpectralVerifier`](crate::SpectralVerifier)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Checker tolerances
    pub tolerances: Tolerances,
    /// Stress-mode perturbation parameters
    pub stress: StressProfile,
    /// Draw the normal-mode projection vector with complex entries
    pub complex_projection: bool,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            tolerances: Tolerances::default(),
            stress: StressProfile::default(),
            complex_projection: true,
            seed: None,
        }
    }
}

impl VerifierConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the tolerances
    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Replace the stress profile
    pub fn with_stress(mut self, stress: StressProfile) -> Self {
        self.stress = stress;
        self
    }

    /// Choose real or complex normal-mode projection vectors
    pub fn with_complex_projection(mut self, complex: bool) -> Self {
        self.complex_projection = complex;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.tolerances.validate()?;
        self.stress.validate()
    }
}
