pub mod audit;
pub mod check;
pub mod describe;
pub mod sweep;

use crate::config::Config;
use anyhow::{Context, Result};
use subspectra::{ProjectionMode, SpectralVerifier};

/// Build a verifier from the loaded configuration
pub fn verifier(config: &Config) -> Result<SpectralVerifier> {
    SpectralVerifier::new(config.verifier.clone()).context("Failed to create verifier")
}

pub fn mode(stress: bool) -> ProjectionMode {
    if stress {
        ProjectionMode::Stress
    } else {
        ProjectionMode::Normal
    }
}
