//! # Subspectra
//!
//! Numerical verification of eigenvalue inequalities relating a Hermitian
//! matrix to its principal submatrices and to its compressions onto the
//! orthogonal complement of a vector.
//!
//! ## Checked statements
//!
//! - **Theorem 1.4** (aggregate bounds): window sums of the eigenvalues of all
//!   n deleted-index submatrices lie between two expressions in λ.
//! - **Theorem 2.2** (weighted projection): the window sum of the spectrum of a
//!   rank-one compression is bounded using the projection weights.
//! - **Theorem 4.1** (hierarchy): replicated spectra of all size-m principal
//!   submatrices majorize replicated spectra of all size-k ones.
//! - **Lemma 3.1** (polynomial roots): the compressed spectrum is the root set
//!   of `Σᵢ wᵢ Πⱼ≠ᵢ (λⱼ − x)`.
//!
//! ## Layers
//!
//! ```text
//! SpectralVerifier ── draws inputs, logs, audits
//!        │
//!        ▼
//! theorems::*_for ─── pure checkers on caller data
//!        │
//!        ▼
//! submatrix / projection / linalg / sampler
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use subspectra::{ProjectionMode, SpectralVerifier};
//!
//! let mut verifier = SpectralVerifier::with_seed(7);
//!
//! let bounds = verifier.check_aggregate_bounds(5, 2, 3).unwrap();
//! assert!(bounds.passed);
//!
//! let weighted = verifier
//!     .check_weighted_projection(6, 1, 3, ProjectionMode::Normal)
//!     .unwrap();
//! assert!(weighted.lhs <= weighted.rhs + 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod audit;
pub mod config;
pub mod error;
pub mod linalg;
pub mod projection;
pub mod sampler;
pub mod submatrix;
pub mod theorems;
pub mod utils;
pub mod verifier;

pub use audit::{AuditPlan, AuditReport, AuditRow, AuditTarget};
pub use config::{StressProfile, Tolerances, VerifierConfig};
pub use error::{Result, SpectraError};
pub use projection::{ProjectionMode, ProjectionSample};
pub use sampler::SpectrumValues;
pub use submatrix::{all_size_s_spectra, deleted_index_spectra, principal_submatrix_eigenvalues};
pub use theorems::{
    aggregate_bounds_for, aggregate_window_sweep, hierarchy_for, polynomial_lemma_for,
    weighted_projection_for, AggregateBoundsResult, CheckOutcome, HierarchyResult,
    PolynomialLemmaResult, SecularPolynomial, Theorem, WeightedProjectionResult,
};
pub use verifier::SpectralVerifier;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::audit::*;
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::projection::*;
    pub use crate::theorems::*;
    pub use crate::verifier::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_version() {
        let version = env!("CARGO_PKG_VERSION");
        assert!(!version.is_empty());
    }
}
