//! Checkers for the eigenvalue inequalities.
//!
//! | Statement | Checker | Compares |
//! |-----------|---------|----------|
//! | Theorem 1.4 | [`aggregate_bounds_for`] | window sums over all (n−1)-submatrices |
//! | Theorem 2.2 | [`weighted_projection_for`] | window sum of a rank-one compression |
//! | Theorem 4.1 | [`hierarchy_for`] | replicated Xₘ(A) against replicated Xₖ(A) |
//! | Lemma 3.1 | [`polynomial_lemma_for`] | compressed spectrum against a weighted polynomial |
//!
//! Each checker is a pure function of its input data. A statement that does
//! not hold within tolerance is reported through `passed = false`; `Err` is
//! reserved for malformed parameters.

pub mod aggregate;
pub mod hierarchy;
pub mod polynomial;
pub mod statement;
pub mod weighted;

pub use aggregate::{aggregate_bounds_for, aggregate_window_sweep, AggregateBoundsResult};
pub use hierarchy::{hierarchy_for, HierarchyResult};
pub use polynomial::{polynomial_lemma_for, PolynomialLemmaResult, SecularPolynomial};
pub use statement::Theorem;
pub use weighted::{weighted_projection_for, WeightedProjectionResult};

/// Common view over checker results
pub trait CheckOutcome {
    /// Statement this result refers to
    fn theorem(&self) -> Theorem;

    /// Whether the statement held within tolerance
    fn passed(&self) -> bool;

    /// How far outside the bound the observation fell; 0 when passed
    fn violation(&self) -> f64;
}
