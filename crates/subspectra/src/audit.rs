//! Dimension-by-dimension audits.
//!
//! An audit runs many randomized checks of one statement at each dimension
//! in a range, drawing the window or submatrix sizes at random, and keeps
//! per-dimension failure counts and worst-case discrepancies.

use crate::error::{Result, SpectraError};
use crate::projection::ProjectionMode;
use crate::theorems::{CheckOutcome, Theorem};
use crate::verifier::SpectralVerifier;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Statement (and draw mode) to audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "theorem", rename_all = "snake_case")]
pub enum AuditTarget {
    /// Theorem 1.4, l ∈ [1, n−1], r ∈ [l, n−1]
    AggregateBounds,
    /// Theorem 4.1, m ∈ [2, n−1], k ∈ [1, m−1]
    Hierarchy,
    /// Theorem 2.2, l ∈ [0, n−2], r ∈ [l, n−2]
    WeightedProjection {
        /// Draw mode
        mode: ProjectionMode,
    },
    /// Lemma 3.1
    PolynomialLemma {
        /// Draw mode
        mode: ProjectionMode,
    },
}

impl AuditTarget {
    /// Statement audited
    pub fn theorem(&self) -> Theorem {
        match self {
            AuditTarget::AggregateBounds => Theorem::AggregateBounds,
            AuditTarget::Hierarchy => Theorem::Hierarchy,
            AuditTarget::WeightedProjection { .. } => Theorem::WeightedProjection,
            AuditTarget::PolynomialLemma { .. } => Theorem::PolynomialLemma,
        }
    }

    /// Smallest dimension with at least one admissible parameter choice
    pub fn min_dimension(&self) -> usize {
        match self {
            AuditTarget::Hierarchy => 3,
            _ => 2,
        }
    }
}

impl fmt::Display for AuditTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditTarget::WeightedProjection { mode } | AuditTarget::PolynomialLemma { mode } => {
                write!(f, "{} ({})", self.theorem().label(), mode)
            }
            _ => write!(f, "{}", self.theorem().label()),
        }
    }
}

/// Range of dimensions and samples per dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuditPlan {
    /// What to check
    pub target: AuditTarget,
    /// First dimension, inclusive
    pub min_n: usize,
    /// Last dimension, inclusive
    pub max_n: usize,
    /// Trials per dimension
    pub samples_per_dimension: usize,
}

impl AuditPlan {
    /// Create a plan
    pub fn new(target: AuditTarget, min_n: usize, max_n: usize, samples_per_dimension: usize) -> Self {
        Self {
            target,
            min_n,
            max_n,
            samples_per_dimension,
        }
    }

    /// Number of dimensions covered
    pub fn dimensions(&self) -> usize {
        (self.max_n + 1).saturating_sub(self.min_n)
    }

    /// Validate the plan
    pub fn validate(&self) -> Result<()> {
        if self.min_n < self.target.min_dimension() {
            return Err(SpectraError::invalid_parameter(
                "min_n",
                format!(
                    "must be >= {} for {}",
                    self.target.min_dimension(),
                    self.target
                ),
            ));
        }
        if self.max_n < self.min_n {
            return Err(SpectraError::invalid_parameter(
                "max_n",
                format!("must be >= min_n ({}), got {}", self.min_n, self.max_n),
            ));
        }
        if self.samples_per_dimension == 0 {
            return Err(SpectraError::invalid_parameter(
                "samples_per_dimension",
                "must be > 0",
            ));
        }
        Ok(())
    }
}

/// Tally for one dimension
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRow {
    /// Dimension
    pub n: usize,
    /// Trials run
    pub samples: usize,
    /// Trials with `passed = false`
    pub failures: usize,
    /// Largest violation seen
    pub max_violation: f64,
    /// Largest normalized residual seen (Lemma 3.1 only)
    pub max_residual: Option<f64>,
}

impl AuditRow {
    fn empty(n: usize, track_residual: bool) -> Self {
        Self {
            n,
            samples: 0,
            failures: 0,
            max_violation: 0.0,
            max_residual: track_residual.then_some(0.0),
        }
    }

    fn record<O: CheckOutcome>(&mut self, outcome: &O) {
        self.samples += 1;
        if !outcome.passed() {
            self.failures += 1;
        }
        self.max_violation = self.max_violation.max(outcome.violation());
    }

    /// Fraction of trials that passed
    pub fn pass_rate(&self) -> f64 {
        if self.samples == 0 {
            return 1.0;
        }
        (self.samples - self.failures) as f64 / self.samples as f64
    }
}

/// Rows of an audit, one per dimension
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    /// What was checked
    pub target: AuditTarget,
    /// Ascending by dimension
    pub rows: Vec<AuditRow>,
}

impl AuditReport {
    /// Trials over all dimensions
    pub fn total_samples(&self) -> usize {
        self.rows.iter().map(|r| r.samples).sum()
    }

    /// Failures over all dimensions
    pub fn total_failures(&self) -> usize {
        self.rows.iter().map(|r| r.failures).sum()
    }

    /// Worst violation over all dimensions
    pub fn max_violation(&self) -> f64 {
        self.rows.iter().map(|r| r.max_violation).fold(0.0, f64::max)
    }

    /// No trial failed
    pub fn passed(&self) -> bool {
        self.total_failures() == 0
    }
}

impl<R: Rng> SpectralVerifier<R> {
    /// Run `samples` randomized checks of `target` at dimension `n`.
    pub fn audit_dimension(
        &mut self,
        target: AuditTarget,
        n: usize,
        samples: usize,
    ) -> Result<AuditRow> {
        if n < target.min_dimension() {
            return Err(SpectraError::invalid_parameter(
                "n",
                format!("must be >= {} for {}", target.min_dimension(), target),
            ));
        }

        let mut row = AuditRow::empty(n, matches!(target, AuditTarget::PolynomialLemma { .. }));
        for _ in 0..samples {
            match target {
                AuditTarget::AggregateBounds => {
                    let l = self.rng_mut().gen_range(1..n);
                    let r = self.rng_mut().gen_range(l..n);
                    row.record(&self.check_aggregate_bounds(n, l, r)?);
                }
                AuditTarget::Hierarchy => {
                    let m = self.rng_mut().gen_range(2..n);
                    let k = self.rng_mut().gen_range(1..m);
                    row.record(&self.check_hierarchy(n, m, k)?);
                }
                AuditTarget::WeightedProjection { mode } => {
                    let l = self.rng_mut().gen_range(0..n - 1);
                    let r = self.rng_mut().gen_range(l..n - 1);
                    row.record(&self.check_weighted_projection(n, l, r, mode)?);
                }
                AuditTarget::PolynomialLemma { mode } => {
                    let result = self.check_polynomial_lemma(n, mode)?;
                    row.max_residual = row.max_residual.map(|m| m.max(result.max_residual));
                    row.record(&result);
                }
            }
        }

        info!(
            audit = %target,
            n,
            samples = row.samples,
            failures = row.failures,
            max_violation = row.max_violation,
            "audited dimension"
        );
        Ok(row)
    }

    /// Run a whole plan, calling `on_row` after each dimension.
    pub fn audit_with<F>(&mut self, plan: &AuditPlan, mut on_row: F) -> Result<AuditReport>
    where
        F: FnMut(&AuditRow),
    {
        plan.validate()?;
        let mut rows = Vec::with_capacity(plan.dimensions());
        for n in plan.min_n..=plan.max_n {
            let row = self.audit_dimension(plan.target, n, plan.samples_per_dimension)?;
            on_row(&row);
            rows.push(row);
        }
        Ok(AuditReport {
            target: plan.target,
            rows,
        })
    }

    /// Run a whole plan
    pub fn audit(&mut self, plan: &AuditPlan) -> Result<AuditReport> {
        self.audit_with(plan, |_| {})
    }
}
