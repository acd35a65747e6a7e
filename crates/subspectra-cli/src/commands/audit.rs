//! Randomized audits across dimensions

use super::{mode, verifier};
use crate::config::Config;
use crate::output::emit;
use crate::progress::create_bar;
use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use subspectra::{AuditPlan, AuditTarget};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TargetArg {
    /// Theorem 1.4
    Bounds,
    /// Theorem 2.2
    Weighted,
    /// Theorem 4.1
    Hierarchy,
    /// Lemma 3.1
    Lemma,
}

#[derive(Args)]
pub struct AuditArgs {
    /// Statement to audit
    #[arg(value_enum)]
    pub target: TargetArg,

    /// Smallest dimension
    #[arg(long, default_value_t = 3)]
    pub min_n: usize,

    /// Largest dimension
    #[arg(long, default_value_t = 10)]
    pub max_n: usize,

    /// Trials per dimension
    #[arg(long, default_value_t = 100)]
    pub samples: usize,

    /// Stress mode (weighted and lemma only)
    #[arg(long)]
    pub stress: bool,
}

impl AuditArgs {
    fn target(&self) -> AuditTarget {
        match self.target {
            TargetArg::Bounds => AuditTarget::AggregateBounds,
            TargetArg::Hierarchy => AuditTarget::Hierarchy,
            TargetArg::Weighted => AuditTarget::WeightedProjection {
                mode: mode(self.stress),
            },
            TargetArg::Lemma => AuditTarget::PolynomialLemma {
                mode: mode(self.stress),
            },
        }
    }
}

pub fn run(args: AuditArgs, config: &Config) -> Result<bool> {
    let plan = AuditPlan::new(args.target(), args.min_n, args.max_n, args.samples);
    plan.validate()?;

    let mut verifier = verifier(config)?;
    let pb = create_bar(
        plan.dimensions() as u64,
        &format!("Auditing {}", plan.target),
        config.output.progress,
    );
    let report = verifier.audit_with(&plan, |row| {
        pb.set_message(format!("Auditing {} (n = {} done)", plan.target, row.n));
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    emit(&report, &config.output, |s| {
        let mut lines = vec![
            format!("{}", s.heading(&format!("Audit: {}", report.target))),
            format!(
                "  {:>4} {:>8} {:>8} {:>14} {:>14}",
                "n", "samples", "failures", "max violation", "max residual"
            ),
        ];
        for row in &report.rows {
            let residual = row.max_residual.map(|r| s.num(r)).unwrap_or_else(|| "-".into());
            let failures = format!("{:>8}", row.failures);
            let failures = if row.failures == 0 {
                failures.green()
            } else {
                failures.red()
            };
            lines.push(format!(
                "  {:>4} {:>8} {} {:>14} {:>14}",
                row.n,
                row.samples,
                failures,
                s.num(row.max_violation),
                residual
            ));
        }
        lines.push(s.field("total samples", report.total_samples()));
        lines.push(s.field("total failures", report.total_failures()));
        lines.push(s.field("result", s.verdict(report.passed())));
        lines.join("\n")
    })?;
    Ok(report.passed())
}
