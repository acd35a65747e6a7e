//! Single randomized checks

use super::{mode, verifier};
use crate::config::Config;
use crate::output::emit;
use anyhow::Result;
use clap::Args;
use subspectra::Theorem;

#[derive(Args)]
pub struct BoundsArgs {
    /// Matrix dimension
    #[arg(short, default_value_t = 6)]
    pub n: usize,

    /// Window start (1-indexed)
    #[arg(short, default_value_t = 1)]
    pub l: usize,

    /// Window end (1-indexed, at most n-1)
    #[arg(short, default_value_t = 3)]
    pub r: usize,
}

#[derive(Args)]
pub struct HierarchyArgs {
    /// Matrix dimension
    #[arg(short, default_value_t = 6)]
    pub n: usize,

    /// Larger submatrix size
    #[arg(short, default_value_t = 4)]
    pub m: usize,

    /// Smaller submatrix size
    #[arg(short, default_value_t = 2)]
    pub k: usize,
}

#[derive(Args)]
pub struct WeightedArgs {
    /// Matrix dimension
    #[arg(short, default_value_t = 8)]
    pub n: usize,

    /// Window start (0-indexed)
    #[arg(short, default_value_t = 1)]
    pub l: usize,

    /// Window end (0-indexed; n-1 is lowered to n-2)
    #[arg(short, default_value_t = 4)]
    pub r: usize,

    /// Repeated eigenvalues and vanishing weights
    #[arg(long)]
    pub stress: bool,
}

#[derive(Args)]
pub struct LemmaArgs {
    /// Matrix dimension
    #[arg(short, default_value_t = 6)]
    pub n: usize,

    /// Repeated eigenvalues and vanishing weights
    #[arg(long)]
    pub stress: bool,
}

pub fn run_bounds(args: BoundsArgs, config: &Config) -> Result<bool> {
    let result = verifier(config)?.check_aggregate_bounds(args.n, args.l, args.r)?;

    emit(&result, &config.output, |s| {
        [
            format!("{}", s.heading(&Theorem::AggregateBounds.to_string())),
            s.field("n", result.n),
            s.field("window", format!("[{}, {}]", result.l, result.r)),
            s.field("lower bound", s.num(result.lower_bound)),
            s.field("observed sum", s.num(result.observed_sum)),
            s.field("upper bound", s.num(result.upper_bound)),
            s.field("violation", s.num(result.violation)),
            s.field("result", s.verdict(result.passed)),
        ]
        .join("\n")
    })?;
    Ok(result.passed)
}

pub fn run_hierarchy(args: HierarchyArgs, config: &Config) -> Result<bool> {
    let result = verifier(config)?.check_hierarchy(args.n, args.m, args.k)?;

    emit(&result, &config.output, |s| {
        [
            format!("{}", s.heading(&Theorem::Hierarchy.to_string())),
            s.field("n, m, k", format!("{}, {}, {}", result.n, result.m, result.k)),
            s.field("sequence length", result.left.len()),
            s.field("min prefix diff", s.num(result.min_difference)),
            s.field("total diff", s.num(result.total_difference)),
            s.field("violation", s.num(result.violation)),
            s.field("result", s.verdict(result.passed)),
        ]
        .join("\n")
    })?;
    Ok(result.passed)
}

pub fn run_weighted(args: WeightedArgs, config: &Config) -> Result<bool> {
    let result =
        verifier(config)?.check_weighted_projection(args.n, args.l, args.r, mode(args.stress))?;

    emit(&result, &config.output, |s| {
        let mut lines = vec![
            format!("{}", s.heading(&Theorem::WeightedProjection.to_string())),
            s.field("n", result.n),
            s.field("mode", result.mode),
            s.field("window", format!("[{}, {}]", result.l, result.r)),
        ];
        if result.window_clamped {
            lines.push(s.field("note", format!("r lowered from {}", result.requested_r)));
        }
        if result.short_circuited {
            lines.push(s.field("note", "weight mass vanished, trivially passed"));
        } else {
            lines.push(s.field("lhs", s.num(result.lhs)));
            lines.push(s.field("observed sum", s.num(result.observed_sum)));
            lines.push(s.field("rhs", s.num(result.rhs)));
            lines.push(s.field("violation", s.num(result.violation)));
        }
        lines.push(s.field("result", s.verdict(result.passed)));
        lines.join("\n")
    })?;
    Ok(result.passed)
}

pub fn run_lemma(args: LemmaArgs, config: &Config) -> Result<bool> {
    let result = verifier(config)?.check_polynomial_lemma(args.n, mode(args.stress))?;

    emit(&result, &config.output, |s| {
        [
            format!("{}", s.heading(&Theorem::PolynomialLemma.to_string())),
            s.field("n", result.n),
            s.field("mode", result.mode),
            s.field("eigenvalues", s.list(&result.eigenvalues)),
            s.field("roots", s.list(&result.projected_eigenvalues)),
            s.field(
                "plot range",
                format!("[{}, {}]", s.num(result.plot_range.0), s.num(result.plot_range.1)),
            ),
            s.field("max residual", s.num(result.max_residual)),
            s.field("result", s.verdict(result.passed)),
        ]
        .join("\n")
    })?;
    Ok(result.passed)
}
