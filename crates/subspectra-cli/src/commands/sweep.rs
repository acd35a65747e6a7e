//! Theorem 1.4 over many windows of one matrix

use super::verifier;
use crate::config::Config;
use crate::output::emit;
use anyhow::Result;
use clap::Args;
use subspectra::Theorem;

#[derive(Args)]
pub struct SweepArgs {
    /// Matrix dimension
    #[arg(short, default_value_t = 8)]
    pub n: usize,

    /// Keep every stride-th window (default: max(1, n²/12))
    #[arg(long)]
    pub stride: Option<usize>,
}

pub fn run(args: SweepArgs, config: &Config) -> Result<bool> {
    let results = verifier(config)?.check_window_sweep(args.n, args.stride)?;
    let passed = results.iter().all(|r| r.passed);

    emit(&results, &config.output, |s| {
        let mut lines = vec![
            format!("{}", s.heading(&Theorem::AggregateBounds.to_string())),
            format!(
                "  {:>3} {:>3}  {:>14} {:>14} {:>14}  {}",
                "l", "r", "lower", "observed", "upper", "result"
            ),
        ];
        for r in &results {
            lines.push(format!(
                "  {:>3} {:>3}  {:>14} {:>14} {:>14}  {}",
                r.l,
                r.r,
                s.num(r.lower_bound),
                s.num(r.observed_sum),
                s.num(r.upper_bound),
                s.verdict(r.passed)
            ));
        }
        lines.push(s.field("windows", results.len()));
        lines.push(s.field("result", s.verdict(passed)));
        lines.join("\n")
    })?;
    Ok(passed)
}
