//! Theorem statements

use crate::config::Config;
use crate::output::emit;
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use subspectra::Theorem;

#[derive(Args)]
pub struct DescribeArgs {
    /// bounds, weighted, hierarchy or lemma (all when omitted)
    pub theorem: Option<String>,
}

#[derive(Serialize)]
struct Statement {
    theorem: Theorem,
    label: &'static str,
    title: &'static str,
    formula: &'static str,
    summary: &'static str,
}

impl From<Theorem> for Statement {
    fn from(theorem: Theorem) -> Self {
        Self {
            theorem,
            label: theorem.label(),
            title: theorem.title(),
            formula: theorem.formula(),
            summary: theorem.summary(),
        }
    }
}

pub fn run(args: DescribeArgs, config: &Config) -> Result<bool> {
    let theorems: Vec<Theorem> = match args.theorem {
        Some(name) => vec![name.parse()?],
        None => Theorem::ALL.to_vec(),
    };
    let statements: Vec<Statement> = theorems.into_iter().map(Statement::from).collect();

    emit(&statements, &config.output, |s| {
        statements
            .iter()
            .map(|st| {
                format!(
                    "{}\n  {}\n\n  {}\n",
                    s.heading(&st.theorem.to_string()),
                    st.formula,
                    st.summary
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    Ok(true)
}
