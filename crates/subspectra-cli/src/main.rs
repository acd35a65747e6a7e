use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;
mod progress;

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "subspectra")]
#[command(version)]
#[command(about = "Numerically verify eigenvalue inequalities for Hermitian matrices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Random seed (overrides config and SUBSPECTRA_SEED)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Output format (overrides config and SUBSPECTRA_FORMAT)
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Theorem 1.4 on one random Hermitian matrix
    Bounds(commands::check::BoundsArgs),

    /// Theorem 1.4 over many windows of one matrix
    Sweep(commands::sweep::SweepArgs),

    /// Theorem 2.2 on one random compression
    Weighted(commands::check::WeightedArgs),

    /// Theorem 4.1 on one random Hermitian matrix
    Hierarchy(commands::check::HierarchyArgs),

    /// Lemma 3.1 on one random compression
    Lemma(commands::check::LemmaArgs),

    /// Repeated randomized checks across a range of dimensions
    Audit(commands::audit::AuditArgs),

    /// Print theorem statements
    Describe(commands::describe::DescribeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::new(&cli.log_level))
        .init();

    // Load configuration, then let flags win
    let mut config = config::Config::load(cli.config)?;
    if let Some(seed) = cli.seed {
        config.verifier.seed = Some(seed);
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    let passed = match cli.command {
        Commands::Bounds(args) => commands::check::run_bounds(args, &config)?,
        Commands::Sweep(args) => commands::sweep::run(args, &config)?,
        Commands::Weighted(args) => commands::check::run_weighted(args, &config)?,
        Commands::Hierarchy(args) => commands::check::run_hierarchy(args, &config)?,
        Commands::Lemma(args) => commands::check::run_lemma(args, &config)?,
        Commands::Audit(args) => commands::audit::run(args, &config)?,
        Commands::Describe(args) => commands::describe::run(args, &config)?,
    };

    if !passed {
        std::process::exit(1);
    }
    Ok(())
}
