//! QRA CLI - Command Line Operations for Quantitative Risk Analysis
//!
//! This is the operational entry point for the QRA simulation engine.
//!
//! # Commands
//!
//! - `qra simulate` - Simulate the configured risk register and report losses
//! - `qra check` - Validate configuration and list the portfolio
//!
//! # Configuration
//!
//! Settings are read from `qra.toml`, then `QRA_*` environment variables,
//! then command-line flags. `RUST_LOG` overrides the configured log level.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::simulate::OutputFormat;
use config::{build_config, CliArgs};

/// QRA risk simulation CLI
#[derive(Parser)]
#[command(name = "qra")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "qra.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the risk register
    Simulate {
        /// Sampling method (smc, qmc, rqmc)
        #[arg(short, long)]
        method: Option<String>,

        /// Simulated years per risk
        #[arg(short = 'n', long)]
        iterations: Option<usize>,

        /// Base random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Worker threads
        #[arg(short, long)]
        threads: Option<usize>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Thresholds in the portfolio exceedance curve
        #[arg(short, long, default_value_t = qra_risk::analysis::DEFAULT_BUCKETS)]
        buckets: usize,
    },

    /// Validate configuration and list the portfolio
    Check,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut args = CliArgs {
        config_file: Some(cli.config),
        verbose: cli.verbose,
        ..Default::default()
    };
    if let Commands::Simulate {
        method,
        iterations,
        seed,
        threads,
        ..
    } = &cli.command
    {
        args.method = method.clone();
        args.iterations = *iterations;
        args.seed = *seed;
        args.threads = *threads;
    }

    let config = build_config(&args)?;
    init_tracing(config.simulation.log_level.as_filter_str());

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Simulate {
            format, buckets, ..
        } => commands::simulate::run(&config, format.parse::<OutputFormat>()?, buckets),
        Commands::Check => commands::check::run(&config),
    }
}
