//! bunchgen - Command Line Front End for Particle-Bunch Generation
//!
//! Generates macro-particle initial conditions from a TOML beam file.
//!
//! # Commands
//!
//! - `bunchgen generate --config <beam.toml>` - Generate particles as CSV/JSON/table
//! - `bunchgen check --config <beam.toml>` - Validate a beam file and print derived quantities
//! - `bunchgen stats --config <beam.toml>` - Generate in memory and print bunch moments
//!
//! # Environment
//!
//! - `BUNCHGEN_SEED_VARIANT`, `BUNCHGEN_PARTICLES`: defaults for the matching flags
//! - `OMPI_COMM_WORLD_RANK`, `PMI_RANK`, `SLURM_PROCID`: rank when `--rank` is absent
//! - `RUST_LOG`: log filter (logs go to stderr)
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate is the only place that
//! touches files, environment variables or the log subscriber.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

#[cfg(test)]
mod test_support;

pub use error::{CliError, Result};

use config::RunOptions;

/// Default log directive when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "service_cli=info,bunch_sampling=info";

/// Particle-bunch initial-condition generator
#[derive(Parser)]
#[command(name = "bunchgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Run-level flags shared by `generate` and `stats`.
#[derive(Args)]
struct RunArgs {
    /// Path to the TOML beam file
    #[arg(short, long)]
    config: PathBuf,

    /// Seed variant (0 ignores the clock)
    #[arg(short, long)]
    seed_variant: Option<u64>,

    /// Seeding instant in seconds since the Unix epoch (default: now)
    #[arg(short, long)]
    epoch: Option<u64>,

    /// Rank to generate for (default: detected from the launcher)
    #[arg(short, long)]
    rank: Option<usize>,

    /// Number of ranks to emulate in this process
    #[arg(long)]
    ranks: Option<usize>,

    /// Particle count overriding the beam file
    #[arg(short = 'n', long)]
    particles: Option<usize>,
}

impl RunArgs {
    fn options(&self) -> RunOptions {
        RunOptions::default().with_env_override().with_flags(
            self.seed_variant,
            self.epoch,
            self.rank,
            self.ranks,
            self.particles,
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a bunch and write its particles
    Generate {
        #[command(flatten)]
        run: RunArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (csv, json, table)
        #[arg(short, long, default_value = "csv")]
        format: String,
    },

    /// Validate a beam file and print derived quantities
    Check {
        /// Path to the TOML beam file
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Generate in memory and print bunch moments
    Stats {
        #[command(flatten)]
        run: RunArgs,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialise tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("service_cli=debug,bunch_sampling=debug")
        } else {
            EnvFilter::new(DEFAULT_LOG_FILTER)
        }
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Generate {
            run,
            output,
            format,
        } => commands::generate::run(&run.config, &run.options(), output.as_deref(), &format),
        Commands::Check { config } => commands::check::run(&config),
        Commands::Stats { run, format } => {
            commands::stats::run(&run.config, &run.options(), &format)
        }
    }
}
