//! Stats command implementation
//!
//! Generates bunches in memory and prints their moments instead of the
//! particles.

use std::io;
use std::path::Path;

use tracing::info;

use super::run_ranks;
use crate::config::{load_beam, RunOptions};
use crate::output::{self, OutputFormat};
use crate::{CliError, Result};

/// Run the stats command
pub fn run(config: &Path, options: &RunOptions, format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    if format == OutputFormat::Csv {
        return Err(CliError::invalid_argument(
            "stats supports json and table output; use generate for CSV",
        ));
    }

    info!("Computing bunch statistics...");
    info!("  Beam file: {}", config.display());
    info!("  Ranks: {}", options.ranks);

    let beam = load_beam(config, options)?;
    let ranks = run_ranks(&beam, options)?;
    output::write(io::stdout().lock(), &ranks, format)?;

    info!("Statistics complete");
    Ok(())
}
