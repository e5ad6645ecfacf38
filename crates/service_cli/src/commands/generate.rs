//! Generate command implementation
//!
//! Loads a beam file, generates one bunch per rank and writes the result.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use super::run_ranks;
use crate::config::{load_beam, RunOptions};
use crate::output::{self, OutputFormat};
use crate::Result;

/// Run the generate command
pub fn run(
    config: &Path,
    options: &RunOptions,
    output_path: Option<&Path>,
    format: &str,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;

    info!("Starting generation...");
    info!("  Beam file: {}", config.display());
    info!("  Seed variant: {}", options.seed_variant);
    info!("  Ranks: {}", options.ranks);
    info!("  Output format: {:?}", format);

    let beam = load_beam(config, options)?;
    let ranks = run_ranks(&beam, options)?;

    match output_path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            output::write(&mut writer, &ranks, format)?;
            writer.flush()?;
            info!("Wrote {}", path.display());
        }
        None => output::write(io::stdout().lock(), &ranks, format)?,
    }

    info!("Generation complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::beam_file;
    use crate::CliError;

    fn options() -> RunOptions {
        RunOptions::default().with_flags(Some(3), Some(1_700_000_000), Some(0), None, Some(25))
    }

    #[test]
    fn test_generate_csv_file() {
        let beam = beam_file();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("bunch.csv");

        run(beam.path(), &options(), Some(&out), "csv").unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().count(), 1 + 25);
        assert!(text.starts_with("x,px,y,py,z,pz"));
    }

    #[test]
    fn test_generate_is_reproducible_for_fixed_epoch() {
        let beam = beam_file();
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");

        run(beam.path(), &options(), Some(&a), "csv").unwrap();
        run(beam.path(), &options(), Some(&b), "csv").unwrap();

        assert_eq!(
            std::fs::read_to_string(&a).unwrap(),
            std::fs::read_to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_generate_multi_rank_json() {
        let beam = beam_file();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("summary.json");
        let options = RunOptions::default().with_flags(None, Some(1), None, Some(3), Some(10));

        run(beam.path(), &options, Some(&out), "json").unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_generate_rejects_unknown_format() {
        let beam = beam_file();
        let result = run(beam.path(), &options(), None, "parquet");
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_generate_missing_beam_file() {
        let result = run(Path::new("/nonexistent/beam.toml"), &options(), None, "csv");
        assert!(matches!(result, Err(CliError::FileNotFound(_))));
    }
}
