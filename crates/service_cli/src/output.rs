//! Particle and summary writers.
//!
//! - `csv`: one row per particle, header `x,px,y,py,z,pz`, prefixed by a
//!   `rank` column when several ranks were generated
//! - `json`: generation reports and bunch moments per rank
//! - `table`: moments per rank as a text table

use bunch_core::{BunchMoments, PhaseSpaceSample};
use bunch_sampling::{GenerationReport, RankBunch};
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

use crate::{CliError, Result};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Particle coordinates as CSV
    Csv,
    /// Reports and moments as JSON
    Json,
    /// Moments as a text table
    Table,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            other => Err(CliError::invalid_argument(format!(
                "Unknown format: {}. Supported: csv, json, table",
                other
            ))),
        }
    }
}

#[derive(Serialize)]
struct RankedParticle {
    rank: usize,
    x: f64,
    px: f64,
    y: f64,
    py: f64,
    z: f64,
    pz: f64,
}

impl RankedParticle {
    fn new(rank: usize, p: &PhaseSpaceSample) -> Self {
        Self {
            rank,
            x: p.x,
            px: p.px,
            y: p.y,
            py: p.py,
            z: p.z,
            pz: p.pz,
        }
    }
}

#[derive(Serialize)]
struct RankSummary<'a> {
    report: &'a GenerationReport,
    moments: Option<BunchMoments>,
}

/// Moments of one rank's bunch, using the reference momentum of its report.
pub fn moments_of(rank: &RankBunch) -> Option<BunchMoments> {
    BunchMoments::compute(&rank.bunch, rank.report.reference_momentum)
}

/// Write particle coordinates as CSV.
pub fn write_csv<W: Write>(writer: W, ranks: &[RankBunch]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    if ranks.len() > 1 {
        for rank in ranks {
            for particle in &rank.bunch {
                wtr.serialize(RankedParticle::new(rank.report.rank, particle))?;
            }
        }
    } else {
        for particle in ranks.iter().flat_map(|r| r.bunch.iter()) {
            wtr.serialize(particle)?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Write reports and moments as pretty-printed JSON.
pub fn write_json<W: Write>(writer: W, ranks: &[RankBunch]) -> Result<()> {
    let summaries: Vec<RankSummary<'_>> = ranks
        .iter()
        .map(|rank| RankSummary {
            report: &rank.report,
            moments: moments_of(rank),
        })
        .collect();
    serde_json::to_writer_pretty(writer, &summaries)?;
    Ok(())
}

/// Write moments as a text table.
pub fn write_table<W: Write>(mut writer: W, ranks: &[RankBunch]) -> Result<()> {
    writeln!(
        writer,
        "{:>5} {:>5} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "rank", "plane", "count", "mean", "rms size", "rms div", "emittance", "alpha", "beta",
        "accept"
    )?;

    for rank in ranks {
        let report = &rank.report;
        let Some(moments) = moments_of(rank) else {
            writeln!(writer, "{:>5} (empty bunch)", report.rank)?;
            continue;
        };

        for (label, plane, acceptance) in [
            ("x", &moments.x, report.acceptance_x()),
            ("y", &moments.y, report.acceptance_y()),
        ] {
            writeln!(
                writer,
                "{:>5} {:>5} {:>12} {:>12.4e} {:>12.4e} {:>12.4e} {:>12.4e} {:>12.4} {:>12.4} {:>12.4}",
                report.rank,
                label,
                moments.count,
                plane.mean_position,
                plane.rms_size,
                plane.rms_divergence,
                plane.emittance,
                plane.alpha,
                plane.beta,
                acceptance.unwrap_or(1.0)
            )?;
        }
        writeln!(
            writer,
            "{:>5} {:>5} {:>12} {:>12.6e} {:>12.4e}",
            report.rank, "pz", moments.count, moments.mean_pz, moments.rms_pz
        )?;
    }

    Ok(())
}

/// Write in the requested format.
pub fn write<W: Write>(writer: W, ranks: &[RankBunch], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(writer, ranks),
        OutputFormat::Json => write_json(writer, ranks),
        OutputFormat::Table => write_table(writer, ranks),
    }
}
