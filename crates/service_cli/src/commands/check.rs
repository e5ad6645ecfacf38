//! Check command implementation
//!
//! Validates a beam file and prints the quantities derived from it.

use std::io::{self, Write};
use std::path::Path;

use bunch_core::TwissParameters;
use bunch_sampling::BunchConfiguration;
use tracing::info;

use crate::config::{load_beam, RunOptions};
use crate::Result;

/// Run the check command
pub fn run(config: &Path) -> Result<()> {
    info!("Checking beam file: {}", config.display());

    let beam = load_beam(config, &RunOptions::default())?;
    render(io::stdout().lock(), &beam)?;

    info!("Beam file OK");
    Ok(())
}

/// Write derived beam quantities as text.
pub fn render<W: Write>(mut out: W, beam: &BunchConfiguration) -> io::Result<()> {
    let energy = beam.energy();

    writeln!(out, "Bunch")?;
    writeln!(out, "  particles          {}", beam.particles())?;
    writeln!(out, "  mass               {} GeV", beam.mass())?;
    writeln!(out, "  charge             {}", beam.charge())?;
    match beam.max_attempts() {
        Some(limit) => writeln!(out, "  max attempts       {}", limit)?,
        None => writeln!(out, "  max attempts       unbounded")?,
    }

    writeln!(out, "Energy")?;
    writeln!(out, "  kinetic energy     {} GeV", energy.kinetic_energy())?;
    writeln!(out, "  total energy       {} GeV", energy.total_energy())?;
    writeln!(out, "  p0                 {:.6e} GeV/c", energy.reference_momentum())?;
    writeln!(out, "  spreadP            {:.6e} GeV/c", energy.momentum_spread())?;
    writeln!(out, "  gamma              {:.6}", energy.gamma())?;
    writeln!(out, "  beta               {:.6}", energy.beta())?;

    render_plane(&mut out, "x", beam.twiss_x())?;
    render_plane(&mut out, "y", beam.twiss_y())?;

    let dispersion = beam.dispersion();
    writeln!(out, "Dispersion")?;
    writeln!(out, "  D                  {} m", dispersion.d())?;
    writeln!(out, "  D'                 {}", dispersion.d_prime())
}

fn render_plane<W: Write>(out: &mut W, label: &str, twiss: &TwissParameters) -> io::Result<()> {
    writeln!(out, "Plane {}", label)?;
    writeln!(out, "  alpha              {}", twiss.alpha())?;
    writeln!(out, "  beta               {} m", twiss.beta())?;
    writeln!(out, "  gamma              {:.6} 1/m", twiss.gamma())?;
    writeln!(out, "  emittance          {:.6e} m rad", twiss.emittance())?;
    if twiss.is_truncated() {
        writeln!(out, "  cutoff             {}", twiss.cutoff())?;
    } else {
        writeln!(out, "  cutoff             none")?;
    }
    writeln!(out, "  rms size           {:.6e} m", twiss.rms_size())?;
    writeln!(out, "  rms divergence     {:.6e} rad", twiss.rms_divergence())
}
