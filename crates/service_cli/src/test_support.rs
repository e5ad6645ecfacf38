//! Shared fixtures for command tests.

use std::io::Write;

use bunch_sampling::{generate_partitioned, BunchConfiguration, RankBunch};
use tempfile::NamedTempFile;

pub(crate) const BEAM: &str = r#"
particles = 100
charge = 1.0

[energy]
kinetic_energy = 0.0025
relative_spread = 0.001
mass = 0.938272

[twiss.x]
alpha = -1.2
beta = 0.9
emittance = 2.0e-6
cutoff = 4.0e-3

[twiss.y]
alpha = 0.8
beta = 0.5
emittance = 2.0e-6
"#;

pub(crate) fn beam() -> BunchConfiguration {
    BunchConfiguration::from_toml_str(BEAM).unwrap()
}

pub(crate) fn beam_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(BEAM.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub(crate) fn ranks(count: usize, particles: usize) -> Vec<RankBunch> {
    generate_partitioned(&beam().with_particles(particles), 1, 1_700_000_000, count).unwrap()
}
