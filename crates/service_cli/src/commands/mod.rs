//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod generate;
pub mod stats;

use bunch_core::Bunch;
use bunch_sampling::{generate_partitioned, BunchConfiguration, RankBunch};
use tracing::info;

use crate::config::RunOptions;
use crate::Result;

/// Generate the bunches selected by `options`.
///
/// A single rank uses the explicit or detected rank; several ranks are
/// emulated in parallel starting from rank 0.
pub(crate) fn run_ranks(
    config: &BunchConfiguration,
    options: &RunOptions,
) -> Result<Vec<RankBunch>> {
    options.validate()?;
    let epoch_secs = options.resolve_epoch();

    if options.ranks > 1 {
        info!("Emulating {} ranks", options.ranks);
        return Ok(generate_partitioned(
            config,
            options.seed_variant,
            epoch_secs,
            options.ranks,
        )?);
    }

    let assembler = options.assembler(config);
    let mut bunch = Bunch::new();
    let report = assembler.generate_bunch_at(options.seed_variant, epoch_secs, &mut bunch)?;
    Ok(vec![RankBunch { report, bunch }])
}
