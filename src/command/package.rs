//! Packaging command implementation.
use log::*;

use crate::{Result, cli::Args, command::common};

/// Execute package command to turn the built package into release files.
pub fn execute(args: &Args) -> Result<()> {
    let orchestrator = common::load_orchestrator(args)?;

    orchestrator.package()?;

    info!(
        "packaged {} into {}",
        orchestrator.identity().tag,
        orchestrator.releases_dir().display()
    );

    Ok(())
}
