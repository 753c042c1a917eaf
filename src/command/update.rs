//! Project update command implementation.
use crate::{Result, cli::Args, command::common};

/// Execute update command.
pub async fn execute(args: &Args) -> Result<()> {
    let orchestrator = common::load_orchestrator(args)?;
    orchestrator.update_project().await
}
