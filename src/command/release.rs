//! Full release command implementation.
use crate::{Result, cli::Args, command::common};

/// Execute release command: package, then publish. Publishing is skipped
/// when packaging fails.
pub async fn execute(args: &Args) -> Result<()> {
    let orchestrator = common::load_orchestrator(args)?;
    // resolve the host first so a missing token fails before packaging runs
    let host = common::load_host(args, &orchestrator)?;

    orchestrator.package()?;
    orchestrator.publish(host.as_ref()).await?;

    Ok(())
}
