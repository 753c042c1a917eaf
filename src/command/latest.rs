//! Latest release command implementation.
use crate::{Result, cli::Args, command::common};

/// Execute latest command to print the most recent remote release.
pub async fn execute(args: &Args) -> Result<()> {
    let orchestrator = common::load_orchestrator(args)?;
    let host = common::load_host(args, &orchestrator)?;

    let release = host.get_latest_release().await?;

    println!("{} (id {})", release.tag, release.id);

    if !release.name.is_empty() {
        println!("{}", release.name);
    }

    if !release.body.is_empty() {
        println!("\n{}", release.body);
    }

    Ok(())
}
