//! Upload command implementation.
use log::*;

use crate::{Result, cli::Args, command::common};

/// Execute upload command to publish the release and its asset.
pub async fn execute(args: &Args) -> Result<()> {
    let orchestrator = common::load_orchestrator(args)?;
    let host = common::load_host(args, &orchestrator)?;

    let asset = orchestrator.publish(host.as_ref()).await?;

    if !asset.browser_download_url.is_empty() {
        info!("asset available at {}", asset.browser_download_url);
    }

    Ok(())
}
