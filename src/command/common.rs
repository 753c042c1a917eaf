//! Common functionality shared between commands
use log::*;
use std::{env, path::PathBuf};

use crate::{
    Result,
    cli::Args,
    config::{JsonConfig, Settings},
    error::ReleaseError,
    forge::{github::Github, traits::ReleaseHost},
    orchestrator::ReleaseOrchestrator,
    packaging::ProcessRunner,
};

/// User profile directory the packaging tool path is relative to.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        ReleaseError::invalid_config("unable to determine user profile directory")
    })
}

/// Load settings and the project descriptor for the current directory.
pub fn load_orchestrator(args: &Args) -> Result<ReleaseOrchestrator> {
    let work_dir = env::current_dir()?;
    let config = JsonConfig::discover(args.config.as_deref(), &work_dir)?;
    let settings = Settings::from_provider(&config)?;

    debug!("settings: {:?}", settings);

    let mut builder = ReleaseOrchestrator::builder()
        .work_dir(work_dir)
        .home_dir(home_dir()?)
        .settings(settings)
        .runner(Box::new(ProcessRunner));

    if let Some(project) = &args.project {
        builder = builder.project(project.clone());
    }

    builder.build()
}

/// Connect to the release host for the resolved remote repository.
pub fn load_host(
    args: &Args,
    orchestrator: &ReleaseOrchestrator,
) -> Result<Box<dyn ReleaseHost>> {
    let remote =
        args.get_remote(orchestrator.settings(), orchestrator.identity())?;

    info!("publishing to {}", remote.path());

    Ok(Box::new(Github::new(remote)?))
}
