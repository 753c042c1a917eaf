//! CLI argument parsing and release host configuration.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::{
    Result, config::Settings, forge::config::RemoteConfig,
    metadata::ReleaseIdentity,
};

/// Packages a project with Squirrel and publishes it as a GitHub release.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, global = true)]
    /// Project descriptor (*.csproj). Defaults to the first one in the
    /// current directory.
    pub project: Option<PathBuf>,

    #[arg(long, global = true)]
    /// Settings file. Defaults to appsettings.json next to the executable,
    /// then in the current directory.
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "", global = true)]
    /// GitHub repository URL (https://github.com/owner/repo). Overrides the
    /// configured owner/repo and the descriptor's RepositoryUrl.
    pub github_repo: String,

    #[arg(long, default_value = "", global = true)]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long, global = true)]
    /// API base url for GitHub Enterprise instances.
    pub api_url: Option<String>,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Release operation subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the packaging tool on the built package.
    Package,

    /// Create the GitHub release and upload the packaged asset.
    Upload,

    /// Package, then upload.
    Release,

    /// Update the current project after a release (not supported yet).
    Update,

    /// Show the latest release of the target repository.
    Latest,
}

impl Args {
    /// Resolve the repository releases are published to: the --github-repo
    /// flag, then the configured owner/repo, then the descriptor's
    /// RepositoryUrl.
    pub fn get_remote(
        &self,
        settings: &Settings,
        identity: &ReleaseIdentity,
    ) -> Result<RemoteConfig> {
        let mut remote = if !self.github_repo.is_empty() {
            RemoteConfig::from_repo_url(&self.github_repo, &self.github_token)?
        } else if let (Some(owner), Some(repo)) =
            (&settings.github_owner, &settings.github_repo)
        {
            RemoteConfig::from_coordinate(owner, repo, &self.github_token)?
        } else {
            RemoteConfig::from_repo_url(
                &identity.repository_url,
                &self.github_token,
            )?
        };

        if let Some(api_url) = &self.api_url {
            remote.api_url = Some(api_url.clone());
        }

        Ok(remote)
    }
}
