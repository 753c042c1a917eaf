//! Release workflow: package the built project with the packaging tool and
//! publish the result to the release host.
use derive_builder::Builder;
use log::*;
use std::path::{Path, PathBuf};

use crate::{
    Result,
    config::Settings,
    error::ReleaseError,
    forge::{
        traits::ReleaseHost,
        types::{AssetUpload, NewRelease, UploadedAsset},
    },
    metadata::{ReleaseIdentity, locate_descriptor},
    packaging::{
        BUILD_OUTPUT_DIR, ExecutionResult, PACKAGE_EXTENSION, RELEASES_DIR,
        ToolInvocation, ToolRunner,
    },
};

#[derive(Builder)]
#[builder(pattern = "owned", build_fn(private, name = "_build"))]
pub struct OrchestratorParams {
    /// Project descriptor, falls back to the first one in `work_dir`.
    #[builder(default, setter(into, strip_option))]
    pub project: Option<PathBuf>,
    /// Caller's current directory.
    #[builder(setter(into))]
    pub work_dir: PathBuf,
    /// User profile directory the tool path is relative to.
    #[builder(setter(into))]
    pub home_dir: PathBuf,
    pub settings: Settings,
    pub runner: Box<dyn ToolRunner>,
}

impl OrchestratorParamsBuilder {
    pub fn build(self) -> Result<ReleaseOrchestrator> {
        let params = self._build().map_err(|e| {
            ReleaseError::invalid_config(format!(
                "Failed to build release orchestrator: {}",
                e
            ))
        })?;
        ReleaseOrchestrator::new(params)
    }
}

pub struct ReleaseOrchestrator {
    identity: ReleaseIdentity,
    project_dir: PathBuf,
    work_dir: PathBuf,
    home_dir: PathBuf,
    settings: Settings,
    runner: Box<dyn ToolRunner>,
}

impl ReleaseOrchestrator {
    pub fn builder() -> OrchestratorParamsBuilder {
        OrchestratorParamsBuilder::default()
    }

    /// Locates the project descriptor and reads the release identity from it.
    pub fn new(params: OrchestratorParams) -> Result<Self> {
        let descriptor =
            locate_descriptor(params.project.as_deref(), &params.work_dir)?;

        let identity = ReleaseIdentity::from_descriptor(&descriptor)?;

        let project_dir = descriptor
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| params.work_dir.clone());

        info!(
            "loaded {} {} ({}) from {}",
            identity.package_id,
            identity.version,
            identity.tag,
            descriptor.display()
        );

        Ok(Self {
            identity,
            project_dir,
            work_dir: params.work_dir,
            home_dir: params.home_dir,
            settings: params.settings,
            runner: params.runner,
        })
    }

    pub fn identity(&self) -> &ReleaseIdentity {
        &self.identity
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Packaging tool executable below the user profile.
    pub fn tool_path(&self) -> PathBuf {
        self.home_dir.join(&self.settings.squirrel_path)
    }

    /// Built package the tool turns into a release,
    /// `<project>/bin/Release/{package_id}.{version}.nupkg`.
    pub fn package_path(&self) -> PathBuf {
        BUILD_OUTPUT_DIR
            .iter()
            .fold(self.project_dir.clone(), |path, segment| path.join(segment))
            .join(format!(
                "{}.{PACKAGE_EXTENSION}",
                self.identity.package_stem()
            ))
    }

    /// Directory the tool writes release artifacts to.
    pub fn releases_dir(&self) -> PathBuf {
        self.project_dir.join(RELEASES_DIR)
    }

    /// Local artifact uploaded as the release asset.
    pub fn asset_path(&self) -> PathBuf {
        self.work_dir.join(&self.settings.asset_path)
    }

    /// Runs the packaging tool on the built package. Fails before starting
    /// any process when the tool or the package is missing.
    pub fn package(&self) -> Result<ExecutionResult> {
        let tool = self.tool_path();

        if !tool.is_file() {
            return Err(ReleaseError::not_found("packaging tool", tool));
        }

        let package = self.package_path();

        if !package.is_file() {
            return Err(ReleaseError::not_found("package file", package));
        }

        let invocation = ToolInvocation::releasify(
            &tool,
            &self.settings.squirrel_args,
            &self.releases_dir(),
            &package,
            &self.work_dir,
        );

        info!("packaging {}", package.display());

        let result = self.runner.run(&invocation)?;

        for line in result.stdout.lines() {
            info!("{line}");
        }

        check_execution(&invocation, &result)?;

        Ok(result)
    }

    /// Creates the release record and attaches the local artifact to it.
    ///
    /// The asset goes to the release returned by the create call, never to
    /// whatever the host currently reports as latest. A release that was
    /// created before a failed upload is left in place.
    pub async fn publish(
        &self,
        host: &dyn ReleaseHost,
    ) -> Result<UploadedAsset> {
        let asset_path = self.asset_path();

        if !asset_path.is_file() {
            return Err(ReleaseError::not_found("release asset", asset_path));
        }

        let release = host
            .create_release(NewRelease {
                tag: self.identity.tag.clone(),
                name: self.identity.title.clone(),
                body: self.identity.notes.clone(),
            })
            .await?;

        info!("Created release id {}", release.id);

        // read in full so the handle is closed before the upload starts
        let data = tokio::fs::read(&asset_path).await?;

        let asset = host
            .upload_asset(
                &release,
                AssetUpload {
                    file_name: self.settings.asset_name.clone(),
                    content_type: self.settings.asset_content_type.clone(),
                    data,
                },
            )
            .await?;

        info!(
            "uploaded asset {} ({} bytes) to release {}",
            asset.name, asset.size, release.id
        );

        Ok(asset)
    }

    /// Reserved for updating the project after a release. What it should
    /// touch is not settled, so it reports itself as unsupported.
    pub async fn update_project(&self) -> Result<()> {
        warn!("project update requested for {}", self.identity.tag);
        Err(ReleaseError::NotSupported("project update".into()))
    }
}

/// Any stderr output fails the run, even with a zero exit code. A non-zero
/// exit with a silent stderr fails as well.
fn check_execution(
    invocation: &ToolInvocation,
    result: &ExecutionResult,
) -> Result<()> {
    if !result.stderr.is_empty() {
        return Err(ReleaseError::ToolExecutionFailed(result.stderr.clone()));
    }

    if !result.success() {
        let status = result
            .exit_code
            .map(|code| format!("exit code {code}"))
            .unwrap_or_else(|| "a signal".to_string());

        return Err(ReleaseError::ToolExecutionFailed(format!(
            "{} terminated with {status}",
            invocation.program.display()
        )));
    }

    Ok(())
}
