//! Configuration loading for `appsettings.json` files.
//!
//! Settings are looked up by colon-separated keys (`Settings:SquirrelPath`)
//! through a [`ConfigProvider`], so callers never touch the file directly.
use log::*;
use serde_json::Value;
use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
};

use crate::{Result, error::ReleaseError};

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "appsettings.json";
/// Relative path from the user profile to the packaging tool.
pub const SQUIRREL_PATH_KEY: &str = "Settings:SquirrelPath";
/// Argument string passed verbatim to the packaging tool.
pub const SQUIRREL_ARGS_KEY: &str = "Settings:SquirrelArgs";
/// Owner of the repository releases are published to.
pub const GITHUB_OWNER_KEY: &str = "Settings:GithubOwner";
/// Name of the repository releases are published to.
pub const GITHUB_REPO_KEY: &str = "Settings:GithubRepo";
/// Local artifact uploaded as the release asset.
pub const ASSET_PATH_KEY: &str = "Settings:AssetPath";
/// File name the asset is published under.
pub const ASSET_NAME_KEY: &str = "Settings:AssetName";
/// Content type sent with the asset upload.
pub const ASSET_CONTENT_TYPE_KEY: &str = "Settings:AssetContentType";

pub const DEFAULT_ASSET_PATH: &str = "output.nupkg";
pub const DEFAULT_ASSET_NAME: &str = "Nupkg";
pub const DEFAULT_ASSET_CONTENT_TYPE: &str = "package";

/// Keyed lookup into a configuration source.
pub trait ConfigProvider {
    /// Returns the value stored under a colon-separated key, if any.
    fn get(&self, key: &str) -> Option<String>;
}

/// Configuration backed by a JSON document.
#[derive(Debug, Clone)]
pub struct JsonConfig {
    root: Value,
}

impl JsonConfig {
    pub fn parse(content: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(content)?;
        Ok(Self { root })
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ReleaseError::not_found("configuration file", path));
        }

        debug!("loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Loads the configuration from an explicit path, or from the first
    /// `appsettings.json` found next to the executable or in `work_dir`.
    pub fn discover(explicit: Option<&Path>, work_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidates = config_candidates(work_dir);

        for candidate in candidates.iter() {
            if candidate.is_file() {
                return Self::load(candidate);
            }
        }

        // report the primary location, next to the executable when known
        let primary = candidates
            .into_iter()
            .next()
            .unwrap_or_else(|| work_dir.join(DEFAULT_CONFIG_FILE));

        Err(ReleaseError::not_found("configuration file", primary))
    }
}

fn config_candidates(work_dir: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![];

    if let Ok(exe) = env::current_exe()
        && let Some(dir) = exe.parent()
    {
        candidates.push(dir.join(DEFAULT_CONFIG_FILE));
    }

    candidates.push(work_dir.join(DEFAULT_CONFIG_FILE));
    candidates
}

impl ConfigProvider for JsonConfig {
    fn get(&self, key: &str) -> Option<String> {
        let mut node = &self.root;

        for segment in key.split(':') {
            node = node.as_object()?.get(segment)?;
        }

        match node {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// In-memory configuration, mostly useful for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfig {
    values: HashMap<String, String>,
}

impl MemoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl ConfigProvider for MemoryConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Typed view of the settings the release workflow needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Packaging tool location relative to the user profile directory.
    pub squirrel_path: String,
    /// Opaque argument string placed before the generated arguments.
    pub squirrel_args: String,
    /// Explicit release repository owner, overrides the descriptor.
    pub github_owner: Option<String>,
    /// Explicit release repository name, overrides the descriptor.
    pub github_repo: Option<String>,
    /// Artifact to upload, relative to the working directory.
    pub asset_path: String,
    pub asset_name: String,
    pub asset_content_type: String,
}

impl Settings {
    pub fn from_provider(provider: &dyn ConfigProvider) -> Result<Self> {
        let squirrel_path = non_empty(provider, SQUIRREL_PATH_KEY)
            .ok_or_else(|| {
                ReleaseError::invalid_config(format!(
                    "'{SQUIRREL_PATH_KEY}' must be set"
                ))
            })?;

        let github_owner = non_empty(provider, GITHUB_OWNER_KEY);
        let github_repo = non_empty(provider, GITHUB_REPO_KEY);

        if github_owner.is_some() != github_repo.is_some() {
            return Err(ReleaseError::invalid_config(format!(
                "'{GITHUB_OWNER_KEY}' and '{GITHUB_REPO_KEY}' must be set together"
            )));
        }

        Ok(Self {
            squirrel_path,
            squirrel_args: provider.get(SQUIRREL_ARGS_KEY).unwrap_or_default(),
            github_owner,
            github_repo,
            asset_path: non_empty(provider, ASSET_PATH_KEY)
                .unwrap_or_else(|| DEFAULT_ASSET_PATH.into()),
            asset_name: non_empty(provider, ASSET_NAME_KEY)
                .unwrap_or_else(|| DEFAULT_ASSET_NAME.into()),
            asset_content_type: non_empty(provider, ASSET_CONTENT_TYPE_KEY)
                .unwrap_or_else(|| DEFAULT_ASSET_CONTENT_TYPE.into()),
        })
    }
}

fn non_empty(provider: &dyn ConfigProvider, key: &str) -> Option<String> {
    provider
        .get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
