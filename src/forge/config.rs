//! Configuration for hosting service connections.
use git_url_parse::{GitUrl, Scheme};
use secrecy::SecretString;
use std::env;

use crate::{Result, error::ReleaseError};

/// Env var consulted when no token is given explicitly.
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";
/// Host used when only an owner and repo are configured.
pub const DEFAULT_HOST: &str = "github.com";
/// User agent sent with raw API requests.
pub const USER_AGENT: &str = concat!("releasify/", env!("CARGO_PKG_VERSION"));

/// Remote repository connection configuration for authenticating and
/// publishing releases.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote host (e.g., "github.com").
    pub host: String,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
    /// Explicit API base url for enterprise instances.
    pub api_url: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            scheme: "https".to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            token: SecretString::from("".to_string()),
            api_url: None,
        }
    }
}

impl RemoteConfig {
    /// Parse a repository url such as `https://github.com/owner/repo.git`.
    /// A token embedded in the url is used when `token` is empty.
    pub fn from_repo_url(repo_url: &str, token: &str) -> Result<Self> {
        let parsed = GitUrl::parse(repo_url)?;

        validate_scheme(&parsed.scheme)?;

        let host = parsed.host.ok_or_else(|| {
            ReleaseError::invalid_config(format!(
                "unable to parse host from repo url: {repo_url}"
            ))
        })?;

        let owner = parsed.owner.ok_or_else(|| {
            ReleaseError::invalid_config(format!(
                "unable to parse owner from repo url: {repo_url}"
            ))
        })?;

        let mut token = token.to_string();

        if token.is_empty()
            && let Some(parsed_token) = parsed.token
        {
            token = parsed_token;
        }

        Ok(Self {
            host,
            scheme: parsed.scheme.to_string(),
            owner,
            repo: parsed.name,
            token: resolve_token(&token)?,
            api_url: None,
        })
    }

    /// Build a github.com config from an explicit owner and repo.
    pub fn from_coordinate(owner: &str, repo: &str, token: &str) -> Result<Self> {
        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: resolve_token(token)?,
            ..Default::default()
        })
    }

    /// API base url, `scheme://api.host` unless overridden.
    pub fn api_base(&self) -> String {
        match &self.api_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("{}://api.{}", self.scheme, self.host),
        }
    }

    /// `owner/repo` for log messages.
    pub fn path(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Validate repository URL uses HTTP or HTTPS scheme.
fn validate_scheme(scheme: &Scheme) -> Result<()> {
    match scheme {
        Scheme::Http | Scheme::Https => Ok(()),
        _ => Err(ReleaseError::invalid_config(
            "only http and https schemes are supported for repo urls",
        )),
    }
}

/// Falls back to the `GITHUB_TOKEN` env var when `token` is empty.
fn resolve_token(token: &str) -> Result<SecretString> {
    let mut token = token.to_string();

    if token.is_empty()
        && let Ok(env_var_token) = env::var(GITHUB_TOKEN_VAR)
    {
        token = env_var_token;
    }

    if token.is_empty() {
        return Err(ReleaseError::invalid_config("must set github token"));
    }

    Ok(SecretString::from(token))
}
