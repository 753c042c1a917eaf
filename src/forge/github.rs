//! Implements the ReleaseHost trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::{Octocrab, models::repos::Release};
use reqwest::{
    Client, Url,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT},
};
use secrecy::ExposeSecret;

use crate::{
    Result,
    error::ReleaseError,
    forge::{
        config::{self, RemoteConfig},
        traits::ReleaseHost,
        types::{AssetUpload, NewRelease, RemoteRelease, UploadedAsset},
    },
};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// GitHub release host using Octocrab for release records and a raw reqwest
/// client for asset uploads, which need a caller chosen content type.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
    client: Client,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = config.api_base();

        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(base_uri)?
            .build()?;

        let mut headers = HeaderMap::new();

        let token_value = HeaderValue::from_str(
            format!("Bearer {}", config.token.expose_secret()).as_str(),
        )?;

        headers.append("Authorization", token_value);
        headers.append(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.append(USER_AGENT, HeaderValue::from_static(config::USER_AGENT));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            config,
            instance,
            client,
        })
    }
}

/// Resolve the hypermedia upload url (`.../assets{?name,label}`) into a
/// concrete url for `file_name`.
pub fn asset_upload_url(upload_url: &str, file_name: &str) -> Result<Url> {
    let base = match upload_url.find('{') {
        Some(idx) => &upload_url[..idx],
        None => upload_url,
    };

    let mut url = Url::parse(base)?;
    url.query_pairs_mut().append_pair("name", file_name);

    Ok(url)
}

impl From<Release> for RemoteRelease {
    fn from(release: Release) -> Self {
        Self {
            id: release.id.0,
            tag: release.tag_name,
            name: release.name.unwrap_or_default(),
            body: release.body.unwrap_or_default(),
            upload_url: release.upload_url.to_string(),
        }
    }
}

#[async_trait]
impl ReleaseHost for Github {
    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    async fn create_release(&self, req: NewRelease) -> Result<RemoteRelease> {
        debug!("creating release {} on {}", req.tag, self.config.path());

        let release = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .create(&req.tag)
            .name(&req.name)
            .body(&req.body)
            .draft(false)
            .prerelease(false)
            .send()
            .await?;

        Ok(release.into())
    }

    async fn get_latest_release(&self) -> Result<RemoteRelease> {
        let release = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .get_latest()
            .await?;

        Ok(release.into())
    }

    async fn upload_asset(
        &self,
        release: &RemoteRelease,
        asset: AssetUpload,
    ) -> Result<UploadedAsset> {
        if release.upload_url.is_empty() {
            return Err(ReleaseError::upload(format!(
                "release {} has no upload url",
                release.id
            )));
        }

        let url = asset_upload_url(&release.upload_url, &asset.file_name)?;

        debug!(
            "uploading {} bytes as {} to release {}",
            asset.data.len(),
            asset.file_name,
            release.id
        );

        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_str(&asset.content_type)?)
            .body(asset.data)
            .build()?;

        let response = self.client.execute(request).await?;
        let result = response.error_for_status()?;
        let uploaded: UploadedAsset = result.json().await?;

        Ok(uploaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_url_template_is_expanded() {
        let url = asset_upload_url(
            "https://uploads.github.com/repos/o/r/releases/42/assets{?name,label}",
            "Nupkg",
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://uploads.github.com/repos/o/r/releases/42/assets?name=Nupkg"
        );
    }

    #[test]
    fn upload_url_without_template_is_kept() {
        let url = asset_upload_url(
            "https://uploads.example.com/assets",
            "My App.nupkg",
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://uploads.example.com/assets?name=My+App.nupkg"
        );
    }

    #[test]
    fn invalid_upload_url_is_upload_failure() {
        let err = asset_upload_url("not a url{?name}", "x").unwrap_err();
        assert!(matches!(err, ReleaseError::UploadFailed(_)));
    }

    #[tokio::test]
    async fn github_client_builds_from_config() {
        let config = RemoteConfig::from_coordinate("o", "r", "token").unwrap();
        let github = Github::new(config).unwrap();
        assert_eq!(github.remote_config().path(), "o/r");
    }
}
