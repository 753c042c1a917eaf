//! Traits related to remote release hosts
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{
    Result,
    forge::{
        config::RemoteConfig,
        types::{AssetUpload, NewRelease, RemoteRelease, UploadedAsset},
    },
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReleaseHost: Send + Sync {
    fn remote_config(&self) -> RemoteConfig;
    async fn create_release(&self, req: NewRelease) -> Result<RemoteRelease>;
    async fn get_latest_release(&self) -> Result<RemoteRelease>;
    async fn upload_asset(
        &self,
        release: &RemoteRelease,
        asset: AssetUpload,
    ) -> Result<UploadedAsset>;
}
