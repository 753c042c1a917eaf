use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Request to create a new release record.
pub struct NewRelease {
    pub tag: String,
    pub name: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Release record as known by the remote host.
pub struct RemoteRelease {
    pub id: u64,
    pub tag: String,
    pub name: String,
    pub body: String,
    /// Endpoint binary assets for this release are posted to.
    pub upload_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Binary attachment for a release.
pub struct AssetUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Asset as returned by the host after a successful upload.
pub struct UploadedAsset {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub browser_download_url: String,
}
