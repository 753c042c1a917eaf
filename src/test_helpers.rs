//! Common test helper functions shared across test modules.
//!
//! This module provides reusable utilities for creating descriptor fixtures,
//! project layouts and fake tools, reducing code duplication across
//! different test suites.
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::{DEFAULT_ASSET_CONTENT_TYPE, DEFAULT_ASSET_NAME, DEFAULT_ASSET_PATH, Settings},
    forge::types::RemoteRelease,
};

pub const TEST_TOOL_PATH: &str = "tools/Squirrel.exe";

/// Creates descriptor XML carrying every required release element.
///
/// # Example
/// ```ignore
/// let content = create_test_descriptor("MyApp", "1.2.3");
/// ```
pub fn create_test_descriptor(package_id: &str, version: &str) -> String {
    format!(
        r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>net5.0-windows</TargetFramework>
    <PackageReleaseTitle>Test release</PackageReleaseTitle>
    <PackageReleaseNotes>Fixes &amp; improvements</PackageReleaseNotes>
    <RepositoryUrl>https://github.com/test/repo</RepositoryUrl>
    <PackageId>{package_id}</PackageId>
    <Version>{version}</Version>
  </PropertyGroup>
</Project>
"#
    )
}

/// Writes a descriptor named `file_name` into `dir` and returns its path.
pub fn write_descriptor(
    dir: &Path,
    file_name: &str,
    package_id: &str,
    version: &str,
) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, create_test_descriptor(package_id, version)).unwrap();
    path
}

/// Writes an executable shell script into `dir` and returns its path.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Creates settings pointing at [`TEST_TOOL_PATH`] with default asset values.
pub fn create_test_settings() -> Settings {
    Settings {
        squirrel_path: TEST_TOOL_PATH.to_string(),
        squirrel_args: "--no-msi".to_string(),
        github_owner: Some("test".to_string()),
        github_repo: Some("repo".to_string()),
        asset_path: DEFAULT_ASSET_PATH.to_string(),
        asset_name: DEFAULT_ASSET_NAME.to_string(),
        asset_content_type: DEFAULT_ASSET_CONTENT_TYPE.to_string(),
    }
}

/// Creates the built package `bin/Release/{package_id}.{version}.nupkg`
/// below `project_dir`.
pub fn write_built_package(
    project_dir: &Path,
    package_id: &str,
    version: &str,
) -> PathBuf {
    let dir = project_dir.join("bin").join("Release");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{package_id}.{version}.nupkg"));
    fs::write(&path, b"PK\x03\x04").unwrap();
    path
}

/// Creates an empty file standing in for the packaging tool below `home`.
pub fn write_fake_tool(home: &Path) -> PathBuf {
    let path = home.join(TEST_TOOL_PATH);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "").unwrap();
    path
}

/// Creates a remote release as returned by a successful create call.
pub fn create_test_release(id: u64, tag: &str) -> RemoteRelease {
    RemoteRelease {
        id,
        tag: tag.to_string(),
        name: "Test release".to_string(),
        body: "Fixes & improvements".to_string(),
        upload_url: format!(
            "https://uploads.github.com/repos/test/repo/releases/{id}/assets{{?name,label}}"
        ),
    }
}
