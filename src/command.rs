//! Command execution for releasify.
//!
//! Each command drives one stage of the release workflow:
//!
//! - **package**: run the packaging tool over the built `.nupkg`
//! - **upload**: create the GitHub release and attach the packaged asset
//! - **release**: package, then upload
//! - **update**: post-release project update hook (not supported yet)
//! - **latest**: show the latest release of the target repository
//!
//! Commands share their setup (settings, descriptor, release host) through
//! `common`.

/// Setup shared by every command.
pub mod common;

/// Show the latest remote release.
pub mod latest;

/// Run the packaging tool.
pub mod package;

/// Package and publish in one go.
pub mod release;

/// Project update hook.
pub mod update;

/// Publish the release and its asset.
pub mod upload;
