//! Interface to the remote hosting service releases are published to.
//!
//! Provides token-based authentication, release creation, latest release
//! lookup and binary asset upload through a common trait.

/// Configuration and authentication for the hosting service.
pub mod config;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Common traits for hosting service abstraction.
pub mod traits;

/// Shared data types for releases and assets.
pub mod types;
