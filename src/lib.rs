pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod forge;
pub mod metadata;
pub mod orchestrator;
pub mod packaging;

pub use error::{ReleaseError, Result};

#[cfg(test)]
pub mod test_helpers;
