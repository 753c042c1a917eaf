//! Common test utilities for orchestrator tests.

use std::path::PathBuf;
use tempfile::TempDir;

use crate::{
    orchestrator::ReleaseOrchestrator,
    packaging::{MockToolRunner, ToolRunner},
    test_helpers::{create_test_settings, write_descriptor},
};

pub const TEST_PACKAGE_ID: &str = "MyApp";
pub const TEST_VERSION: &str = "1.2.3";

/// Temporary project layout: a working directory holding the descriptor and
/// a separate user profile directory.
pub struct TestProject {
    pub work: TempDir,
    pub home: TempDir,
    pub descriptor: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        let work = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let descriptor = write_descriptor(
            work.path(),
            "MyApp.csproj",
            TEST_PACKAGE_ID,
            TEST_VERSION,
        );

        Self {
            work,
            home,
            descriptor,
        }
    }

    /// Creates an orchestrator over this project using `runner`.
    pub fn orchestrator(
        &self,
        runner: impl ToolRunner + 'static,
    ) -> ReleaseOrchestrator {
        ReleaseOrchestrator::builder()
            .project(self.descriptor.clone())
            .work_dir(self.work.path())
            .home_dir(self.home.path())
            .settings(create_test_settings())
            .runner(Box::new(runner))
            .build()
            .unwrap()
    }

    /// Orchestrator whose runner must never be called.
    pub fn orchestrator_without_runs(&self) -> ReleaseOrchestrator {
        self.orchestrator(MockToolRunner::new())
    }
}
