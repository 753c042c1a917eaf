//! Tests for the packaging operation.
//!
//! Tests for:
//! - Tool and package preconditions, checked before any process starts
//! - The generated tool command line
//! - stderr and exit status handling

use super::common::*;
use crate::{
    error::ReleaseError,
    packaging::{ExecutionResult, MockToolRunner},
    test_helpers::{write_built_package, write_fake_tool},
};

fn finished(exit_code: i32, stdout: &str, stderr: &str) -> ExecutionResult {
    ExecutionResult {
        exit_code: Some(exit_code),
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    }
}

#[test]
fn missing_tool_is_not_found_without_running() {
    let project = TestProject::new();
    write_built_package(project.work.path(), TEST_PACKAGE_ID, TEST_VERSION);
    let orchestrator = project.orchestrator_without_runs();

    match orchestrator.package().unwrap_err() {
        ReleaseError::NotFound { path, .. } => {
            assert_eq!(path, orchestrator.tool_path())
        }
        other => panic!("expected NotFound, got {other}"),
    }
}

#[test]
fn missing_package_is_not_found_without_running() {
    let project = TestProject::new();
    write_fake_tool(project.home.path());
    let orchestrator = project.orchestrator_without_runs();

    match orchestrator.package().unwrap_err() {
        ReleaseError::NotFound { path, .. } => {
            assert!(path.ends_with("MyApp.1.2.3.nupkg"))
        }
        other => panic!("expected NotFound, got {other}"),
    }
}

#[test]
fn runs_tool_with_releasify_arguments() {
    let project = TestProject::new();
    let tool = write_fake_tool(project.home.path());
    let package =
        write_built_package(project.work.path(), TEST_PACKAGE_ID, TEST_VERSION);
    let releases = project.work.path().join("Releases");
    let work_dir = project.work.path().to_path_buf();

    let mut runner = MockToolRunner::new();
    runner
        .expect_run()
        .times(1)
        .withf(move |inv| {
            inv.program == tool
                && inv.work_dir == work_dir
                && inv.args
                    == vec![
                        "--no-msi".to_string(),
                        "-r".to_string(),
                        releases.display().to_string(),
                        "--releasify".to_string(),
                        package.display().to_string(),
                    ]
        })
        .returning(|_| Ok(finished(0, "Releasifying package\n", "")));

    let orchestrator = project.orchestrator(runner);
    let result = orchestrator.package().unwrap();

    assert_eq!(result.stdout, "Releasifying package\n");
}

#[test]
fn stderr_fails_even_with_zero_exit_code() {
    let project = TestProject::new();
    write_fake_tool(project.home.path());
    write_built_package(project.work.path(), TEST_PACKAGE_ID, TEST_VERSION);

    let mut runner = MockToolRunner::new();
    runner
        .expect_run()
        .times(1)
        .returning(|_| Ok(finished(0, "", "Unhandled exception: boom\n")));

    let orchestrator = project.orchestrator(runner);

    match orchestrator.package().unwrap_err() {
        ReleaseError::ToolExecutionFailed(msg) => {
            assert_eq!(msg, "Unhandled exception: boom\n")
        }
        other => panic!("expected ToolExecutionFailed, got {other}"),
    }
}

#[test]
fn stderr_fails_with_non_zero_exit_code() {
    let project = TestProject::new();
    write_fake_tool(project.home.path());
    write_built_package(project.work.path(), TEST_PACKAGE_ID, TEST_VERSION);

    let mut runner = MockToolRunner::new();
    runner
        .expect_run()
        .times(1)
        .returning(|_| Ok(finished(2, "", "bad args")));

    let orchestrator = project.orchestrator(runner);

    match orchestrator.package().unwrap_err() {
        ReleaseError::ToolExecutionFailed(msg) => assert_eq!(msg, "bad args"),
        other => panic!("expected ToolExecutionFailed, got {other}"),
    }
}

#[test]
fn silent_non_zero_exit_fails() {
    let project = TestProject::new();
    write_fake_tool(project.home.path());
    write_built_package(project.work.path(), TEST_PACKAGE_ID, TEST_VERSION);

    let mut runner = MockToolRunner::new();
    runner
        .expect_run()
        .times(1)
        .returning(|_| Ok(finished(1, "partial output", "")));

    let orchestrator = project.orchestrator(runner);

    match orchestrator.package().unwrap_err() {
        ReleaseError::ToolExecutionFailed(msg) => {
            assert!(msg.contains("exit code 1"))
        }
        other => panic!("expected ToolExecutionFailed, got {other}"),
    }
}

#[test]
fn runner_errors_propagate() {
    let project = TestProject::new();
    write_fake_tool(project.home.path());
    write_built_package(project.work.path(), TEST_PACKAGE_ID, TEST_VERSION);

    let mut runner = MockToolRunner::new();
    runner.expect_run().times(1).returning(|_| {
        Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "not executable",
        )
        .into())
    });

    let orchestrator = project.orchestrator(runner);
    assert!(matches!(orchestrator.package(), Err(ReleaseError::Io(_))));
}

#[cfg(unix)]
mod process {
    use super::*;
    use crate::{packaging::ProcessRunner, test_helpers::write_script};
    use std::path::PathBuf;

    fn install_tool(project: &TestProject, body: &str) -> PathBuf {
        let dir = project.home.path().join("tools");
        std::fs::create_dir_all(&dir).unwrap();
        write_script(&dir, "Squirrel.exe", body)
    }

    #[test]
    fn real_tool_writing_stderr_fails_despite_success_exit() {
        let project = TestProject::new();
        install_tool(&project, "echo working\necho 'warning: no icon' >&2\nexit 0\n");
        write_built_package(project.work.path(), TEST_PACKAGE_ID, TEST_VERSION);

        let orchestrator = project.orchestrator(ProcessRunner);

        match orchestrator.package().unwrap_err() {
            ReleaseError::ToolExecutionFailed(msg) => {
                assert_eq!(msg, "warning: no icon\n")
            }
            other => panic!("expected ToolExecutionFailed, got {other}"),
        }
    }

    #[test]
    fn real_tool_success_writes_releases() {
        let project = TestProject::new();
        install_tool(
            &project,
            "mkdir -p \"$3\"\ntouch \"$3/RELEASES\"\necho \"releasified $5\"\n",
        );
        write_built_package(project.work.path(), TEST_PACKAGE_ID, TEST_VERSION);

        let orchestrator = project.orchestrator(ProcessRunner);
        let result = orchestrator.package().unwrap();

        assert!(result.stdout.contains("MyApp.1.2.3.nupkg"));
        assert!(orchestrator.releases_dir().join("RELEASES").is_file());
    }
}
