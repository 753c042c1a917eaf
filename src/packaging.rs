//! Invocation of the external Squirrel packaging tool.
use log::*;
use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

#[cfg(test)]
use mockall::automock;

use crate::Result;

/// Directory below the project where the built package is expected.
pub const BUILD_OUTPUT_DIR: [&str; 2] = ["bin", "Release"];
/// Directory below the project the tool writes release artifacts to.
pub const RELEASES_DIR: &str = "Releases";
/// Extension of the built package archive.
pub const PACKAGE_EXTENSION: &str = "nupkg";

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Fully resolved command line for one packaging tool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub work_dir: PathBuf,
}

impl ToolInvocation {
    /// Builds the `<configured> -r <releases> --releasify <package>` command.
    pub fn releasify(
        program: &Path,
        configured_args: &str,
        releases_dir: &Path,
        package: &Path,
        work_dir: &Path,
    ) -> Self {
        let mut args = split_args(configured_args);
        args.push("-r".into());
        args.push(releases_dir.display().to_string());
        args.push("--releasify".into());
        args.push(package.display().to_string());

        Self {
            program: program.to_path_buf(),
            args,
            work_dir: work_dir.to_path_buf(),
        }
    }
}

/// Outcome of a finished tool process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Exit code, `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a tool invocation to completion.
#[cfg_attr(test, automock)]
pub trait ToolRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<ExecutionResult>;
}

/// Runs tools as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<ExecutionResult> {
        debug!(
            "running {} {}",
            invocation.program.display(),
            invocation.args.join(" ")
        );

        let mut command = Command::new(&invocation.program);

        command
            .args(&invocation.args)
            .current_dir(&invocation.work_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        // output() closes stdin and drains stdout and stderr concurrently,
        // so a chatty tool cannot block on a full pipe
        let output = command.output()?;

        Ok(ExecutionResult {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Splits a configured argument string on whitespace, keeping double-quoted
/// runs together.
pub fn split_args(raw: &str) -> Vec<String> {
    let mut args = vec![];
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for ch in raw.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if has_token {
        args.push(current);
    }

    args
}
