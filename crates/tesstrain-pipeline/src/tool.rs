// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// External tool execution.
//
// Every training tool runs to completion inside the session's work directory
// with stdout and stderr captured. The runner reports exit status and streams
// as data; deciding whether a stage failed is the pipeline's job.

use std::ffi::OsString;
use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tesstrain_core::error::{Result, TrainerError};
use tokio::process::Command;
use tracing::{debug, instrument};

/// A single command line to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<OsString>,
    pub current_dir: PathBuf,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>, current_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: current_dir.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Shell-like rendering for logs.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Captured result of a finished tool.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Exit code, or `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

/// Runs external tools on behalf of the pipeline.
pub trait ToolRunner {
    /// Run `invocation` to completion and capture its output.
    ///
    /// Returns `Err` only when the tool could not be run at all (spawn
    /// failure, timeout). A tool that ran and exited non-zero is reported
    /// through [`ToolOutput::success`].
    fn run(&self, invocation: &ToolInvocation) -> impl Future<Output = Result<ToolOutput>> + Send;
}

/// Spawns real processes, killing any that outlive the timeout.
#[derive(Debug, Clone)]
pub struct SystemToolRunner {
    timeout: Duration,
}

impl SystemToolRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl ToolRunner for SystemToolRunner {
    #[instrument(skip_all, fields(tool = %invocation.program))]
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput> {
        let started = Instant::now();

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .current_dir(&invocation.current_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        // Dropping the `output()` future on timeout kills the child.
        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| TrainerError::ToolTimeout {
                tool: invocation.program.clone(),
                timeout: self.timeout,
            })?
            .map_err(|source| TrainerError::ToolSpawn {
                tool: invocation.program.clone(),
                source,
            })?;

        let elapsed = started.elapsed();
        debug!(
            status = ?output.status.code(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Tool exited"
        );

        Ok(ToolOutput {
            status: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_joins_arguments() {
        let invocation = ToolInvocation::new("mftraining", "/tmp")
            .arg("-F")
            .arg("font_properties")
            .args(["-U", "unicharset", "eng.mono.exp0.tr"]);
        assert_eq!(
            invocation.command_line(),
            "mftraining -F font_properties -U unicharset eng.mono.exp0.tr"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_streams_and_exit_status() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = SystemToolRunner::new(Duration::from_secs(10));
        let invocation = ToolInvocation::new("sh", dir.path())
            .args(["-c", "echo out; echo err >&2; exit 3"]);

        let output = runner.run(&invocation).await.expect("run");
        assert!(!output.success);
        assert_eq!(output.status, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runs_inside_the_requested_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = SystemToolRunner::new(Duration::from_secs(10));
        let invocation = ToolInvocation::new("sh", dir.path()).args(["-c", "touch marker"]);

        let output = runner.run(&invocation).await.expect("run");
        assert!(output.success);
        assert!(dir.path().join("marker").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn hung_tool_times_out() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = SystemToolRunner::new(Duration::from_millis(100));
        let invocation = ToolInvocation::new("sleep", dir.path()).arg("5");

        let err = runner.run(&invocation).await.unwrap_err();
        assert!(matches!(err, TrainerError::ToolTimeout { .. }));
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = SystemToolRunner::new(Duration::from_secs(1));
        let invocation = ToolInvocation::new("tesstrain-no-such-tool", dir.path());

        match runner.run(&invocation).await.unwrap_err() {
            TrainerError::ToolSpawn { tool, .. } => assert_eq!(tool, "tesstrain-no-such-tool"),
            other => panic!("unexpected error variant: {other}"),
        }
    }
}
