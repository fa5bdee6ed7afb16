//! Infrastructure implementations of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation that uses tokio
//! for async process execution with guaranteed timeout and kill on all platforms.
//! `DryRunCommandRunner` logs commands instead of running them.

use std::process::{ExitStatus, Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

use crate::application::ports::CommandRunner;

/// Default timeout for captured host and guest commands (`limactl list`,
/// `podman system connection list`, the liveness probe).
pub const DEFAULT_CMD_TIMEOUT: Duration = Duration::from_secs(30);

/// Production `CommandRunner` — uses tokio for async process execution
/// with guaranteed timeout and kill on all platforms.
///
/// On Windows, `tokio::time::timeout` around `.output().await` does NOT kill
/// the child process when the timeout fires — the future is dropped but the
/// OS process keeps running. This implementation uses `tokio::select!` with
/// explicit `child.kill()` to guarantee the process is terminated.
///
/// Foreground and interactive runs have no timeout: package installs can take
/// minutes and may wait on the user.
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_CMD_TIMEOUT)
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, self.timeout).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        tracing::debug!(program, ?args, "running captured command");
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        tokio::select! {
            result = async {
                let (status, stdout, stderr) = tokio::join!(
                    child.wait(),
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stdout_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stderr_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                );
                let status = status.with_context(|| format!("waiting for {program}"))?;
                tracing::debug!(program, %status, "captured command finished");
                Ok(Output { status, stdout, stderr })
            } => result,
            () = tokio::time::sleep(timeout) => {
                let _ = child.kill().await;
                anyhow::bail!("{program} timed out after {}s", timeout.as_secs())
            }
        }
    }

    async fn run_foreground(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        tracing::debug!(program, ?args, "running foreground command");
        let status = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .with_context(|| format!("failed to run {program}"))?;
        tracing::debug!(program, %status, "foreground command finished");
        Ok(status)
    }

    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        tracing::debug!(program, ?args, "running interactive command");
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        child
            .wait()
            .await
            .with_context(|| format!("waiting for {program}"))
    }
}

// ── Dry run ───────────────────────────────────────────────────────────────────

/// `CommandRunner` that only logs what it would run.
///
/// Every command "succeeds" with empty output, so queries see empty
/// registries: discovery reports the VM as missing.
#[derive(Default)]
pub struct DryRunCommandRunner;

impl DryRunCommandRunner {
    fn record(program: &str, args: &[&str]) {
        tracing::info!(program, ?args, "dry run: command not executed");
    }
}

impl CommandRunner for DryRunCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, DEFAULT_CMD_TIMEOUT).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<Output> {
        Self::record(program, args);
        Ok(Output {
            status: success_status(),
            stdout: Vec::new(),
            stderr: Vec::new(),
        })
    }

    async fn run_foreground(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        Self::record(program, args);
        Ok(success_status())
    }

    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        Self::record(program, args);
        Ok(success_status())
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// The runner chosen at startup: real processes, or `--dry-run`.
pub enum ProcessRunner {
    Live(TokioCommandRunner),
    DryRun(DryRunCommandRunner),
}

impl ProcessRunner {
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        if dry_run {
            Self::DryRun(DryRunCommandRunner)
        } else {
            Self::Live(TokioCommandRunner::default())
        }
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        match self {
            Self::Live(r) => r.run(program, args).await,
            Self::DryRun(r) => r.run(program, args).await,
        }
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        match self {
            Self::Live(r) => r.run_with_timeout(program, args, timeout).await,
            Self::DryRun(r) => r.run_with_timeout(program, args, timeout).await,
        }
    }

    async fn run_foreground(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        match self {
            Self::Live(r) => r.run_foreground(program, args).await,
            Self::DryRun(r) => r.run_foreground(program, args).await,
        }
    }

    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        match self {
            Self::Live(r) => r.run_status(program, args).await,
            Self::DryRun(r) => r.run_status(program, args).await,
        }
    }
}

#[cfg(unix)]
fn success_status() -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(0)
}

#[cfg(windows)]
fn success_status() -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(0)
}
