//! Infrastructure implementation of the `ExecutionChannel` port.
//!
//! `ProcessChannel<R>` runs commands either directly on the host or inside
//! the lima VM through `limactl shell`, routing every process through a
//! `CommandRunner`.

use std::process::ExitStatus;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ExecutionChannel};

/// Where a `ProcessChannel` runs its commands.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Host,
    Guest { vm_name: String },
}

/// Execution channel backed by local processes.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct ProcessChannel<R: CommandRunner> {
    runner: R,
    target: Target,
}

impl<R: CommandRunner> ProcessChannel<R> {
    /// Channel running commands on the host.
    pub fn host(runner: R) -> Self {
        Self {
            runner,
            target: Target::Host,
        }
    }

    /// Channel running commands inside `vm_name` via `limactl shell`.
    pub fn guest(runner: R, vm_name: impl Into<String>) -> Self {
        Self {
            runner,
            target: Target::Guest {
                vm_name: vm_name.into(),
            },
        }
    }

    /// Program and arguments actually spawned for `args`.
    fn command_line(&self, args: &[&str]) -> Result<(String, Vec<String>)> {
        let (program, rest) = args.split_first().context("empty command")?;
        let owned = |s: &&str| (*s).to_string();
        Ok(match &self.target {
            Target::Host => ((*program).to_string(), rest.iter().map(owned).collect()),
            Target::Guest { vm_name } => {
                let mut full = vec!["shell".to_string(), vm_name.clone()];
                full.extend(args.iter().map(owned));
                ("limactl".to_string(), full)
            }
        })
    }

    async fn captured(&self, args: &[&str]) -> Result<std::process::Output> {
        let (program, rest) = self.command_line(args)?;
        let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
        let output = self.runner.run(&program, &rest).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(exit_error(args, output.status, stderr.trim()));
        }
        Ok(output)
    }
}

fn exit_error(args: &[&str], status: ExitStatus, stderr: &str) -> anyhow::Error {
    let line = args.join(" ");
    if stderr.is_empty() {
        anyhow::anyhow!("`{line}` failed: {status}")
    } else {
        anyhow::anyhow!("`{line}` failed: {status}\n{stderr}")
    }
}

impl<R: CommandRunner> ExecutionChannel for ProcessChannel<R> {
    async fn run(&self, args: &[&str]) -> Result<()> {
        let (program, rest) = self.command_line(args)?;
        let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
        let status = self.runner.run_foreground(&program, &rest).await?;
        if !status.success() {
            return Err(exit_error(args, status, ""));
        }
        Ok(())
    }

    async fn run_output(&self, args: &[&str]) -> Result<String> {
        let output = self.captured(args).await?;
        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }

    async fn run_quiet(&self, args: &[&str]) -> Result<()> {
        self.captured(args).await.map(drop)
    }

    async fn run_interactive(&self, args: &[&str]) -> Result<()> {
        let (program, rest) = self.command_line(args)?;
        let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
        let status = self.runner.run_status(&program, &rest).await?;
        if !status.success() {
            return Err(exit_error(args, status, ""));
        }
        Ok(())
    }
}
