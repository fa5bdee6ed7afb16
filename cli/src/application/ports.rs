//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::{ExitStatus, Output};
use std::time::Duration;

use anyhow::Result;

use crate::domain::PodbridgeConfig;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
    /// Run a program with stdout/stderr attached to the terminal and stdin
    /// closed, returning only its exit status.
    async fn run_foreground(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
    /// Run a program with fully inherited stdio (interactive).
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
}

// ── Execution Channel Port ────────────────────────────────────────────────────

/// Runs one command somewhere: on the host, or inside the guest VM.
///
/// Every mode fails when the command cannot be started or exits non-zero;
/// the error carries the command line and, where captured, its stderr.
#[allow(async_fn_in_trait)]
pub trait ExecutionChannel {
    /// Run in the foreground, output going to the terminal.
    async fn run(&self, args: &[&str]) -> Result<()>;
    /// Run and return stdout with trailing whitespace trimmed.
    async fn run_output(&self, args: &[&str]) -> Result<String>;
    /// Run and discard all output.
    async fn run_quiet(&self, args: &[&str]) -> Result<()>;
    /// Run attached to the user's terminal, stdin included.
    async fn run_interactive(&self, args: &[&str]) -> Result<()>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts loading and persisting the user configuration.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when none exists.
    fn load(&self) -> Result<PodbridgeConfig>;
    /// Persist the configuration.
    fn save(&self, config: &PodbridgeConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}
