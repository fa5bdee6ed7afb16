//! Application context — unified state passed to every command handler.
//!
//! Built once from the global flags: loads the configuration, resolves the
//! target VM from `--profile`, and wires the host and guest execution
//! channels to real or dry-run processes.

use anyhow::Result;

use crate::application::services::config_service;
use crate::infra::channel::ProcessChannel;
use crate::infra::command_runner::ProcessRunner;
use crate::infra::config::YamlConfigStore;
use crate::domain::PodbridgeConfig;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `PODBRIDGE_YES` env vars).
    pub yes: bool,
    /// Log external commands instead of running them.
    pub dry_run: bool,
    /// Colima-style profile selecting the VM.
    pub profile: Option<String>,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Where the configuration lives.
    pub config_store: YamlConfigStore,
    /// Configuration loaded at startup.
    pub config: PodbridgeConfig,
    /// VM targeted by this invocation, after profile resolution.
    pub vm_name: String,
    /// Commands run on the host (`limactl`, `podman system connection`).
    pub host: ProcessChannel<ProcessRunner>,
    /// Commands run inside the VM through `limactl shell`.
    pub guest: ProcessChannel<ProcessRunner>,
    /// When `true`, skip interactive prompts and use defaults.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("PODBRIDGE_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let config_store = YamlConfigStore;
        let config = config_service::load_config(&config_store)?;
        let vm_name = config.vm_name_for(flags.behaviour.profile.as_deref());
        tracing::debug!(vm = %vm_name, dry_run = flags.behaviour.dry_run, "resolved target VM");

        let dry_run = flags.behaviour.dry_run;
        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            config_store,
            host: ProcessChannel::host(ProcessRunner::new(dry_run)),
            guest: ProcessChannel::guest(ProcessRunner::new(dry_run), vm_name.clone()),
            config,
            vm_name,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `PODBRIDGE_YES`
    /// env), returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
