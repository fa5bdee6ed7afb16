//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;

use crate::application::services::reconcile::ReconcileOutcome;
use crate::application::services::status::RuntimeStatus;
use crate::domain::config::PodbridgeConfig;
use crate::output::OutputContext;

/// Renders results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    pub fn render_version(&self, version: &str) {
        if !self.ctx.quiet {
            println!("podbridge {version}");
        }
    }

    /// Render the outcome of `podbridge connect`.
    pub fn render_connect(&self, vm_name: &str, outcome: &ReconcileOutcome) {
        match outcome {
            ReconcileOutcome::AlreadyValid { port } => self.ctx.info(&format!(
                "Connection '{vm_name}' already points at port {port}"
            )),
            ReconcileOutcome::Recreated { port, .. } => self.ctx.success(&format!(
                "Connections '{vm_name}' and '{vm_name}-root' point at port {port}"
            )),
        }
    }

    /// Render VM, guest and connection status.
    pub fn render_status(&self, status: &RuntimeStatus) {
        if self.ctx.quiet {
            return;
        }
        let ssh_port = status
            .ssh_port
            .map_or_else(|| "not found".to_string(), |p| p.to_string());
        let podman = if status.installed {
            "installed"
        } else {
            "not installed"
        };
        let service = match status.service_running {
            Some(true) => "running",
            Some(false) => "not running",
            None => "unknown",
        };
        let connection = if status.connection_valid {
            "valid".style(self.ctx.styles.success).to_string()
        } else {
            "stale or missing".style(self.ctx.styles.warning).to_string()
        };

        self.ctx.kv("VM:", &status.vm_name);
        self.ctx.kv("SSH port:", &ssh_port);
        self.ctx.kv("Podman:", podman);
        self.ctx.kv("Service:", service);
        self.ctx.kv("Connection:", &connection);

        if !status.connections.is_empty() {
            println!();
            println!("  {}", "Connections:".style(self.ctx.styles.bold));
            for c in &status.connections {
                println!("    {:<20} {}", c.name, c.uri.style(self.ctx.styles.dim));
            }
        }
    }

    /// Render the effective configuration and where it was loaded from.
    pub fn render_config(&self, config: &PodbridgeConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<24} {}", "vm_name:", config.vm_name);
        println!("  {:<24} {}", "sockets.rootless:", config.sockets.rootless);
        println!("  {:<24} {}", "sockets.rootful:", config.sockets.rootful);
        println!("  {:<24} {}", "repository.url:", config.repository.url);
        println!("  {:<24} {}", "repository.key_url:", config.repository.key_url);
        println!("  {:<24} {}", "repository.list_path:", config.repository.list_path);
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["PODBRIDGE_CONFIG", "RUST_LOG", "NO_COLOR"] {
            println!(
                "    {:<22} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }
}
