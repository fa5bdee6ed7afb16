//! `podbridge setup` — install podman inside the VM.

use anyhow::Result;
use std::process::ExitCode;

use clap::Args;

use crate::app::AppContext;
use crate::application::services::setup;
use crate::output::TerminalReporter;

/// Arguments for the setup command.
#[derive(Args)]
pub struct SetupArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Run the setup command.
///
/// `--yes` is folded into `AppContext::non_interactive` before this runs.
///
/// # Errors
///
/// Returns an error if the prompt fails or any installation step fails.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let vm = &app.vm_name;
    if setup::is_installed(&app.guest).await {
        app.output
            .info(&format!("podman is already installed in VM '{vm}'"));
        return Ok(ExitCode::SUCCESS);
    }

    let prompt = format!(
        "Install podman in VM '{vm}' from {}?",
        app.config.repository.url
    );
    if !app.confirm(&prompt, true)? {
        app.output.warn("Setup cancelled");
        return Ok(ExitCode::FAILURE);
    }

    let reporter = TerminalReporter::new(&app.output);
    setup::setup_in_vm(&app.guest, &app.config.repository, &reporter).await?;
    app.output
        .success(&format!("podman is installed in VM '{vm}'; run `podbridge connect` next"));
    Ok(ExitCode::SUCCESS)
}
