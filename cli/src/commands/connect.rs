//! `podbridge connect` — point the host's podman connections at the VM.

use anyhow::{Context, Result};
use std::process::ExitCode;

use clap::Args;

use crate::app::AppContext;
use crate::application::services::reconcile::{self, ReconcileSettings};
use crate::infra::user::current_user;
use crate::output::TerminalReporter;

/// Arguments for the connect command.
#[derive(Args)]
pub struct ConnectArgs {
    /// Fail unless the podman service is running inside the VM
    #[arg(long)]
    pub require_service: bool,
}

/// Run the connect command.
///
/// # Errors
///
/// Returns an error if the VM is missing, a registry cannot be read, or a
/// connection cannot be added.
pub async fn run(app: &AppContext, args: &ConnectArgs) -> Result<ExitCode> {
    let user = current_user()?;
    let settings = ReconcileSettings {
        vm_name: &app.vm_name,
        sockets: &app.config.sockets,
        require_service: args.require_service,
    };
    let reporter = TerminalReporter::new(&app.output);

    let outcome = reconcile::reconcile(&app.host, &app.guest, &user, &settings, &reporter)
        .await
        .with_context(|| format!("connecting podman to VM '{}'", app.vm_name))?;

    app.renderer().render_connect(&app.vm_name, &outcome)?;
    Ok(ExitCode::SUCCESS)
}
