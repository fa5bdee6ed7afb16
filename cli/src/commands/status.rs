//! `podbridge status` — show the VM, podman and connection state.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::services::status::gather_status;

/// Run the status command.
///
/// Exits non-zero when the host's connection does not point at the VM, so
/// scripts can use `podbridge status --quiet` as a check.
///
/// # Errors
///
/// Returns an error if a registry or guest query fails.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let status = gather_status(&app.host, &app.guest, &app.vm_name).await?;
    app.renderer().render_status(&status)?;
    if status.connection_valid {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
