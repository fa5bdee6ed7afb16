//! Liveness probe for the podman service inside the guest.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use crate::application::ports::ExecutionChannel;
use crate::domain::error::PodmanError;
use crate::domain::liveness::{process_count_command, service_running_from_count};

/// Whether `podman system service` is running inside the guest.
///
/// Counts matching lines in `ps -ef` and discounts the probe's own shell and
/// grep; see [`service_running_from_count`] for the caveats.
///
/// # Errors
///
/// - [`PodmanError::Execution`] if the guest command fails.
/// - [`PodmanError::Parse`] if the count is not an integer.
pub async fn service_is_running(guest: &impl ExecutionChannel) -> Result<bool, PodmanError> {
    let command = process_count_command();
    let output = guest
        .run_output(&["bash", "-c", &command])
        .await
        .map_err(|e| PodmanError::execution("Can't check if podman Socket is running in VM", e))?;
    let running = service_running_from_count(&output)?;
    tracing::debug!(count = %output, running, "probed podman service");
    Ok(running)
}
