//! In-guest podman installation.
//!
//! The distribution's own podman is too old, so a third-party apt repository
//! is added before installing.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use crate::application::ports::{ExecutionChannel, ProgressReporter};
use crate::domain::config::PackageRepository;
use crate::domain::error::PodmanError;

/// Whether podman is on the guest's `PATH`.
///
/// Any failure of the probe, not only "command not found", reads as not
/// installed.
pub async fn is_installed(guest: &impl ExecutionChannel) -> bool {
    guest.run_quiet(&["command", "-v", "podman"]).await.is_ok()
}

/// Add `repo` to apt, trust its key, refresh the index and install podman.
///
/// Steps run strictly in order; the first failure aborts the rest and nothing
/// already done is undone. The install step runs interactively because the
/// package may ask before overwriting `/etc/fuse.conf`.
///
/// # Errors
///
/// Returns [`PodmanError::Execution`] naming the failed step.
pub async fn setup_in_vm(
    guest: &impl ExecutionChannel,
    repo: &PackageRepository,
    reporter: &impl ProgressReporter,
) -> Result<(), PodmanError> {
    reporter.step("adding podman repository...");
    let add_repo = format!(
        "echo 'deb {url} /' | sudo tee '{list}'",
        url = repo.url,
        list = repo.list_path
    );
    guest
        .run(&["bash", "-c", &add_repo])
        .await
        .map_err(|e| PodmanError::execution("Can't add kubic repo to sources.list.d dir", e))?;

    reporter.step("installing repository key...");
    let add_key = format!("curl -L '{key}' | sudo apt-key add -", key = repo.key_url);
    guest
        .run(&["bash", "-c", &add_key])
        .await
        .map_err(|e| PodmanError::execution("Can't install kubic apt key", e))?;

    reporter.step("updating package index...");
    guest
        .run(&["sudo", "apt", "update"])
        .await
        .map_err(|e| PodmanError::execution("error updating apt in VM", e))?;

    reporter.step("installing podman...");
    guest
        .run_interactive(&["sudo", "apt", "-y", "install", "podman"])
        .await
        .map_err(|e| PodmanError::execution("error installing podman in VM", e))?;

    reporter.success("podman installed in VM");
    Ok(())
}
