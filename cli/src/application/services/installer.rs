//! Connection installation: register the rootless and rootful podman
//! connections for a VM on the host.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use crate::application::ports::ExecutionChannel;
use crate::domain::connection::{HostUser, SocketPaths, rootful_name, ssh_uri};
use crate::domain::error::PodmanError;

/// Add both podman connections for `vm_name`, rootless first.
///
/// The rootless connection is named `vm_name` and becomes the default; the
/// rootful one is named `<vm_name>-root`. Both use the lima identity under the
/// user's home and the same `ssh://<user>@localhost:<port>` URI.
///
/// Not idempotent: re-adding an existing name is left to podman's own
/// semantics. If the rootless add fails the rootful add is not attempted, and
/// a rootful failure leaves the rootless connection in place.
///
/// # Errors
///
/// Returns [`PodmanError::Execution`] naming the step that failed.
pub async fn create_connections(
    host: &impl ExecutionChannel,
    user: &HostUser,
    ssh_port: i64,
    vm_name: &str,
    sockets: &SocketPaths,
) -> Result<(), PodmanError> {
    let uri = ssh_uri(&user.username, ssh_port);
    let identity = user.identity_path().display().to_string();

    host.run(&[
        "podman",
        "system",
        "connection",
        "add",
        "--socket-path",
        &sockets.rootless,
        "-d",
        vm_name,
        "--identity",
        &identity,
        &uri,
    ])
    .await
    .map_err(|e| {
        PodmanError::execution(format!("adding rootless podman connection '{vm_name}'"), e)
    })?;
    tracing::info!(connection = vm_name, %uri, "added rootless podman connection");

    let rootful = rootful_name(vm_name);
    host.run(&[
        "podman",
        "system",
        "connection",
        "add",
        "--socket-path",
        &sockets.rootful,
        &rootful,
        "--identity",
        &identity,
        &uri,
    ])
    .await
    .map_err(|e| {
        PodmanError::execution(format!("adding rootful podman connection '{rootful}'"), e)
    })?;
    tracing::info!(connection = %rootful, %uri, "added rootful podman connection");

    Ok(())
}

/// Remove the named connections in order, stopping at the first failure.
///
/// # Errors
///
/// Returns [`PodmanError::Execution`] for the connection that could not be
/// removed; earlier removals are not undone.
pub async fn remove_connections(
    host: &impl ExecutionChannel,
    names: &[String],
) -> Result<(), PodmanError> {
    for name in names {
        host.run_quiet(&["podman", "system", "connection", "remove", name])
            .await
            .map_err(|e| PodmanError::execution(format!("removing podman connection '{name}'"), e))?;
        tracing::info!(connection = %name, "removed podman connection");
    }
    Ok(())
}
