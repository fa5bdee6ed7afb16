//! Connection validation: does the host's podman registry still point at the
//! VM's current SSH port?
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use crate::application::ports::ExecutionChannel;
use crate::domain::error::PodmanError;
use crate::domain::registry::{self, ConnectionRecord};

/// Host command listing podman connections as one JSON array.
pub const LIST_CONNECTIONS: &[&str] = &["podman", "system", "connection", "list", "--format", "json"];

/// Read the host connection registry.
///
/// # Errors
///
/// - [`PodmanError::Execution`] if `podman system connection list` fails.
/// - [`PodmanError::Parse`] if its output is not a JSON array of connections.
pub async fn list_connections(
    host: &impl ExecutionChannel,
) -> Result<Vec<ConnectionRecord>, PodmanError> {
    let json = host
        .run_output(LIST_CONNECTIONS)
        .await
        .map_err(|e| PodmanError::execution("Can't get podman connections on host", e))?;
    registry::parse_connections(&json)
}

/// Connections whose name carries the `vm_name` prefix, in listing order.
///
/// # Errors
///
/// Same as [`list_connections`].
pub async fn matching_connections(
    host: &impl ExecutionChannel,
    vm_name: &str,
) -> Result<Vec<ConnectionRecord>, PodmanError> {
    let mut connections = list_connections(host).await?;
    connections.retain(|c| registry::matches_vm_prefix(&c.name, vm_name));
    Ok(connections)
}

/// Whether the first connection matching `vm_name` points at `ssh_port`.
///
/// "Not configured" and "configured but stale" both yield `false`.
///
/// # Errors
///
/// Same as [`list_connections`]; a missing connection is not an error.
pub async fn connection_is_valid(
    host: &impl ExecutionChannel,
    ssh_port: i64,
    vm_name: &str,
) -> Result<bool, PodmanError> {
    let connections = list_connections(host).await?;
    let Some(connection) = registry::first_matching(&connections, vm_name) else {
        tracing::debug!(vm = vm_name, "no podman connection registered");
        return Ok(false);
    };
    let valid = connection.points_at(ssh_port);
    tracing::debug!(
        connection = %connection.name,
        uri = %connection.uri,
        expected_port = ssh_port,
        valid,
        "checked podman connection"
    );
    Ok(valid)
}
