//! Application service — runtime status gathering use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use serde::Serialize;

use crate::application::ports::ExecutionChannel;
use crate::application::services::{discovery, liveness, setup, validator};
use crate::domain::error::PodmanError;
use crate::domain::registry::{self, ConnectionRecord};

/// Point-in-time view of the VM and the host's connections to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeStatus {
    pub vm_name: String,
    /// `None` when the VM is not in the lima registry.
    pub ssh_port: Option<i64>,
    pub installed: bool,
    /// `None` when podman is not installed or the VM is missing.
    pub service_running: Option<bool>,
    pub connection_valid: bool,
    /// Host connections carrying the VM name prefix.
    pub connections: Vec<ConnectionRecord>,
}

/// Gather the VM's port, podman state in the guest and host connections.
///
/// A missing VM is reported in the result, not as an error.
///
/// # Errors
///
/// Returns [`PodmanError::Execution`] or [`PodmanError::Parse`] if any
/// registry or guest query fails.
pub async fn gather_status(
    host: &impl ExecutionChannel,
    guest: &impl ExecutionChannel,
    vm_name: &str,
) -> Result<RuntimeStatus, PodmanError> {
    let ssh_port = match discovery::ssh_port(host, vm_name).await {
        Ok(port) => Some(port),
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e),
    };

    let connections = validator::matching_connections(host, vm_name).await?;
    let connection_valid = ssh_port.is_some_and(|port| {
        registry::first_matching(&connections, vm_name).is_some_and(|c| c.points_at(port))
    });

    let (installed, service_running) = if ssh_port.is_some() && setup::is_installed(guest).await {
        (true, Some(liveness::service_is_running(guest).await?))
    } else {
        (false, None)
    };

    Ok(RuntimeStatus {
        vm_name: vm_name.to_string(),
        ssh_port,
        installed,
        service_running,
        connection_valid,
        connections,
    })
}
