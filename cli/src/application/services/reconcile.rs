//! Reconcile the host's podman connections with the VM's current SSH port.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use serde::Serialize;

use crate::application::ports::{ExecutionChannel, ProgressReporter};
use crate::application::services::{discovery, installer, liveness, validator};
use crate::domain::connection::{HostUser, SocketPaths, connection_names};
use crate::domain::error::PodmanError;
use crate::domain::registry::ConnectionRecord;

/// Inputs of a reconcile run.
pub struct ReconcileSettings<'a> {
    /// VM whose connections are reconciled.
    pub vm_name: &'a str,
    /// Guest sockets the connections point at.
    pub sockets: &'a SocketPaths,
    /// Refuse to touch connections unless the podman service is up.
    pub require_service: bool,
}

/// What a reconcile run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconcileOutcome {
    /// The registered connection already pointed at the current port.
    AlreadyValid { port: i64 },
    /// Stale connections were removed and both connections re-added.
    Recreated { port: i64, removed: Vec<String> },
}

impl ReconcileOutcome {
    #[must_use]
    pub fn port(&self) -> i64 {
        match self {
            Self::AlreadyValid { port } | Self::Recreated { port, .. } => *port,
        }
    }
}

/// Make the host's connections for `settings.vm_name` point at the VM.
///
/// Discovery, validation and installation run one after another against
/// fresh registry reads. The run is a no-op only when both `<vm>` and
/// `<vm>-root` exist and point at the current port. Otherwise whichever of
/// the two exist are removed before both are added again, so repeated runs
/// do not pile up duplicates. Other connections that merely share the prefix
/// are left alone.
///
/// # Errors
///
/// - [`PodmanError::NotFound`] if the VM does not exist.
/// - [`PodmanError::ServiceNotRunning`] if `require_service` is set and the
///   service is down.
/// - [`PodmanError::Execution`] / [`PodmanError::Parse`] from any step.
pub async fn reconcile(
    host: &impl ExecutionChannel,
    guest: &impl ExecutionChannel,
    user: &HostUser,
    settings: &ReconcileSettings<'_>,
    reporter: &impl ProgressReporter,
) -> Result<ReconcileOutcome, PodmanError> {
    let vm_name = settings.vm_name;

    reporter.step("looking up VM ssh port...");
    let port = discovery::ssh_port(host, vm_name).await?;

    if settings.require_service {
        reporter.step("checking podman service in VM...");
        if !liveness::service_is_running(guest).await? {
            return Err(PodmanError::ServiceNotRunning {
                vm: vm_name.to_string(),
            });
        }
    }

    let owned = connection_names(vm_name);
    let existing = validator::matching_connections(host, vm_name).await?;
    if owned_connections_current(&existing, &owned, port) {
        tracing::info!(vm = vm_name, port, "podman connections are up to date");
        reporter.success(&format!("connections for '{vm_name}' are up to date (port {port})"));
        return Ok(ReconcileOutcome::AlreadyValid { port });
    }

    let mut removed: Vec<String> = Vec::new();
    for connection in existing {
        if owned.contains(&connection.name) && !removed.contains(&connection.name) {
            removed.push(connection.name);
        }
    }
    if !removed.is_empty() {
        reporter.warn(&format!("replacing stale connections: {}", removed.join(", ")));
        installer::remove_connections(host, &removed).await?;
    }

    reporter.step("adding podman connections...");
    installer::create_connections(host, user, port, vm_name, settings.sockets).await?;
    tracing::info!(vm = vm_name, port, removed = removed.len(), "podman connections recreated");
    reporter.success(&format!("connections '{vm_name}' and '{vm_name}-root' point at port {port}"));

    Ok(ReconcileOutcome::Recreated { port, removed })
}

/// Every owned name is registered and each of its entries points at `port`.
fn owned_connections_current(existing: &[ConnectionRecord], owned: &[String], port: i64) -> bool {
    owned.iter().all(|name| {
        let mut entries = existing.iter().filter(|c| &c.name == name).peekable();
        entries.peek().is_some() && entries.all(|c| c.points_at(port))
    })
}
