//! VM discovery: find the managed VM's current SSH-forwarded port.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use crate::application::ports::ExecutionChannel;
use crate::domain::error::PodmanError;
use crate::domain::registry::{self, VirtualMachineRecord};

/// Host command listing lima VMs, one JSON object per line.
pub const LIST_VMS: &[&str] = &["limactl", "list", "--json"];

/// Look up `vm_name` in the lima registry.
///
/// The registry is queried fresh on every call.
///
/// # Errors
///
/// - [`PodmanError::Execution`] if `limactl list` fails.
/// - [`PodmanError::Parse`] if a listing line before the match is malformed.
/// - [`PodmanError::NotFound`] if the VM does not exist.
pub async fn find_vm_record(
    host: &impl ExecutionChannel,
    vm_name: &str,
) -> Result<VirtualMachineRecord, PodmanError> {
    let listing = host
        .run_output(LIST_VMS)
        .await
        .map_err(|e| PodmanError::execution("Can't get lima VMs on host", e))?;
    let vm = registry::find_vm(&listing, vm_name)?;
    tracing::debug!(
        vm = %vm.name,
        status = %vm.status,
        port = vm.ssh_local_port,
        "found lima VM"
    );
    Ok(vm)
}

/// SSH port lima currently forwards to `vm_name`.
///
/// The port changes whenever the VM is recreated, so callers must not keep it
/// across invocations.
///
/// # Errors
///
/// Same as [`find_vm_record`].
pub async fn ssh_port(host: &impl ExecutionChannel, vm_name: &str) -> Result<i64, PodmanError> {
    find_vm_record(host, vm_name)
        .await
        .map(|vm| vm.ssh_local_port)
}
