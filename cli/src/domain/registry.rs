//! Wire formats of the two registries podbridge reads.
//!
//! `limactl list --json` prints one JSON object per line, while
//! `podman system connection list --format json` prints a single JSON array.
//! Both shapes are external contracts and are decoded separately.
//!
//! Pure functions only — no I/O, no async.

use serde::{Deserialize, Serialize};

use crate::domain::error::PodmanError;

// ── VM registry ───────────────────────────────────────────────────────────────

/// One entry of the lima VM listing.
///
/// `ssh_local_port` is only meaningful while the VM is running and may change
/// whenever the VM is recreated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualMachineRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Dir")]
    pub directory: String,
    #[serde(rename = "Arch")]
    pub architecture: String,
    #[serde(rename = "SSHLocalPort")]
    pub ssh_local_port: i64,
    #[serde(rename = "HostAgentPID")]
    pub host_agent_pid: i64,
    #[serde(rename = "QemuPID")]
    pub hypervisor_pid: i64,
}

/// Iterate the non-blank lines of a listing with their 1-based line numbers.
fn listing_lines(output: &str) -> impl Iterator<Item = (usize, &str)> {
    output
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn decode_vm_line(lineno: usize, line: &str) -> Result<VirtualMachineRecord, PodmanError> {
    serde_json::from_str(line)
        .map_err(|e| PodmanError::parse(format!("decoding lima VM listing line {lineno}"), e))
}

/// Decode a complete newline-delimited VM listing.
///
/// Blank lines are skipped.
///
/// # Errors
///
/// Returns [`PodmanError::Parse`] naming the first line that is not a VM record.
pub fn parse_vm_listing(output: &str) -> Result<Vec<VirtualMachineRecord>, PodmanError> {
    listing_lines(output)
        .map(|(lineno, line)| decode_vm_line(lineno, line))
        .collect()
}

/// Scan a VM listing in order and return the first record named `name`.
///
/// Lines after the match are never decoded, so trailing garbage does not
/// hide a VM that was already found.
///
/// # Errors
///
/// - [`PodmanError::Parse`] if a line before the match is malformed.
/// - [`PodmanError::NotFound`] if no record carries `name`.
pub fn find_vm(output: &str, name: &str) -> Result<VirtualMachineRecord, PodmanError> {
    for (lineno, line) in listing_lines(output) {
        let vm = decode_vm_line(lineno, line)?;
        if vm.name == name {
            return Ok(vm);
        }
    }
    Err(PodmanError::NotFound {
        vm: name.to_string(),
    })
}

/// Encode records in the same one-object-per-line format `limactl` emits.
///
/// # Errors
///
/// Returns an error if a record cannot be serialized.
pub fn encode_vm_listing(records: &[VirtualMachineRecord]) -> serde_json::Result<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}

// ── Connection registry ───────────────────────────────────────────────────────

/// One entry of the host's podman connection registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Identity")]
    pub identity: String,
    #[serde(rename = "URI")]
    pub uri: String,
}

impl ConnectionRecord {
    /// The port segment of this record's URI, see [`uri_port`].
    #[must_use]
    pub fn port(&self) -> Option<&str> {
        uri_port(&self.uri)
    }

    /// Whether this record points at `port`.
    #[must_use]
    pub fn points_at(&self, port: i64) -> bool {
        self.port() == Some(port.to_string().as_str())
    }
}

/// Decode the connection registry's JSON array.
///
/// Empty output and `null` both mean an empty registry.
///
/// # Errors
///
/// Returns [`PodmanError::Parse`] if the output is not a JSON array of
/// connection objects.
pub fn parse_connections(output: &str) -> Result<Vec<ConnectionRecord>, PodmanError> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let parsed: Option<Vec<ConnectionRecord>> = serde_json::from_str(trimmed)
        .map_err(|e| PodmanError::parse("decoding podman connections json", e))?;
    Ok(parsed.unwrap_or_default())
}

/// The raw third `:`-separated segment of `uri`, or `None` if there is none.
///
/// Anything after the port, such as a socket path podman appended, stays in
/// the segment, so such a URI never equals a bare port.
#[must_use]
pub fn uri_port(uri: &str) -> Option<&str> {
    uri.split(':').nth(2)
}

/// Whether `connection_name` belongs to `vm_name`: the name itself or the
/// name followed by anything, such as the `-root` variant.
#[must_use]
pub fn matches_vm_prefix(connection_name: &str, vm_name: &str) -> bool {
    connection_name.starts_with(vm_name)
}

/// First record, in listing order, whose name carries the `vm_name` prefix.
#[must_use]
pub fn first_matching<'a>(
    records: &'a [ConnectionRecord],
    vm_name: &str,
) -> Option<&'a ConnectionRecord> {
    records
        .iter()
        .find(|record| matches_vm_prefix(&record.name, vm_name))
}
