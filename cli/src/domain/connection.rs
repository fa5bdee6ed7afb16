//! Host-side connection naming and addressing.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Suffix distinguishing the rootful connection from the rootless one.
pub const ROOTFUL_SUFFIX: &str = "-root";

/// SSH identity lima generates for its VMs, relative to the home directory.
pub const LIMA_IDENTITY: &str = ".lima/_config/user";

/// The operating user on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostUser {
    pub username: String,
    pub home_dir: PathBuf,
}

impl HostUser {
    /// Path of the lima SSH identity under this user's home directory.
    #[must_use]
    pub fn identity_path(&self) -> PathBuf {
        identity_path(&self.home_dir)
    }
}

/// Podman sockets inside the guest, one per privilege variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketPaths {
    /// Socket of the per-user podman service.
    #[serde(default = "default_rootless_socket")]
    pub rootless: String,
    /// Socket of the system-wide podman service.
    #[serde(default = "default_rootful_socket")]
    pub rootful: String,
}

impl Default for SocketPaths {
    fn default() -> Self {
        Self {
            rootless: default_rootless_socket(),
            rootful: default_rootful_socket(),
        }
    }
}

fn default_rootless_socket() -> String {
    "/run/user/1000/podman/podman.sock".to_string()
}

fn default_rootful_socket() -> String {
    "/run/podman/podman.sock".to_string()
}

#[must_use]
pub fn identity_path(home_dir: &Path) -> PathBuf {
    home_dir.join(LIMA_IDENTITY)
}

/// `ssh://<username>@localhost:<port>`, the tunnel both connections share.
#[must_use]
pub fn ssh_uri(username: &str, port: i64) -> String {
    format!("ssh://{username}@localhost:{port}")
}

/// Name of the rootful connection for `vm_name`.
#[must_use]
pub fn rootful_name(vm_name: &str) -> String {
    format!("{vm_name}{ROOTFUL_SUFFIX}")
}

/// Both connection names owned by `vm_name`, rootless first.
#[must_use]
pub fn connection_names(vm_name: &str) -> [String; 2] {
    [vm_name.to_string(), rootful_name(vm_name)]
}
