//! Domain types and validators for podbridge configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::connection::SocketPaths;
use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Name colima gives its VM when no profile is selected.
pub const DEFAULT_VM_NAME: &str = "colima";

/// Profile names that select the unsuffixed VM.
pub const DEFAULT_PROFILES: &[&str] = &["default", DEFAULT_VM_NAME];

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "vm_name",
    "sockets.rootless",
    "sockets.rootful",
    "repository.url",
    "repository.key_url",
    "repository.list_path",
];

/// Lima instance names: alphanumeric start, then alphanumerics, `.`, `_`, `-`.
#[allow(clippy::expect_used)] // literal pattern
static VM_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid VM name regex"));

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.podbridge/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PodbridgeConfig {
    /// Base name of the managed lima VM.
    pub vm_name: String,
    /// Podman sockets inside the guest.
    pub sockets: SocketPaths,
    /// Package repository podman is installed from.
    pub repository: PackageRepository,
}

impl Default for PodbridgeConfig {
    fn default() -> Self {
        Self {
            vm_name: DEFAULT_VM_NAME.to_string(),
            sockets: SocketPaths::default(),
            repository: PackageRepository::default(),
        }
    }
}

/// Third-party apt repository carrying a current podman.
///
/// The defaults pin the kubic `xUbuntu_21.04` build; they are not derived from
/// the guest's `/etc/os-release`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageRepository {
    /// Repository base URL written into the apt sources line.
    pub url: String,
    /// URL of the repository signing key.
    pub key_url: String,
    /// Sources list file inside the guest.
    pub list_path: String,
}

impl Default for PackageRepository {
    fn default() -> Self {
        Self {
            url: "https://download.opensuse.org/repositories/devel:/kubic:/libcontainers:/stable/xUbuntu_21.04/".to_string(),
            key_url: "https://download.opensuse.org/repositories/devel:/kubic:/libcontainers:/stable/xUbuntu_21.04/Release.key".to_string(),
            list_path: "/etc/apt/sources.list.d/devel:kubic:libcontainers:stable.list".to_string(),
        }
    }
}

impl PodbridgeConfig {
    /// VM targeted by `profile`, see [`resolve_vm_name`].
    #[must_use]
    pub fn vm_name_for(&self, profile: Option<&str>) -> String {
        resolve_vm_name(&self.vm_name, profile)
    }

    /// Current value of a whitelisted key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown.
    pub fn get(&self, key: &str) -> Result<&str> {
        validate_config_key(key)?;
        let value = match key {
            "vm_name" => &self.vm_name,
            "sockets.rootless" => &self.sockets.rootless,
            "sockets.rootful" => &self.sockets.rootful,
            "repository.url" => &self.repository.url,
            "repository.key_url" => &self.repository.key_url,
            _ => &self.repository.list_path,
        };
        Ok(value.as_str())
    }

    /// Validate and assign a whitelisted key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid for it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        let slot = match key {
            "vm_name" => &mut self.vm_name,
            "sockets.rootless" => &mut self.sockets.rootless,
            "sockets.rootful" => &mut self.sockets.rootful,
            "repository.url" => &mut self.repository.url,
            "repository.key_url" => &mut self.repository.key_url,
            _ => &mut self.repository.list_path,
        };
        *slot = value.to_string();
        Ok(())
    }
}

// ── Profiles ─────────────────────────────────────────────────────────────────

/// Resolve the VM name for a profile.
///
/// No profile, `default`, or the base name itself select `base`; any other
/// profile `p` selects `<base>-p`.
#[must_use]
pub fn resolve_vm_name(base: &str, profile: Option<&str>) -> String {
    match profile {
        None => base.to_string(),
        Some(p) if p == base || DEFAULT_PROFILES.contains(&p) => base.to_string(),
        Some(p) => format!("{base}-{p}"),
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let reason = match key {
        _ if value.contains('\'') => Some("Values are quoted in guest shell commands and must not contain '"),
        "vm_name" if !VM_NAME_RE.is_match(value) => {
            Some("VM names start with a letter or digit and contain only letters, digits, '.', '_' or '-'")
        }
        "sockets.rootless" | "sockets.rootful" | "repository.list_path"
            if !value.starts_with('/') =>
        {
            Some("Paths inside the VM must be absolute")
        }
        "repository.url" | "repository.key_url"
            if !(value.starts_with("https://") || value.starts_with("http://")) =>
        {
            Some("Repository URLs must start with https:// or http://")
        }
        _ => None,
    };
    if let Some(reason) = reason {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
        .into());
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
