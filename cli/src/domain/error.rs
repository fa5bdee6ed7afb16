//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Runtime errors ────────────────────────────────────────────────────────────

/// Errors raised while querying or mutating the VM registry, the host
/// connection registry, or the guest's process table.
#[derive(Debug, Error)]
pub enum PodmanError {
    /// An external command failed to spawn or exited non-zero.
    #[error("{context}: {cause:#}")]
    Execution {
        context: String,
        cause: anyhow::Error,
    },

    /// A registry or guest command produced output of the wrong shape.
    #[error("{context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The VM registry was queried successfully but has no such VM.
    #[error("VM '{vm}' wasn't found in lima VMs. Is it running?")]
    NotFound { vm: String },

    #[error("podman service is not running inside VM '{vm}'")]
    ServiceNotRunning { vm: String },
}

impl PodmanError {
    pub(crate) fn execution(context: impl Into<String>, cause: anyhow::Error) -> Self {
        Self::Execution {
            context: context.into(),
            cause,
        }
    }

    pub(crate) fn parse(
        context: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Parse {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Returns `true` for the expected "VM does not exist" condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Stable machine-readable code used in `--json` error objects.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Execution { .. } => "execution_failed",
            Self::Parse { .. } => "parse_failed",
            Self::NotFound { .. } => "vm_not_found",
            Self::ServiceNotRunning { .. } => "service_not_running",
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
