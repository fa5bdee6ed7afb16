//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod connection;
pub mod error;
pub mod liveness;
pub mod registry;

pub use config::{PackageRepository, PodbridgeConfig, validate_config_key, validate_config_value};
pub use connection::{HostUser, SocketPaths};
pub use error::{ConfigError, PodmanError};
pub use registry::{ConnectionRecord, VirtualMachineRecord};
