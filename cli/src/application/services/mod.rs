//! Application services — use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports` — never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod config_service;
pub mod discovery;
pub mod installer;
pub mod liveness;
pub mod reconcile;
pub mod setup;
pub mod status;
pub mod validator;
