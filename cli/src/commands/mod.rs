//! Command implementations

pub mod config;
pub mod connect;
pub mod setup;
pub mod status;
pub mod version;
