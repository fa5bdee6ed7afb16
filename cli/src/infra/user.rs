//! Host user lookup.

use anyhow::{Context, Result};

use crate::domain::connection::HostUser;

/// The user podbridge runs as.
///
/// The login name comes from `USER` (`USERNAME` on Windows) and the home
/// directory from the platform's conventions.
///
/// # Errors
///
/// Returns an error if either cannot be determined.
pub fn current_user() -> Result<HostUser> {
    let username = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|name| !name.is_empty())
        .context("cannot determine current user: USER is not set")?;
    let home_dir = dirs::home_dir().context("cannot determine home directory")?;
    Ok(HostUser { username, home_dir })
}
