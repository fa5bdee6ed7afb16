//! Interpretation of the in-guest process count used as a liveness signal.

use crate::domain::error::PodmanError;

/// Pattern identifying the podman API service in `ps -ef` output.
pub const SERVICE_PATTERN: &str = "podman system service";

/// Lines that match [`SERVICE_PATTERN`] without being the service: the
/// `bash -c` running the pipeline and the `grep` itself.
pub const SELF_MATCH_LINES: i64 = 2;

/// Shell pipeline whose output is the number of matching process lines.
#[must_use]
pub fn process_count_command() -> String {
    format!("ps -ef | grep '{SERVICE_PATTERN}' | wc -l")
}

/// Decide whether the service runs, given the pipeline's trimmed output.
///
/// Exactly [`SELF_MATCH_LINES`] means nothing but the search itself matched.
/// Any other count, including 0, 1 or negative values, reads as running.
///
/// This is fragile: it assumes the shell and grep always show up in the
/// process table exactly once each. A different shell, a `ps` that hides
/// its own pipeline, or a second concurrent probe shifts the count and
/// flips the answer.
///
/// # Errors
///
/// Returns [`PodmanError::Parse`] if the output is not an integer.
pub fn service_running_from_count(output: &str) -> Result<bool, PodmanError> {
    let count: i64 = output
        .trim()
        .parse()
        .map_err(|e| PodmanError::parse(format!("reading process count {output:?}"), e))?;
    Ok(count != SELF_MATCH_LINES)
}
