//! Environment preflight
//!
//! The repository pins the Vivado release its scripts were exported with;
//! replaying them under a different release produces subtly incompatible
//! projects. The check operates on injected values only — the caller
//! decides where the expected version and the PATH string come from.

use crate::error::{Error, Result};

/// Verify that the expected Vivado release is on the given PATH string.
///
/// Matches a `Vivado/<version>/bin` path fragment in either separator
/// style, the shape every Vivado settings script prepends.
pub fn verify_environment(expected_version: &str, path_var: &str) -> Result<()> {
    let needle = format!("Vivado/{expected_version}/bin");
    let normalized = path_var.replace('\\', "/");

    if normalized.contains(&needle) {
        tracing::debug!(version = expected_version, "Vivado environment verified");
        Ok(())
    } else {
        Err(Error::VersionMismatch {
            expected: expected_version.to_string(),
        })
    }
}
