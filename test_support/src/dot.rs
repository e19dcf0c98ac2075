//! Helpers for working with the system `dot` binary in integration tests.

use std::process::{Command, ExitStatus};
use tempfile::{TempDir, tempdir};
use thiserror::Error;

/// Errors that can occur when preparing Graphviz-backed integration tests.
#[derive(Error, Debug)]
pub enum DotWorkspaceError {
    /// `dot -V` could not be spawned, most likely because Graphviz is
    /// not present in `PATH`.
    #[error("failed to spawn `dot -V`: {0}")]
    VersionSpawn(#[source] std::io::Error),
    /// `dot -V` executed but returned a non-success status.
    #[error("`dot -V` returned non-success status: {0}")]
    VersionFailed(ExitStatus),
    /// Creating the temporary workspace failed.
    #[error("failed to create temporary dot workspace: {0}")]
    Workspace(#[source] std::io::Error),
}

fn check_dot() -> Result<(), DotWorkspaceError> {
    let output = Command::new(dot_env::DOT_PROGRAM)
        .arg("-V")
        .output()
        .map_err(DotWorkspaceError::VersionSpawn)?;

    if !output.status.success() {
        return Err(DotWorkspaceError::VersionFailed(output.status));
    }
    Ok(())
}

/// Ensure Graphviz is available and return a temporary directory for
/// integration tests. Callers should skip their scenario when this returns
/// `Err`.
pub fn dot_integration_workspace() -> Result<TempDir, DotWorkspaceError> {
    check_dot()?;
    tempdir().map_err(DotWorkspaceError::Workspace)
}
