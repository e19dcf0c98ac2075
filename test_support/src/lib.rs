//! Test utilities for process management.
//!
//! This crate provides fake `dot` executables for the integration tests and a
//! check for the real Graphviz installation.

pub mod dot;
pub mod fake_dot;

pub use dot_env::DOT_ENV;
pub use fake_dot::{FakeDot, fake_dot_recording};

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a fake `dot` executable that exits with `exit_code`.
///
/// Returns the temporary directory and the path to the executable.
pub fn fake_dot(exit_code: i32) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("dot");
    let mut file = File::create(&path).expect("script");
    writeln!(file, "#!/bin/sh\nexit {exit_code}").expect("write script");
    drop(file);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&path).expect("meta").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("perms");
    }
    (dir, path)
}
