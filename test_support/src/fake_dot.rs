//! Fake `dot` executable that records its invocations.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Format name the recording fake refuses to render.
pub const FAILING_FORMAT: &str = "fail";

/// A recording fake `dot` living in its own temporary directory.
#[derive(Debug)]
pub struct FakeDot {
    _dir: TempDir,
    program: PathBuf,
    log: PathBuf,
}

impl FakeDot {
    /// Path to the executable, suitable for the `ANTGRAPH_DOT` override.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Argument lines recorded so far, one per invocation.
    pub fn calls(&self) -> Result<Vec<String>> {
        if !self.log.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.log)
            .with_context(|| format!("read invocation log {}", self.log.display()))?;
        Ok(text.lines().map(str::to_owned).collect())
    }
}

/// Make a script file executable on Unix platforms.
#[cfg(unix)]
fn make_script_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)
        .with_context(|| format!("read metadata {}", path.display()))?
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
        .with_context(|| format!("set permissions {}", path.display()))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_script_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Create a fake `dot` that appends its arguments to a log, then creates the
/// file named by `-o`.
///
/// The script exits with status `1` and writes nothing when asked for the
/// [`FAILING_FORMAT`] format.
pub fn fake_dot_recording() -> Result<FakeDot> {
    let dir = TempDir::new().context("create temp dir")?;
    let program = dir.path().join("dot");
    let log = dir.path().join("calls.log");
    let mut file = File::create(&program)
        .with_context(|| format!("create script {}", program.display()))?;
    writeln!(file, "#!/bin/sh")?;
    writeln!(file, "echo \"$@\" >> '{}'", log.display())?;
    writeln!(file, "fmt=\"\"")?;
    writeln!(file, "out=\"\"")?;
    writeln!(file, "while [ $# -gt 0 ]; do")?;
    writeln!(file, "  case \"$1\" in")?;
    writeln!(file, "    -T*) fmt=\"${{1#-T}}\" ;;")?;
    writeln!(file, "    -o) shift; out=\"$1\" ;;")?;
    writeln!(file, "  esac")?;
    writeln!(file, "  shift")?;
    writeln!(file, "done")?;
    writeln!(file, "if [ \"$fmt\" = \"{FAILING_FORMAT}\" ]; then")?;
    writeln!(file, "  echo \"Format: \\\"$fmt\\\" not recognized.\" >&2")?;
    writeln!(file, "  exit 1")?;
    writeln!(file, "fi")?;
    writeln!(file, ": > \"$out\"")?;
    drop(file);
    make_script_executable(&program)?;
    Ok(FakeDot {
        _dir: dir,
        program,
        log,
    })
}
