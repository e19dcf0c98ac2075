//! DOT text sinks: the temporary file handed to the backend and the
//! `--emit-dot` destination.

use crate::runner::DotContent;
use anyhow::{Context, Result as AnyResult, anyhow};
use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use std::io::{self, Write};
use tempfile::{Builder, NamedTempFile};
use tracing::info;

/// `--emit-dot` value selecting standard output.
const STDOUT: &str = "-";

fn is_stdout_path(path: &Utf8Path) -> bool {
    path.as_str() == STDOUT
}

/// Write `content` to a fresh `antgraph.*.dot` file in the system temporary
/// directory. The file is removed when the handle is dropped.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn create_temp_dot_file(content: &DotContent) -> AnyResult<NamedTempFile> {
    let mut tmp = Builder::new()
        .prefix("antgraph.")
        .suffix(".dot")
        .tempfile()
        .context("create temporary DOT file")?;
    tmp.write_all(content.as_str().as_bytes())
        .and_then(|()| tmp.flush())
        .context("write temporary DOT file")?;
    info!("Wrote temporary DOT file to {}", tmp.path().display());
    Ok(tmp)
}

/// Write `content` to `path`, or to standard output when `path` is `-`.
///
/// Missing parent directories are created. A reader closing standard output
/// early is not an error.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written.
pub fn emit_dot(path: &Utf8Path, content: &DotContent) -> AnyResult<()> {
    if is_stdout_path(path) {
        let mut stdout = io::stdout().lock();
        return write_tolerating_closed_pipe(&mut stdout, content).context("write DOT to stdout");
    }

    let name = path
        .file_name()
        .ok_or_else(|| anyhow!("{path} does not name a file"))?;
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    Dir::create_ambient_dir_all(parent, ambient_authority())
        .with_context(|| format!("create directory {parent}"))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .with_context(|| format!("open directory {parent}"))?;
    dir.write(name, content.as_str())
        .with_context(|| format!("write DOT file {path}"))?;
    info!("Wrote DOT file to {path}");
    Ok(())
}

fn write_tolerating_closed_pipe(out: &mut impl Write, content: &DotContent) -> io::Result<()> {
    match out
        .write_all(content.as_str().as_bytes())
        .and_then(|()| out.flush())
    {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
