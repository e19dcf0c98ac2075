//! Process helpers for DOT file lifecycle and backend invocation.
//! Internal to `runner`; public API is defined in `runner/mod.rs`.

use super::RenderError;
use camino::{Utf8Path, Utf8PathBuf};
use dot_env::{DOT_ENV, DOT_PROGRAM};
use itertools::Itertools;
use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
    process::Command,
};
use tracing::{info, warn};

mod file_io;

pub use file_io::*;

fn resolve_dot_program_with<F>(mut read_env: F) -> Utf8PathBuf
where
    F: FnMut(&str) -> Option<OsString>,
{
    read_env(DOT_ENV)
        .and_then(|value| {
            let path = PathBuf::from(value);
            Utf8PathBuf::from_path_buf(path).ok()
        })
        .filter(|path| !path.as_str().is_empty())
        .unwrap_or_else(|| Utf8PathBuf::from(DOT_PROGRAM))
}

/// Resolve the backend executable, honouring the [`DOT_ENV`] override.
///
/// Overrides that are empty or not valid UTF-8 are ignored.
#[must_use]
pub fn resolve_dot_program() -> Utf8PathBuf {
    resolve_dot_program_with(|key| env::var_os(key))
}

/// Configure `dot -T<format> -o <output> <dot_file>`.
fn configure_dot_command(cmd: &mut Command, dot_file: &Path, format: &str, output: &Utf8Path) {
    cmd.arg(format!("-T{format}"))
        .arg("-o")
        .arg(output.as_std_path())
        .arg(dot_file);
}

fn log_command_execution(cmd: &Command) {
    let program = cmd.get_program().to_string_lossy();
    let args = cmd.get_args().map(|a| a.to_string_lossy()).join(" ");
    info!("Running command: {program} {args}");
}

/// Forward backend diagnostics to the log, one line per event.
fn log_backend_stderr(stderr: &[u8], format: &str) {
    for line in String::from_utf8_lossy(stderr)
        .lines()
        .filter(|l| !l.trim().is_empty())
    {
        warn!(format, "dot: {line}");
    }
}

/// Invoke the backend once to render `dot_file` into `output`.
///
/// The call blocks until the backend exits. Anything the backend writes to
/// standard error is forwarded to the log.
///
/// # Errors
///
/// Returns [`RenderError::Spawn`] if the program cannot be started and
/// [`RenderError::Exit`] when it reports a non-zero exit status.
pub fn run_dot(
    program: &Utf8Path,
    dot_file: &Path,
    format: &str,
    output: &Utf8Path,
) -> Result<(), RenderError> {
    let mut cmd = Command::new(program.as_std_path());
    configure_dot_command(&mut cmd, dot_file, format, output);
    log_command_execution(&cmd);
    let result = cmd.output().map_err(|source| RenderError::Spawn {
        program: program.to_owned(),
        format: format.to_owned(),
        source,
    })?;
    log_backend_stderr(&result.stderr, format);
    if result.status.success() {
        Ok(())
    } else {
        Err(RenderError::Exit {
            program: program.to_owned(),
            format: format.to_owned(),
            status: result.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use std::ffi::OsString;

    #[rstest]
    fn resolve_dot_program_prefers_env_override() {
        let resolved = resolve_dot_program_with(|_| Some(OsString::from("/opt/graphviz/dot")));
        assert_eq!(resolved, Utf8PathBuf::from("/opt/graphviz/dot"));
    }

    #[rstest]
    fn resolve_dot_program_defaults_without_override() {
        let resolved = resolve_dot_program_with(|_| None);
        assert_eq!(resolved, Utf8PathBuf::from(DOT_PROGRAM));
    }

    #[rstest]
    fn resolve_dot_program_ignores_empty_override() {
        let resolved = resolve_dot_program_with(|_| Some(OsString::new()));
        assert_eq!(resolved, Utf8PathBuf::from(DOT_PROGRAM));
    }

    #[cfg(unix)]
    #[rstest]
    fn resolve_dot_program_ignores_invalid_utf8_override() {
        use std::os::unix::ffi::OsStringExt;

        let resolved =
            resolve_dot_program_with(|_| Some(OsString::from_vec(vec![0xff, b'd', b'o', b't'])));
        assert_eq!(resolved, Utf8PathBuf::from(DOT_PROGRAM));
    }

    #[rstest]
    fn command_line_matches_graphviz_conventions() {
        let mut cmd = Command::new("dot");
        configure_dot_command(
            &mut cmd,
            Path::new("/tmp/graph.dot"),
            "svg",
            Utf8Path::new("out.svg"),
        );
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, ["-Tsvg", "-o", "out.svg", "/tmp/graph.dot"]);
    }

    #[rstest]
    fn run_dot_reports_missing_program() {
        let err = run_dot(
            Utf8Path::new("does-not-exist-antgraph-dot"),
            Path::new("graph.dot"),
            "png",
            Utf8Path::new("out.png"),
        )
        .expect_err("spawn should fail");
        match err {
            RenderError::Spawn { format, source, .. } => {
                assert_eq!(format, "png");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected spawn failure, got {other:?}"),
        }
    }
}
