//! Error types for the runner module.

// The unused_assignments lint misfires on miette/thiserror derive expansion
// in some compiler versions only, so `#[expect]` cannot be used.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use camino::Utf8PathBuf;
use miette::Diagnostic;
use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that stop a run before anything is rendered.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// No build files were given on the command line.
    #[error("no input files given")]
    #[diagnostic(
        code(antgraph::runner::missing_input),
        help("pass one or more Ant build files, e.g. `antgraph build.xml`")
    )]
    MissingInput,
}

/// Failure to render one output format. Other formats are unaffected.
#[derive(Debug, Error, Diagnostic)]
pub enum RenderError {
    /// The backend could not be started.
    #[error("failed to start {program} to render `{format}`")]
    #[diagnostic(
        code(antgraph::render::spawn),
        help("install Graphviz or set ANTGRAPH_DOT to the `dot` executable")
    )]
    Spawn {
        /// Program that was invoked.
        program: Utf8PathBuf,
        /// Requested format.
        format: String,
        /// Underlying spawn failure.
        #[source]
        source: io::Error,
    },

    /// The backend ran but reported failure.
    #[error("{program} exited with {status} while rendering `{format}`")]
    #[diagnostic(code(antgraph::render::exit))]
    Exit {
        /// Program that was invoked.
        program: Utf8PathBuf,
        /// Requested format.
        format: String,
        /// Exit status reported by the backend.
        status: ExitStatus,
    },
}
