//! CLI execution logic.
//!
//! This module keeps `main` minimal by providing a single entry point that
//! reads the build files, assembles the graph, and hands the DOT text to the
//! rendering backend once per requested format.

mod error;
mod process;
mod render;

pub use error::{RenderError, RunnerError};
pub use process::{resolve_dot_program, run_dot};
pub use render::{DotRenderer, RenderOutcome, Renderer, output_path, render_all};

/// Default `dot` executable to invoke.
pub use dot_env::DOT_PROGRAM;
/// Environment variable override for the `dot` executable.
pub use dot_env::DOT_ENV;

use crate::ast::Project;
use crate::cli::Cli;
use crate::project::{self, ProjectError};
use crate::{dot_gen, ir::BuildGraph};
use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use tracing::{debug, info, warn};

/// Wrapper around generated DOT text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotContent(String);
impl DotContent {
    /// Store the provided DOT text.
    #[must_use]
    pub const fn new(content: String) -> Self {
        Self(content)
    }
    /// Borrow the underlying DOT text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
    /// Consume the wrapper returning the owned DOT text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Execute the parsed [`Cli`] using Graphviz `dot` as the backend.
///
/// # Errors
///
/// Returns an error if no input files were given, a build file cannot be
/// parsed, or the DOT text cannot be written. Per-format backend failures are
/// reported in the returned outcomes instead.
pub fn run(cli: &Cli) -> Result<Vec<RenderOutcome>> {
    run_with_renderer(cli, &DotRenderer::from_env())
}

/// Execute the parsed [`Cli`] against an arbitrary [`Renderer`].
///
/// # Errors
///
/// See [`run`].
pub fn run_with_renderer(cli: &Cli, renderer: &dyn Renderer) -> Result<Vec<RenderOutcome>> {
    let graph = build_graph(cli)?;
    let dot = generate_dot(cli, &graph);

    if let Some(path) = &cli.emit_dot {
        process::emit_dot(path, &dot).with_context(|| format!("emitting DOT to {path}"))?;
    }

    let formats = cli.requested_formats();
    info!(formats = ?formats, out = %cli.out, "rendering");
    render_all(renderer, &dot, &cli.out, &formats)
}

/// Parse every input file named by `cli` and assemble the graph.
///
/// # Errors
///
/// Returns [`RunnerError::MissingInput`] when `cli` names no files and a
/// [`ProjectError`] for the first file that fails to parse, unless
/// `--keep-going` was given.
///
/// # Examples
/// ```
/// use antgraph::cli::Cli;
/// use antgraph::runner::{RunnerError, build_graph};
///
/// let err = build_graph(&Cli::default()).expect_err("no inputs");
/// assert!(err.downcast_ref::<RunnerError>().is_some());
/// ```
pub fn build_graph(cli: &Cli) -> Result<BuildGraph> {
    if cli.files.is_empty() {
        return Err(RunnerError::MissingInput.into());
    }
    let projects = load_projects(&cli.files, cli.keep_going)?;
    if tracing::enabled!(tracing::Level::DEBUG) {
        let json = serde_json::to_string_pretty(&projects).context("serialise projects")?;
        debug!("Projects:\n{json}");
    }
    let graph = BuildGraph::from_projects(&projects, cli.graph_options());
    info!(
        subgraphs = graph.subgraphs.len(),
        nodes = graph.nodes().count(),
        edges = graph.edges().count(),
        "assembled graph"
    );
    Ok(graph)
}

/// Render `graph` as DOT text using the layout hints from `cli`.
#[must_use]
pub fn generate_dot(cli: &Cli, graph: &BuildGraph) -> DotContent {
    DotContent::new(dot_gen::generate(graph, &cli.layout_hints()))
}

fn load_projects(files: &[Utf8PathBuf], keep_going: bool) -> Result<Vec<Project>, ProjectError> {
    let mut projects = Vec::with_capacity(files.len());
    for file in files {
        info!("Reading {file}");
        match project::from_path(file) {
            Ok(parsed) => projects.push(parsed),
            Err(err) if keep_going => {
                warn!("skipping {}: {}", err.file(), err);
            }
            Err(err) => return Err(err),
        }
    }
    if projects.is_empty() {
        warn!("no build file could be read; the rendered graph will be empty");
    }
    Ok(projects)
}
