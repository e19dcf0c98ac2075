//! Rendering adapter between the DOT text and the layout backend.
//!
//! The backend is invoked once per requested format. Each invocation is
//! independent: a failing format is reported and the remaining formats are
//! still attempted.

use super::{DotContent, RenderError, process};
use anyhow::Result as AnyResult;
use camino::{Utf8Path, Utf8PathBuf};
use std::path::Path;
use tracing::{error, info};

/// Something able to turn a DOT file into one output format.
pub trait Renderer {
    /// Render `dot_file` as `format` into `output`.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when this format could not be produced.
    fn render(&self, dot_file: &Path, format: &str, output: &Utf8Path) -> Result<(), RenderError>;
}

/// Renderer that shells out to Graphviz `dot`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotRenderer {
    program: Utf8PathBuf,
}

impl DotRenderer {
    /// Use `program` as the backend executable.
    #[must_use]
    pub fn new(program: impl Into<Utf8PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use the executable named by the environment override, or `dot`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(process::resolve_dot_program())
    }

    /// The executable this renderer invokes.
    #[must_use]
    pub fn program(&self) -> &Utf8Path {
        &self.program
    }
}

impl Renderer for DotRenderer {
    fn render(&self, dot_file: &Path, format: &str, output: &Utf8Path) -> Result<(), RenderError> {
        process::run_dot(&self.program, dot_file, format, output)
    }
}

/// Result of rendering a single format.
#[derive(Debug)]
pub struct RenderOutcome {
    /// Requested format.
    pub format: String,
    /// File the backend was asked to write.
    pub output: Utf8PathBuf,
    /// Whether the backend succeeded.
    pub result: Result<(), RenderError>,
}

impl RenderOutcome {
    /// Return `true` when the output was produced.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Output file for `format`: the base name with the format appended as the
/// extension.
///
/// # Examples
/// ```
/// use antgraph::runner::output_path;
/// use camino::Utf8Path;
///
/// assert_eq!(output_path(Utf8Path::new("out/deps"), "svg"), "out/deps.svg");
/// ```
#[must_use]
pub fn output_path(base: &Utf8Path, format: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{base}.{format}"))
}

/// Render `dot` once per entry of `formats`.
///
/// The DOT text is written to a single temporary file shared by every
/// invocation and removed afterwards.
///
/// # Errors
///
/// Returns an error only if the temporary file cannot be written. Backend
/// failures are reported per format in the returned outcomes.
pub fn render_all(
    renderer: &dyn Renderer,
    dot: &DotContent,
    base: &Utf8Path,
    formats: &[String],
) -> AnyResult<Vec<RenderOutcome>> {
    let tmp = process::create_temp_dot_file(dot)?;
    let outcomes = formats
        .iter()
        .map(|format| {
            let output = output_path(base, format);
            let result = renderer.render(tmp.path(), format, &output);
            match &result {
                Ok(()) => info!(format = %format, output = %output, "rendered"),
                Err(err) => error!(format = %format, error = %err, "render failed"),
            }
            RenderOutcome {
                format: format.clone(),
                output,
                result,
            }
        })
        .collect();
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::RefCell;
    use std::fs;
    use std::process::Command;

    #[derive(Default)]
    struct Recording {
        calls: RefCell<Vec<(String, Utf8PathBuf, String)>>,
        fail: Option<&'static str>,
    }

    impl Renderer for Recording {
        fn render(
            &self,
            dot_file: &Path,
            format: &str,
            output: &Utf8Path,
        ) -> Result<(), RenderError> {
            let text = fs::read_to_string(dot_file).unwrap_or_default();
            self.calls
                .borrow_mut()
                .push((format.to_owned(), output.to_owned(), text));
            if self.fail == Some(format) {
                let status = Command::new("false").status().map_err(|source| {
                    RenderError::Spawn {
                        program: "false".into(),
                        format: format.to_owned(),
                        source,
                    }
                })?;
                return Err(RenderError::Exit {
                    program: "false".into(),
                    format: format.to_owned(),
                    status,
                });
            }
            Ok(())
        }
    }

    #[rstest]
    #[case("antgraph", "pdf", "antgraph.pdf")]
    #[case("out/graph", "svg", "out/graph.svg")]
    #[case("graph.v1", "png", "graph.v1.png")]
    fn output_path_appends_format(
        #[case] base: &str,
        #[case] format: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(output_path(Utf8Path::new(base), format), expected);
    }

    #[rstest]
    fn renders_each_format_once_in_order() {
        let renderer = Recording::default();
        let dot = DotContent::new("digraph antgraph {}\n".into());
        let formats = vec!["pdf".to_owned(), "png".to_owned()];

        let outcomes =
            render_all(&renderer, &dot, Utf8Path::new("graph"), &formats).expect("render");

        let calls = renderer.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "pdf");
        assert_eq!(calls[0].1, "graph.pdf");
        assert_eq!(calls[1].0, "png");
        assert!(calls.iter().all(|(_, _, text)| text == dot.as_str()));
        assert!(outcomes.iter().all(RenderOutcome::is_success));
    }

    #[cfg(unix)]
    #[rstest]
    fn failing_format_does_not_stop_the_others() {
        let renderer = Recording {
            fail: Some("bogus"),
            ..Recording::default()
        };
        let dot = DotContent::new("digraph antgraph {}\n".into());
        let formats = vec!["bogus".to_owned(), "svg".to_owned()];

        let outcomes =
            render_all(&renderer, &dot, Utf8Path::new("graph"), &formats).expect("render");

        assert_eq!(renderer.calls.borrow().len(), 2);
        assert!(!outcomes[0].is_success());
        assert!(outcomes[1].is_success());
        assert_eq!(outcomes[1].output, "graph.svg");
    }

    #[rstest]
    fn no_formats_means_no_invocations() {
        let renderer = Recording::default();
        let dot = DotContent::new(String::new());
        let outcomes = render_all(&renderer, &dot, Utf8Path::new("graph"), &[]).expect("render");
        assert!(outcomes.is_empty());
        assert!(renderer.calls.borrow().is_empty());
    }

    #[rstest]
    fn dot_renderer_reports_its_program() {
        let renderer = DotRenderer::new("/opt/graphviz/bin/dot");
        assert_eq!(renderer.program(), "/opt/graphviz/bin/dot");
    }
}
