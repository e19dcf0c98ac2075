//! Translates build file parse failures into actionable diagnostics.
//!
//! [`SourceFile`] pairs the raw XML text with the file identity so every
//! [`ProjectError`] variant can carry a [`NamedSource`] and a span pointing at
//! the offending element.
//
// Module-level suppression for version-dependent lint false positives from
// miette/thiserror derive macros. The unused_assignments lint fires in some
// Rust versions but not others. Since `#[expect]` fails when the lint doesn't
// fire, we must use `#[allow]` here. FIXME: remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use camino::{Utf8Path, Utf8PathBuf};
use miette::{Diagnostic, NamedSource, SourceSpan};
use roxmltree::{Node, TextPos};
use thiserror::Error;

/// Errors raised while turning a build file into a [`crate::ast::Project`].
#[derive(Debug, Error, Diagnostic)]
pub enum ProjectError {
    /// The file could not be read from disk.
    #[error("failed to read build file {path}")]
    #[diagnostic(code(antgraph::project::read))]
    Read {
        /// Path that was attempted.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not well-formed XML.
    #[error("{file} is not well-formed XML")]
    #[diagnostic(code(antgraph::project::xml))]
    Xml {
        /// File identity.
        file: Utf8PathBuf,
        /// Source text for the report.
        #[source_code]
        src: NamedSource<String>,
        /// Position reported by the XML parser.
        #[label("parse error here")]
        span: SourceSpan,
        /// Parser error.
        #[source]
        source: roxmltree::Error,
    },

    /// The document root is something other than `<project>`.
    #[error("{file}: expected a <project> root element, found <{found}>")]
    #[diagnostic(
        code(antgraph::project::root),
        help("Ant build files start with <project name=\"...\">")
    )]
    UnexpectedRoot {
        /// File identity.
        file: Utf8PathBuf,
        /// Tag name of the root that was found.
        found: String,
        /// Source text for the report.
        #[source_code]
        src: NamedSource<String>,
        /// Span of the root start tag.
        #[label("root element")]
        span: SourceSpan,
    },

    /// A required identity attribute is absent or empty.
    #[error("{file}: <{element}> is missing the required `{attribute}` attribute")]
    #[diagnostic(code(antgraph::project::missing_attribute))]
    MissingAttribute {
        /// File identity.
        file: Utf8PathBuf,
        /// Element lacking the attribute.
        element: &'static str,
        /// Name of the attribute.
        attribute: &'static str,
        /// Source text for the report.
        #[source_code]
        src: NamedSource<String>,
        /// Span of the element start tag.
        #[label("declared here")]
        span: SourceSpan,
    },

    /// Two targets in one file share a name.
    #[error("{file}: target `{name}` is declared more than once")]
    #[diagnostic(
        code(antgraph::project::duplicate_target),
        help("target names must be unique within a build file")
    )]
    DuplicateTarget {
        /// File identity.
        file: Utf8PathBuf,
        /// Repeated target name.
        name: String,
        /// Source text for the report.
        #[source_code]
        src: NamedSource<String>,
        /// Span of the first declaration.
        #[label("first declared here")]
        first: SourceSpan,
        /// Span of the repeated declaration.
        #[label("declared again here")]
        again: SourceSpan,
    },
}

impl ProjectError {
    /// File the error relates to.
    #[must_use]
    pub fn file(&self) -> &Utf8Path {
        match self {
            Self::Read { path, .. } => path,
            Self::Xml { file, .. }
            | Self::UnexpectedRoot { file, .. }
            | Self::MissingAttribute { file, .. }
            | Self::DuplicateTarget { file, .. } => file,
        }
    }
}

/// Build file text paired with its identity.
#[derive(Debug, Clone, Copy)]
pub(super) struct SourceFile<'a> {
    pub(super) file: &'a Utf8Path,
    pub(super) text: &'a str,
}

impl<'a> SourceFile<'a> {
    pub(super) const fn new(file: &'a Utf8Path, text: &'a str) -> Self {
        Self { file, text }
    }

    pub(super) fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.file.as_str(), self.text.to_owned())
    }

    pub(super) fn xml_error(&self, err: roxmltree::Error) -> ProjectError {
        let at = text_pos_to_index(self.text, err.pos());
        ProjectError::Xml {
            file: self.file.to_owned(),
            src: self.named_source(),
            span: point_span(self.text, at),
            source: err,
        }
    }

    pub(super) fn unexpected_root(&self, root: Node<'_, '_>) -> ProjectError {
        ProjectError::UnexpectedRoot {
            file: self.file.to_owned(),
            found: root.tag_name().name().to_owned(),
            src: self.named_source(),
            span: start_tag_span(self.text, root),
        }
    }

    pub(super) fn missing_attribute(
        &self,
        node: Node<'_, '_>,
        element: &'static str,
        attribute: &'static str,
    ) -> ProjectError {
        ProjectError::MissingAttribute {
            file: self.file.to_owned(),
            element,
            attribute,
            src: self.named_source(),
            span: start_tag_span(self.text, node),
        }
    }

    pub(super) fn duplicate_target(
        &self,
        name: &str,
        first: Node<'_, '_>,
        again: Node<'_, '_>,
    ) -> ProjectError {
        ProjectError::DuplicateTarget {
            file: self.file.to_owned(),
            name: name.to_owned(),
            src: self.named_source(),
            first: start_tag_span(self.text, first),
            again: start_tag_span(self.text, again),
        }
    }
}

/// Reconstruct the byte offset for a 1-based row/column position.
///
/// The column counts characters, so the offset is derived by walking the line.
/// Offsets past the end of a line clamp to its end; rows past the end of the
/// text clamp to its length. Handles both `\n` and `\r\n` line endings.
fn text_pos_to_index(src: &str, pos: TextPos) -> usize {
    let target_line = usize::try_from(pos.row.saturating_sub(1)).unwrap_or(usize::MAX);
    let target_column = usize::try_from(pos.col.saturating_sub(1)).unwrap_or(usize::MAX);
    let mut offset = 0usize;
    for (idx, segment) in src.split_inclusive('\n').enumerate() {
        if idx == target_line {
            let without_newline = segment.strip_suffix('\n').unwrap_or(segment);
            let cleaned = without_newline.strip_suffix('\r').unwrap_or(without_newline);
            let column_offset = cleaned
                .char_indices()
                .nth(target_column)
                .map_or(cleaned.len(), |(byte_idx, _)| byte_idx);
            return offset + column_offset;
        }
        offset += segment.len();
    }
    src.len()
}

/// One-character span at `at`, or an empty span at the end of input.
fn point_span(src: &str, at: usize) -> SourceSpan {
    let len = src
        .get(at..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8);
    SourceSpan::new(at.into(), len)
}

/// Span covering an element's start tag, from `<` to the closing `>`.
fn start_tag_span(src: &str, node: Node<'_, '_>) -> SourceSpan {
    let range = node.range();
    let len = src
        .get(range.start..range.end)
        .and_then(|tag| tag.find('>'))
        .map_or(range.end - range.start, |idx| idx + 1);
    SourceSpan::new(range.start.into(), len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc", 1, 1, 0)]
    #[case("abc\ndef", 2, 2, 5)]
    #[case("abc\r\ndef", 2, 1, 5)]
    #[case("abc\ndef", 1, 99, 3)]
    #[case("abc", 9, 1, 3)]
    #[case("é\nx", 1, 2, 2)]
    fn text_pos_maps_to_byte_offset(
        #[case] src: &str,
        #[case] row: u32,
        #[case] col: u32,
        #[case] expected: usize,
    ) {
        assert_eq!(text_pos_to_index(src, TextPos::new(row, col)), expected);
    }

    #[rstest]
    fn point_span_is_empty_at_end_of_input() {
        let span = point_span("ab", 2);
        assert_eq!(span.offset(), 2);
        assert_eq!(span.len(), 0);
    }

    #[rstest]
    fn start_tag_span_stops_at_first_close() {
        let src = r#"<project name="p"><target name="t"/></project>"#;
        let doc = roxmltree::Document::parse(src).expect("parse");
        let span = start_tag_span(src, doc.root_element());
        assert_eq!(span.offset(), 0);
        assert_eq!(span.len(), r#"<project name="p">"#.len());
    }
}
