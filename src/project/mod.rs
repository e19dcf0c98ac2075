//! Build file loading helpers.
//!
//! This module parses an Ant build file into a [`Project`]. The parse is
//! purely structural: `<project>` supplies the identity and default target,
//! each direct `<target>` child becomes a [`Target`], and every `antcall`,
//! `runtarget` or `ant` element found beneath a target becomes a [`Task`].
//! Elements the parser does not recognise are skipped without error, and no
//! reference is checked against the declared targets.

use crate::ast::{Project, Target, Task, TaskKind};
use camino::{Utf8Path, Utf8PathBuf};
use roxmltree::{Document, Node, ParsingOptions};
use std::collections::HashMap;
use std::fs;
use tracing::debug;

mod diagnostics;

pub use diagnostics::ProjectError;
use diagnostics::SourceFile;

const PROJECT: &str = "project";
const TARGET: &str = "target";
const NAME: &str = "name";
const DEFAULT: &str = "default";
const DEPENDS: &str = "depends";

/// Parse build file text, recording `file` as the project's identity.
///
/// # Errors
///
/// Returns [`ProjectError`] when the text is not well-formed XML, the root is
/// not `<project>`, a project or target lacks its `name`, or two targets share
/// a name.
///
/// # Examples
///
/// ```rust
/// use antgraph::project;
/// use camino::Utf8Path;
///
/// let xml = r#"<project name="demo" default="build">
///   <target name="clean"/>
///   <target name="build" depends="clean"/>
/// </project>"#;
/// let parsed = project::from_str(xml, Utf8Path::new("build.xml")).expect("parse");
/// assert_eq!(parsed.targets.len(), 2);
/// assert_eq!(parsed.targets[1].depends, vec!["clean"]);
/// ```
pub fn from_str(text: &str, file: &Utf8Path) -> Result<Project, ProjectError> {
    let source = SourceFile::new(file, text);
    let mut options = ParsingOptions::default();
    // Ant files routinely declare entity DTDs for shared fragments.
    options.allow_dtd = true;
    let doc = Document::parse_with_options(text, options).map_err(|e| source.xml_error(e))?;
    let project = parse_project(&source, &doc)?;
    debug!(
        file = %project.file,
        project = %project.name,
        targets = project.targets.len(),
        "parsed build file"
    );
    Ok(project)
}

/// Load a [`Project`] from the given file path.
///
/// The path is used verbatim as the project's file identity.
///
/// # Errors
///
/// Returns [`ProjectError::Read`] if the file cannot be read, or any error
/// reported by [`from_str`].
pub fn from_path(path: &Utf8Path) -> Result<Project, ProjectError> {
    let text = fs::read_to_string(path).map_err(|source| ProjectError::Read {
        path: path.to_owned(),
        source,
    })?;
    from_str(&text, path)
}

fn parse_project(source: &SourceFile<'_>, doc: &Document<'_>) -> Result<Project, ProjectError> {
    let root = doc.root_element();
    if root.tag_name().name() != PROJECT {
        return Err(source.unexpected_root(root));
    }
    let name = required_attribute(source, root, PROJECT, NAME)?;
    let default_target = root
        .attribute(DEFAULT)
        .filter(|d| !d.is_empty())
        .map(str::to_owned);

    let mut targets = Vec::new();
    let mut declared: HashMap<String, Node<'_, '_>> = HashMap::new();
    for node in root.children().filter(|n| is_element_named(*n, TARGET)) {
        let target = parse_target(source, node)?;
        if let Some(first) = declared.get(&target.name) {
            return Err(source.duplicate_target(&target.name, *first, node));
        }
        declared.insert(target.name.clone(), node);
        targets.push(target);
    }

    Ok(Project {
        file: source.file.to_owned(),
        name,
        default_target,
        targets,
    })
}

fn parse_target(source: &SourceFile<'_>, node: Node<'_, '_>) -> Result<Target, ProjectError> {
    let name = required_attribute(source, node, TARGET, NAME)?;
    let depends = node.attribute(DEPENDS).map(split_depends).unwrap_or_default();
    let tasks = node.descendants().filter_map(parse_task).collect();
    Ok(Target {
        name,
        depends,
        tasks,
    })
}

fn parse_task(node: Node<'_, '_>) -> Option<Task> {
    if !node.is_element() {
        return None;
    }
    let kind = TaskKind::from_element(node.tag_name().name())?;
    let file = kind
        .file_attribute()
        .and_then(|attr| node.attribute(attr))
        .map(Utf8PathBuf::from);
    Some(Task {
        kind,
        target: node.attribute(TARGET).map(str::to_owned),
        file,
    })
}

/// Split a `depends` attribute on commas and whitespace, keeping order and
/// duplicates.
fn split_depends(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

fn required_attribute(
    source: &SourceFile<'_>,
    node: Node<'_, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<String, ProjectError> {
    node.attribute(attribute)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| source.missing_attribute(node, element, attribute))
}

fn is_element_named(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}
