//! Graphviz DOT generator.
//!
//! This module converts a [`crate::ir::BuildGraph`] into the textual
//! representation consumed by Graphviz. Subgraphs, nodes and edges are written
//! in the order the graph holds them, so identical input always yields
//! identical text.
//!
//! Each project becomes a `cluster_<index>` subgraph holding its nodes and
//! dependency edges. Call edges may cross files, so they are written after
//! every cluster has declared its nodes; otherwise Graphviz would place a
//! callee into the caller's cluster on first mention.
//!
//! Vertices are named by position (`n<cluster>_<index>`, `legend_<index>`),
//! never by file and target name, so distinct identities cannot merge.
//! Edge endpoints that no project declares get a `u<index>` vertex of their
//! own. It is declared inside the cluster of its file when that file was
//! read, and at the top level otherwise.

use crate::ir::{BuildGraph, Edge, EdgeKind, Node, NodeId, Subgraph};
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

/// Name of the emitted `digraph`.
const GRAPH_NAME: &str = "antgraph";
const LEGEND_CLUSTER: &str = "cluster_legend";

/// Layout hints passed through to the rendering backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutHints {
    /// Graphviz `rankdir`, e.g. `LR` or `TB`.
    pub rankdir: String,
    /// Graphviz `splines`, e.g. `ortho` or `curved`.
    pub splines: String,
}

impl Default for LayoutHints {
    fn default() -> Self {
        Self {
            rankdir: "LR".to_owned(),
            splines: "ortho".to_owned(),
        }
    }
}

/// Generate a DOT document as a string.
#[must_use]
pub fn generate(graph: &BuildGraph, hints: &LayoutHints) -> String {
    DisplayGraph {
        graph,
        hints,
        vertices: Vertices::assign(graph),
    }
    .to_string()
}

/// Quote and escape a DOT identifier or attribute value.
fn quote(raw: &str) -> String {
    format!("\"{}\"", escape(raw))
}

fn escape(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Cluster caption: the project name over its file, or the bare title for
/// subgraphs without a file.
fn cluster_label(subgraph: &Subgraph) -> String {
    if subgraph.file.as_str().is_empty() {
        quote(&subgraph.title)
    } else {
        format!(
            "\"{}\\n{}\"",
            escape(&subgraph.title),
            escape(subgraph.file.as_str())
        )
    }
}

/// An endpoint no subgraph declares.
struct Undeclared<'a> {
    id: &'a NodeId,
    vertex: String,
    /// Index of the first subgraph read from the endpoint's file.
    home: Option<usize>,
}

/// DOT vertex names for every node identity in a graph.
struct Vertices<'a> {
    names: HashMap<&'a NodeId, String>,
    undeclared: Vec<Undeclared<'a>>,
}

impl<'a> Vertices<'a> {
    fn assign(graph: &'a BuildGraph) -> Self {
        let mut names = HashMap::new();
        for (index, subgraph) in graph.subgraphs.iter().enumerate() {
            for (position, node) in subgraph.nodes.iter().enumerate() {
                names
                    .entry(&node.id)
                    .or_insert_with(|| project_vertex(index, position));
            }
        }
        if let Some(legend) = &graph.legend {
            for (position, node) in legend.nodes.iter().enumerate() {
                names
                    .entry(&node.id)
                    .or_insert_with(|| legend_vertex(position));
            }
        }

        let mut undeclared: Vec<Undeclared<'a>> = Vec::new();
        for edge in graph.edges() {
            for id in [&edge.from, &edge.to] {
                names.entry(id).or_insert_with(|| {
                    let vertex = format!("u{}", undeclared.len());
                    let home = graph.subgraphs.iter().position(|s| s.file == id.file);
                    undeclared.push(Undeclared {
                        id,
                        vertex: vertex.clone(),
                        home,
                    });
                    vertex
                });
            }
        }
        Self { names, undeclared }
    }

    fn name(&self, id: &NodeId) -> &str {
        self.names.get(id).map_or("", String::as_str)
    }

    fn undeclared_in(&self, home: Option<usize>) -> impl Iterator<Item = &Undeclared<'a>> {
        self.undeclared.iter().filter(move |u| u.home == home)
    }
}

fn project_vertex(index: usize, position: usize) -> String {
    format!("n{index}_{position}")
}

fn legend_vertex(position: usize) -> String {
    format!("legend_{position}")
}

struct DisplayGraph<'a> {
    graph: &'a BuildGraph,
    hints: &'a LayoutHints,
    vertices: Vertices<'a>,
}

impl Display for DisplayGraph<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {GRAPH_NAME} {{")?;
        writeln!(f, "  rankdir={};", quote(&self.hints.rankdir))?;
        writeln!(f, "  splines={};", quote(&self.hints.splines))?;
        writeln!(f, "  node [shape=box];")?;

        for (index, subgraph) in self.graph.subgraphs.iter().enumerate() {
            writeln!(f)?;
            write!(
                f,
                "{}",
                DisplayCluster {
                    id: &format!("cluster_{index}"),
                    subgraph,
                    vertex: &|position| project_vertex(index, position),
                    home: Some(index),
                    inline_calls: false,
                    vertices: &self.vertices,
                }
            )?;
        }
        if let Some(legend) = &self.graph.legend {
            writeln!(f)?;
            write!(
                f,
                "{}",
                DisplayCluster {
                    id: LEGEND_CLUSTER,
                    subgraph: legend,
                    vertex: &legend_vertex,
                    home: None,
                    inline_calls: true,
                    vertices: &self.vertices,
                }
            )?;
        }

        let mut loose = self.vertices.undeclared_in(None).peekable();
        let mut calls = self
            .graph
            .subgraphs
            .iter()
            .flat_map(|s| s.edges.iter())
            .filter(|e| e.kind == EdgeKind::Call)
            .peekable();
        if loose.peek().is_some() || calls.peek().is_some() {
            writeln!(f)?;
        }
        for undeclared in loose {
            writeln!(f, "  {}", DisplayUndeclared(undeclared))?;
        }
        for edge in calls {
            writeln!(f, "  {}", DisplayEdge(edge, &self.vertices))?;
        }
        writeln!(f, "}}")
    }
}

/// Wrapper struct to display one subgraph as a cluster.
struct DisplayCluster<'a> {
    id: &'a str,
    subgraph: &'a Subgraph,
    /// Vertex name for the node at a given position.
    vertex: &'a dyn Fn(usize) -> String,
    /// Subgraph index owning undeclared endpoints, if any.
    home: Option<usize>,
    /// Write call edges inside the cluster rather than leaving them to the
    /// top level.
    inline_calls: bool,
    vertices: &'a Vertices<'a>,
}

impl Display for DisplayCluster<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "  subgraph {} {{", quote(self.id))?;
        writeln!(f, "    label={};", cluster_label(self.subgraph))?;
        for (position, node) in self.subgraph.nodes.iter().enumerate() {
            writeln!(f, "    {}", DisplayNode(&(self.vertex)(position), node))?;
        }
        if self.home.is_some() {
            for undeclared in self.vertices.undeclared_in(self.home) {
                writeln!(f, "    {}", DisplayUndeclared(undeclared))?;
            }
        }
        for edge in self
            .subgraph
            .edges
            .iter()
            .filter(|e| self.inline_calls || e.kind == EdgeKind::Dependency)
        {
            writeln!(f, "    {}", DisplayEdge(edge, self.vertices))?;
        }
        writeln!(f, "  }}")
    }
}

/// Wrapper struct to display a node statement.
struct DisplayNode<'a>(&'a str, &'a Node);

impl Display for DisplayNode<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self(vertex, node) = self;
        write!(f, "{} [label={}", quote(vertex), quote(&node.id.name))?;
        if node.is_default {
            write!(f, ", shape=doubleoctagon, style=bold")?;
        }
        write!(f, "];")
    }
}

/// Wrapper struct to display an undeclared endpoint.
struct DisplayUndeclared<'a, 'g>(&'a Undeclared<'g>);

impl Display for DisplayUndeclared<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [label={}];",
            quote(&self.0.vertex),
            quote(&self.0.id.name)
        )
    }
}

/// Wrapper struct to display an edge statement.
struct DisplayEdge<'a>(&'a Edge, &'a Vertices<'a>);

impl Display for DisplayEdge<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self(edge, vertices) = self;
        write!(
            f,
            "{} -> {} [style={}",
            quote(vertices.name(&edge.from)),
            quote(vertices.name(&edge.to)),
            edge.style().as_str()
        )?;
        if let Some(label) = &edge.label {
            write!(f, ", label={}", quote(label))?;
        }
        write!(f, "];")
    }
}
