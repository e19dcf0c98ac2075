//! Graph vertices, edges and their grouping into per-file subgraphs.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::fmt;

/// Options controlling graph assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphOptions {
    /// Append the static legend subgraph.
    pub legend: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self { legend: true }
    }
}

/// The assembled graph: one subgraph per project plus an optional legend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildGraph {
    /// Project subgraphs in input order.
    pub subgraphs: Vec<Subgraph>,
    /// Static legend, when requested.
    pub legend: Option<Subgraph>,
}

impl BuildGraph {
    /// Iterate over every node, legend included, in emission order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.all_subgraphs().flat_map(|s| s.nodes.iter())
    }

    /// Iterate over every edge, legend included, in emission order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.all_subgraphs().flat_map(|s| s.edges.iter())
    }

    fn all_subgraphs(&self) -> impl Iterator<Item = &Subgraph> {
        self.subgraphs.iter().chain(self.legend.as_ref())
    }
}

/// The nodes and outgoing edges of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subgraph {
    /// Display title, the project name for file subgraphs.
    pub title: String,
    /// File identity shared by every node declared here.
    pub file: Utf8PathBuf,
    /// Declared nodes in document order.
    pub nodes: Vec<Node>,
    /// Edges originating from this subgraph's nodes.
    pub edges: Vec<Edge>,
}

/// Identity of a node: the file it belongs to and its target name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId {
    /// File identity.
    pub file: Utf8PathBuf,
    /// Target name.
    pub name: String,
}

impl NodeId {
    /// Build an identity from its parts.
    pub fn new(file: impl AsRef<Utf8Path>, name: impl Into<String>) -> Self {
        Self {
            file: file.as_ref().to_owned(),
            name: name.into(),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.file, self.name)
    }
}

/// A declared target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Unique identity.
    pub id: NodeId,
    /// Whether the node is drawn in the default-target style.
    pub is_default: bool,
}

/// A directed connection between two node identities.
///
/// Endpoints are not required to name declared nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    /// Source node.
    pub from: NodeId,
    /// Destination node.
    pub to: NodeId,
    /// Relationship the edge represents.
    pub kind: EdgeKind,
    /// Optional caption.
    pub label: Option<String>,
}

impl Edge {
    /// A `depends` relationship.
    #[must_use]
    pub const fn dependency(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            kind: EdgeKind::Dependency,
            label: None,
        }
    }

    /// A call relationship captioned with the element that made it.
    #[must_use]
    pub const fn call(from: NodeId, to: NodeId, label: String) -> Self {
        Self {
            from,
            to,
            kind: EdgeKind::Call,
            label: Some(label),
        }
    }

    /// Line style used to draw the edge.
    #[must_use]
    pub const fn style(&self) -> EdgeStyle {
        self.kind.style()
    }
}

/// Relationship an [`Edge`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Declared through a target's `depends` attribute.
    Dependency,
    /// Declared through `antcall`, `runtarget` or `ant`.
    Call,
}

impl EdgeKind {
    /// Line style for this kind.
    #[must_use]
    pub const fn style(self) -> EdgeStyle {
        match self {
            Self::Dependency => EdgeStyle::Solid,
            Self::Call => EdgeStyle::Dashed,
        }
    }
}

/// Line style of an [`Edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    /// Continuous line.
    Solid,
    /// Broken line.
    Dashed,
}

impl EdgeStyle {
    /// Graphviz `style` attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
        }
    }
}
