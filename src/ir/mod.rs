//! Intermediate Representation structures.
//!
//! This module defines the backend-agnostic graph assembled from parsed
//! [`crate::ast::Project`] models. It carries no DOT syntax; the
//! [`crate::dot_gen`] module serialises it for Graphviz.
//!
//! # Examples
//!
//! ```
//! use antgraph::ir::{BuildGraph, EdgeKind, GraphOptions};
//! use antgraph::project;
//! use camino::Utf8Path;
//!
//! let xml = r#"<project name="demo">
//!   <target name="build" depends="clean"/>
//!   <target name="clean"/>
//! </project>"#;
//! let parsed = project::from_str(xml, Utf8Path::new("build.xml")).expect("parse");
//! let graph = BuildGraph::from_projects(&[parsed], GraphOptions { legend: false });
//! assert_eq!(graph.nodes().count(), 2);
//! let edges: Vec<_> = graph.edges().collect();
//! assert_eq!(edges.len(), 1);
//! assert_eq!(edges[0].kind, EdgeKind::Dependency);
//! ```

mod from_projects;
mod graph;
mod legend;

pub use graph::{BuildGraph, Edge, EdgeKind, EdgeStyle, GraphOptions, Node, NodeId, Subgraph};
pub use legend::{LEGEND_FILE, LEGEND_TITLE, legend};
