//! Static legend explaining node and edge styles.

use camino::Utf8PathBuf;

use super::graph::{Edge, Node, NodeId, Subgraph};

/// Title of the legend subgraph.
pub const LEGEND_TITLE: &str = "Legend";

/// File identity reserved for legend nodes. Input paths are never empty, so
/// no parsed project can share it.
pub const LEGEND_FILE: &str = "";

/// Build the fixed four-node legend: a default target with a dependency and a
/// plain target with a call.
#[must_use]
pub fn legend() -> Subgraph {
    let id = |name: &str| NodeId::new(LEGEND_FILE, name);
    let node = |name: &str, is_default: bool| Node {
        id: id(name),
        is_default,
    };
    Subgraph {
        title: LEGEND_TITLE.to_owned(),
        file: Utf8PathBuf::from(LEGEND_FILE),
        nodes: vec![
            node("default target", true),
            node("dependency", false),
            node("target", false),
            node("called target", false),
        ],
        edges: vec![
            Edge::dependency(id("default target"), id("dependency")),
            Edge::call(id("target"), id("called target"), "antcall".to_owned()),
        ],
    }
}
