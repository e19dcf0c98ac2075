//! Snapshot tests for DOT generation.
//!
//! Two build files with dependency, local call and cross-file call edges are
//! assembled and rendered; the DOT text is compared against a stored
//! snapshot so any change to the output format is reviewed explicitly.

use antgraph::{
    dot_gen::{self, LayoutHints},
    ir::{BuildGraph, GraphOptions},
    project,
};
use camino::Utf8Path;
use insta::{Settings, assert_snapshot};

fn two_file_graph(options: GraphOptions) -> BuildGraph {
    let app = project::from_str(include_str!("data/build.xml"), Utf8Path::new("build.xml"))
        .expect("parse build.xml");
    let lib = project::from_str(include_str!("data/lib.xml"), Utf8Path::new("lib.xml"))
        .expect("parse lib.xml");
    BuildGraph::from_projects(&[app, lib], options)
}

fn with_snapshot_dir(f: impl FnOnce()) {
    let mut settings = Settings::new();
    settings.set_snapshot_path(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/snapshots/dot"));
    settings.bind(f);
}

#[test]
fn two_file_build_with_legend() {
    let graph = two_file_graph(GraphOptions::default());
    let dot = dot_gen::generate(&graph, &LayoutHints::default());
    with_snapshot_dir(|| {
        assert_snapshot!("two_file_build", dot);
    });
}

#[test]
fn generation_is_deterministic() {
    let first = dot_gen::generate(
        &two_file_graph(GraphOptions::default()),
        &LayoutHints::default(),
    );
    let second = dot_gen::generate(
        &two_file_graph(GraphOptions::default()),
        &LayoutHints::default(),
    );
    assert_eq!(first, second);
}

#[test]
fn layout_hints_reach_the_header() {
    let hints = LayoutHints {
        rankdir: "TB".into(),
        splines: "curved".into(),
    };
    let dot = dot_gen::generate(&two_file_graph(GraphOptions { legend: false }), &hints);
    assert!(dot.starts_with("digraph antgraph {\n  rankdir=\"TB\";\n  splines=\"curved\";\n"));
    assert!(!dot.contains("cluster_legend"));
}
