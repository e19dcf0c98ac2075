//! Graph assembly properties checked through the public API.
//!
//! Build files are parsed from inline XML so each case shows the input that
//! produces the asserted nodes and edges.

use antgraph::ast::Project;
use antgraph::ir::{BuildGraph, EdgeKind, EdgeStyle, GraphOptions, LEGEND_FILE, NodeId};
use antgraph::project;
use camino::Utf8Path;
use rstest::rstest;

const NO_LEGEND: GraphOptions = GraphOptions { legend: false };

fn parse(file: &str, xml: &str) -> Project {
    project::from_str(xml, Utf8Path::new(file)).expect("parse build file")
}

#[rstest]
fn build_graph_default_is_empty() {
    let graph = BuildGraph::default();
    assert!(graph.subgraphs.is_empty());
    assert!(graph.legend.is_none());
    assert_eq!(graph.nodes().count(), 0);
}

#[rstest]
fn build_depends_on_clean() {
    let project = parse(
        "build.xml",
        r#"<project name="p"><target name="build" depends="clean"/><target name="clean"/></project>"#,
    );
    let graph = BuildGraph::from_projects(&[project], NO_LEGEND);

    assert_eq!(graph.nodes().count(), 2);
    let edges: Vec<_> = graph.edges().collect();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].kind, EdgeKind::Dependency);
    assert_eq!(edges[0].from, NodeId::new("build.xml", "build"));
    assert_eq!(edges[0].to, NodeId::new("build.xml", "clean"));
}

#[rstest]
fn one_node_per_declared_target_across_files() {
    let a = parse(
        "a.xml",
        r#"<project name="a"><target name="x"/><target name="y"/></project>"#,
    );
    let b = parse(
        "b.xml",
        r#"<project name="b"><target name="x"/></project>"#,
    );
    let graph = BuildGraph::from_projects(&[a, b], NO_LEGEND);

    let ids: Vec<String> = graph.nodes().map(|n| n.id.to_string()).collect();
    assert_eq!(ids, ["a.xml::x", "a.xml::y", "b.xml::x"]);
}

#[rstest]
fn undeclared_dependencies_still_produce_edges() {
    let project = parse(
        "build.xml",
        r#"<project name="p"><target name="all" depends="missing, also-missing"/></project>"#,
    );
    let graph = BuildGraph::from_projects(&[project], NO_LEGEND);

    let targets: Vec<_> = graph.edges().map(|e| e.to.to_string()).collect();
    assert_eq!(targets, ["build.xml::missing", "build.xml::also-missing"]);
    assert_eq!(graph.nodes().count(), 1);
}

#[rstest]
#[case(Some("build"), &["build"])]
#[case(Some("nothing"), &[])]
#[case(None, &[])]
fn default_style_follows_the_declared_default(
    #[case] default: Option<&str>,
    #[case] expected: &[&str],
) {
    let attr = default.map_or_else(String::new, |d| format!(r#" default="{d}""#));
    let xml = format!(r#"<project name="p"{attr}><target name="build"/><target name="test"/></project>"#);
    let graph = BuildGraph::from_projects(&[parse("build.xml", &xml)], NO_LEGEND);

    let defaults: Vec<_> = graph
        .nodes()
        .filter(|n| n.is_default)
        .map(|n| n.id.name.as_str())
        .collect();
    assert_eq!(defaults, expected);
}

#[rstest]
fn call_edges_carry_their_kind_and_resolve_files() {
    let project = parse(
        "build.xml",
        r#"<project name="p">
             <target name="release">
               <antcall target="package"/>
               <runtarget target="test"/>
               <ant antfile="sub/lib.xml" target="jar"/>
               <ant antfile="" target="local"/>
             </target>
           </project>"#,
    );
    let graph = BuildGraph::from_projects(&[project], NO_LEGEND);

    let calls: Vec<(String, String)> = graph
        .edges()
        .filter(|e| e.kind == EdgeKind::Call)
        .map(|e| (e.to.to_string(), e.label.clone().unwrap_or_default()))
        .collect();
    assert_eq!(
        calls,
        [
            ("build.xml::package".to_owned(), "antcall".to_owned()),
            ("build.xml::test".to_owned(), "runtarget".to_owned()),
            ("sub/lib.xml::jar".to_owned(), "ant".to_owned()),
            ("build.xml::local".to_owned(), "ant".to_owned()),
        ]
    );
}

#[rstest]
fn empty_antfile_stays_in_the_calling_file() {
    let a = parse(
        "a.xml",
        r#"<project name="a"><target name="x"/></project>"#,
    );
    let b = parse(
        "b.xml",
        r#"<project name="b">
             <target name="x"/>
             <target name="go"><ant antfile="" target="x"/></target>
           </project>"#,
    );
    let graph = BuildGraph::from_projects(&[a, b], NO_LEGEND);

    let calls: Vec<_> = graph
        .edges()
        .filter(|e| e.kind == EdgeKind::Call)
        .collect();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].from, NodeId::new("b.xml", "go"));
    assert_eq!(calls[0].to, NodeId::new("b.xml", "x"));
    assert_ne!(calls[0].to, NodeId::new("a.xml", "x"));
}

#[rstest]
fn edge_styles_match_their_kind() {
    let project = parse(
        "build.xml",
        r#"<project name="p">
             <target name="a" depends="b"><antcall target="c"/></target>
           </project>"#,
    );
    let graph = BuildGraph::from_projects(&[project], GraphOptions::default());

    for edge in graph.edges() {
        let expected = match edge.kind {
            EdgeKind::Dependency => EdgeStyle::Solid,
            EdgeKind::Call => EdgeStyle::Dashed,
        };
        assert_eq!(edge.style(), expected);
    }
}

#[rstest]
fn legend_is_optional_and_kept_apart() {
    let project = parse("build.xml", r#"<project name="p"><target name="a"/></project>"#);

    let without = BuildGraph::from_projects(std::slice::from_ref(&project), NO_LEGEND);
    assert!(without.nodes().all(|n| n.id.file != LEGEND_FILE));

    let with = BuildGraph::from_projects(&[project], GraphOptions::default());
    let legend_nodes = with.nodes().filter(|n| n.id.file == LEGEND_FILE).count();
    assert_eq!(legend_nodes, 4);
    assert_eq!(with.subgraphs.len(), 1);
}
