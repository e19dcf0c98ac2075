//! Project-to-IR conversion.

use crate::ast::{Project, Target};

use super::{
    graph::{BuildGraph, Edge, GraphOptions, Node, NodeId, Subgraph},
    legend::legend,
};

impl BuildGraph {
    /// Assemble the graph for `projects`, processed in the order given.
    ///
    /// Every declared target becomes one node. Each `depends` entry becomes a
    /// dependency edge into the same file, and each task naming a target
    /// becomes a call edge into the task's file, or the owner's file when the
    /// task names none. References are resolved by identity only: edges to
    /// targets that are never declared are kept.
    #[must_use]
    pub fn from_projects(projects: &[Project], options: GraphOptions) -> Self {
        let subgraphs = projects.iter().map(project_subgraph).collect();
        Self {
            subgraphs,
            legend: options.legend.then(legend),
        }
    }
}

fn project_subgraph(project: &Project) -> Subgraph {
    let mut subgraph = Subgraph {
        title: project.name.clone(),
        file: project.file.clone(),
        nodes: Vec::with_capacity(project.targets.len()),
        edges: Vec::new(),
    };
    for target in &project.targets {
        subgraph.nodes.push(Node {
            id: NodeId::new(&project.file, &target.name),
            is_default: project.is_default(target),
        });
        push_target_edges(project, target, &mut subgraph.edges);
    }
    subgraph
}

fn push_target_edges(project: &Project, target: &Target, edges: &mut Vec<Edge>) {
    let from = NodeId::new(&project.file, &target.name);
    edges.extend(
        target
            .depends
            .iter()
            .map(|dep| Edge::dependency(from.clone(), NodeId::new(&project.file, dep))),
    );
    for task in &target.tasks {
        let Some(callee) = task.target_name() else {
            continue;
        };
        let file = task.resolve_file(&project.file);
        edges.push(Edge::call(
            from.clone(),
            NodeId::new(file, callee),
            task.kind.to_string(),
        ));
    }
}
