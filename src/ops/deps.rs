use serde::Serialize;

use crate::model::item::{ItemKind, ItemSource, PlanningItem};

/// An item that declares at least one dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyNode {
    /// Diagram identifier: the ticket key, or `HOST_ISSUE_<n>` for host issues
    pub id: String,
    pub key: String,
    pub title: String,
    pub kind: ItemKind,
}

/// `from` depends on `to`. `to` is the raw reference and may not name any
/// item in the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyGraph {
    pub nodes: Vec<DependencyNode>,
    pub edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Build the dependency graph for items that declare dependencies.
///
/// Every such item becomes a node. Edges are emitted for ticket items only,
/// unless `host_edges` is set, in which case host issues get edges too.
/// References are neither resolved nor checked for cycles.
pub fn extract_dependencies(items: &[PlanningItem<'_>], host_edges: bool) -> DependencyGraph {
    let mut graph = DependencyGraph::default();

    for item in items.iter().filter(|i| !i.dependencies.is_empty()) {
        let id = node_id(item);
        let emit_edges = match item.source {
            ItemSource::Ticket(_) => true,
            ItemSource::Host(_) => host_edges,
        };
        if emit_edges {
            graph
                .edges
                .extend(item.dependencies.iter().map(|dep| DependencyEdge {
                    from: id.clone(),
                    to: dep.clone(),
                }));
        }
        graph.nodes.push(DependencyNode {
            id,
            key: item.key(),
            title: item.title().to_string(),
            kind: item.kind(),
        });
    }

    graph
}

fn node_id(item: &PlanningItem<'_>) -> String {
    match item.source {
        ItemSource::Ticket(t) => t.key.clone(),
        ItemSource::Host(_) => format!("HOST_ISSUE_{}", item.source_index),
    }
}
