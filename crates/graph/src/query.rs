use crate::types::{DependencyGraph, EdgeKind, GraphExport, GraphStats};
use petgraph::visit::EdgeRef;
use petgraph::Direction as PetDirection;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Traversal direction for dependency queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing,
    Both,
}

/// One traversed edge: `(source, relationship, target)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyTriple {
    pub source: String,
    pub relationship: EdgeKind,
    pub target: String,
}

impl DependencyGraph {
    /// Bounded-depth traversal from `node_id`, following edges in the
    /// requested direction(s). Returns every `(source, relationship,
    /// target)` reached within `depth` hops; an unknown start node yields an
    /// empty result.
    #[must_use]
    pub fn query_dependencies(
        &self,
        node_id: &str,
        direction: Direction,
        depth: usize,
    ) -> Vec<DependencyTriple> {
        let Some(start) = self.node_index(node_id) else {
            return Vec::new();
        };

        let graph = self.inner();
        let mut triples = Vec::new();
        let mut emitted = HashSet::new();
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0usize)]);

        while let Some((current, hops)) = queue.pop_front() {
            if hops >= depth {
                continue;
            }

            let mut neighbors = Vec::new();
            if matches!(direction, Direction::Outgoing | Direction::Both) {
                for edge in graph.edges_directed(current, PetDirection::Outgoing) {
                    neighbors.push((edge.source(), edge.weight().kind, edge.target()));
                }
            }
            if matches!(direction, Direction::Incoming | Direction::Both) {
                for edge in graph.edges_directed(current, PetDirection::Incoming) {
                    neighbors.push((edge.source(), edge.weight().kind, edge.target()));
                }
            }

            for (source, kind, target) in neighbors {
                let triple = DependencyTriple {
                    source: graph[source].id.clone(),
                    relationship: kind,
                    target: graph[target].id.clone(),
                };
                if emitted.insert(triple.clone()) {
                    triples.push(triple);
                }

                let next = if source == current { target } else { source };
                if visited.insert(next) {
                    queue.push_back((next, hops + 1));
                }
            }
        }

        triples
    }

    /// Subgraph containing only `Call` edges and their incident nodes
    #[must_use]
    pub fn call_graph(&self) -> GraphExport {
        self.filtered_export(Some(EdgeKind::Call))
    }

    /// Subgraph containing only `Import` edges and their incident nodes
    #[must_use]
    pub fn import_graph(&self) -> GraphExport {
        self.filtered_export(Some(EdgeKind::Import))
    }

    /// Node and edge counts
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.node_count(),
            edges: self.edge_count(),
        }
    }
}
