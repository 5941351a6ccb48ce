use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use repograph_chunker::ChunkKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Node in the dependency graph, addressed by a string id.
///
/// Chunk ids are boundary hashes, file nodes are `file:<path>`, variable
/// nodes are `var:<name>:<path>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,

    #[serde(flatten)]
    pub payload: NodePayload,
}

/// Typed attributes carried by a graph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodePayload {
    Chunk {
        kind: ChunkKind,
        path: String,
        start_line: usize,
        end_line: usize,
        parent_symbol: Option<String>,
        /// Chunk text truncated for storage
        content: String,
        digest: String,
    },
    File {
        path: String,
        name: String,
    },
    Variable {
        name: String,
        path: String,
    },
}

impl NodePayload {
    /// The node's type label (used for store labels and exports)
    #[must_use]
    pub const fn type_label(&self) -> &'static str {
        match self {
            Self::Chunk { .. } => "chunk",
            Self::File { .. } => "file",
            Self::Variable { .. } => "variable",
        }
    }
}

/// Relationship type carried by every edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Contains,
    Import,
    Call,
    DefinedIn,
    WritesTo,
    ReadsFrom,
    TestOf,
}

impl EdgeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Import => "import",
            Self::Call => "call",
            Self::DefinedIn => "defined_in",
            Self::WritesTo => "writes_to",
            Self::ReadsFrom => "reads_from",
            Self::TestOf => "test_of",
        }
    }
}

/// Edge payload: relationship type plus the reliability of the heuristic
/// that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub kind: EdgeKind,

    /// Score in [0, 1]; exact containment is 1.0, regex-based inference less
    pub confidence: f64,

    /// Extractor-specific detail (imported module, called name)
    pub detail: Option<String>,
}

impl GraphEdge {
    #[must_use]
    pub const fn new(kind: EdgeKind, confidence: f64) -> Self {
        Self {
            kind,
            confidence,
            detail: None,
        }
    }

    #[must_use]
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// An edge emitted by a relationship extractor, still addressed by node ids
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyEdge {
    pub source: String,
    pub target: String,
    pub edge: GraphEdge,
}

impl DependencyEdge {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>, edge: GraphEdge) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            edge,
        }
    }
}

/// Directed multi-edge property graph over chunks, files and variables.
///
/// Parallel edges of different kinds between the same node pair are
/// preserved; re-adding an edge with an existing kind updates it in place.
pub struct DependencyGraph {
    graph: DiGraph<GraphNode, GraphEdge>,
    index: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Drop all nodes and edges
    pub fn clear(&mut self) {
        self.graph.clear();
        self.index.clear();
    }

    /// Insert a node unless one with the same id already exists
    pub fn ensure_node(&mut self, node: GraphNode) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node.id) {
            return idx;
        }

        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        idx
    }

    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index.get(id).map(|&idx| &self.graph[idx])
    }

    pub(crate) fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub(crate) fn inner(&self) -> &DiGraph<GraphNode, GraphEdge> {
        &self.graph
    }

    /// Add an edge between existing nodes. An edge of the same kind between
    /// the same pair is updated rather than duplicated; edges of other kinds
    /// are left untouched. Returns false when either endpoint is missing.
    pub fn upsert_edge(&mut self, source: &str, target: &str, edge: GraphEdge) -> bool {
        let (Some(a), Some(b)) = (self.node_index(source), self.node_index(target)) else {
            return false;
        };

        let existing = self
            .graph
            .edges_connecting(a, b)
            .find(|e| e.weight().kind == edge.kind)
            .map(|e| e.id());

        match existing {
            Some(edge_idx) => self.graph[edge_idx] = edge,
            None => {
                self.graph.add_edge(a, b, edge);
            }
        }

        true
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterate all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    /// Iterate all edges as `(source id, edge, target id)`
    pub fn edges(&self) -> impl Iterator<Item = (&str, &GraphEdge, &str)> {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].id.as_str(),
                e.weight(),
                self.graph[e.target()].id.as_str(),
            )
        })
    }

    /// Serializable snapshot of the whole graph, deterministically ordered
    #[must_use]
    pub fn export(&self) -> GraphExport {
        self.filtered_export(None)
    }

    /// Snapshot restricted to one edge kind; only nodes incident to a
    /// retained edge are included
    #[must_use]
    pub fn filtered_export(&self, kind: Option<EdgeKind>) -> GraphExport {
        let mut edges: Vec<ExportedEdge> = self
            .edges()
            .filter(|(_, edge, _)| kind.map_or(true, |k| edge.kind == k))
            .map(|(source, edge, target)| ExportedEdge {
                source: source.to_string(),
                target: target.to_string(),
                kind: edge.kind,
                confidence: edge.confidence,
                detail: edge.detail.clone(),
            })
            .collect();
        edges.sort_by(|a, b| {
            (&a.source, &a.target, a.kind).cmp(&(&b.source, &b.target, b.kind))
        });

        let mut nodes: Vec<GraphNode> = match kind {
            None => self.nodes().cloned().collect(),
            Some(_) => {
                let incident: std::collections::HashSet<&str> = edges
                    .iter()
                    .flat_map(|e| [e.source.as_str(), e.target.as_str()])
                    .collect();
                self.nodes()
                    .filter(|n| incident.contains(n.id.as_str()))
                    .cloned()
                    .collect()
            }
        };
        nodes.sort_by(|a, b| a.id.cmp(&b.id));

        GraphExport { nodes, edges }
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable graph snapshot for visualization and persistence consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<ExportedEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub confidence: f64,
    pub detail: Option<String>,
}

/// Node/edge counts for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
}
