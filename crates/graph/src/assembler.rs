use crate::extract;
use crate::store::GraphStore;
use crate::symbols::SymbolTable;
use crate::types::{DependencyEdge, DependencyGraph, GraphNode, NodePayload};
use repograph_chunker::Chunk;
use std::collections::HashMap;
use std::path::Path;

/// How many characters of chunk text are kept on graph nodes
const NODE_CONTENT_LIMIT: usize = 500;

/// Owns the in-memory dependency graph for the duration of one analysis run.
///
/// Every `build` clears prior state and reconstructs the graph wholesale:
/// chunk nodes and the symbol table first, then the five extractors in a
/// fixed order, then a single best-effort sync to the external store. Sync
/// failure never affects the in-memory result.
pub struct GraphAssembler {
    graph: DependencyGraph,
    symbols: SymbolTable,
    import_table: HashMap<String, Vec<String>>,
    store: Option<Box<dyn GraphStore>>,
    synced: bool,
}

impl GraphAssembler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: DependencyGraph::new(),
            symbols: SymbolTable::build(&[]),
            import_table: HashMap::new(),
            store: None,
            synced: false,
        }
    }

    /// Attach an external graph store to sync into after each build
    #[must_use]
    pub fn with_store(store: Box<dyn GraphStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::new()
        }
    }

    /// Rebuild the dependency graph from scratch for the given chunk set
    pub fn build(&mut self, chunks: &[Chunk], repo_root: &Path) -> &DependencyGraph {
        log::info!("Building dependency graph for {} chunks", chunks.len());

        self.graph.clear();
        self.import_table.clear();
        self.synced = false;

        // Stable total order so last-write-wins symbol registration and
        // node insertion are deterministic regardless of input order.
        let mut ordered: Vec<Chunk> = chunks.to_vec();
        ordered.sort_by(|a, b| {
            (&a.path, a.start_line, a.end_line).cmp(&(&b.path, b.start_line, b.end_line))
        });

        for chunk in &ordered {
            self.graph.ensure_node(chunk_node(chunk));
        }
        self.symbols = SymbolTable::build(&ordered);

        self.apply(extract::containment::extract(&ordered, &self.symbols));

        let imports = extract::imports::extract(&ordered, repo_root);
        self.import_table = imports.imports_by_file;
        self.apply(imports.edges);

        self.apply(extract::calls::extract(&ordered, &self.symbols));
        self.apply(extract::variables::extract(&ordered));
        self.apply(extract::test_links::extract(&ordered));

        self.sync_to_store();

        log::info!(
            "Dependency graph built: {} nodes, {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        );
        &self.graph
    }

    /// Apply extractor output, materializing file and variable endpoint
    /// nodes on demand
    fn apply(&mut self, edges: Vec<DependencyEdge>) {
        for edge in edges {
            for endpoint in [&edge.source, &edge.target] {
                if let Some(node) = synthesized_node(endpoint) {
                    self.graph.ensure_node(node);
                }
            }

            if !self.graph.upsert_edge(&edge.source, &edge.target, edge.edge) {
                log::debug!(
                    "Dropping edge with unknown endpoint: {} -> {}",
                    edge.source,
                    edge.target
                );
            }
        }
    }

    /// Single best-effort attempt; unreachable stores are logged and skipped
    fn sync_to_store(&mut self) {
        let Some(store) = &self.store else {
            return;
        };

        match store.replace(&self.graph.export()) {
            Ok(()) => {
                self.synced = true;
                log::info!(
                    "Synced {} nodes and {} edges to graph store",
                    self.graph.node_count(),
                    self.graph.edge_count()
                );
            }
            Err(e) => {
                log::warn!("Graph store sync failed, continuing with in-memory graph: {e}");
            }
        }
    }

    #[must_use]
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Per-file list of parsed module references (resolved or not)
    #[must_use]
    pub fn import_table(&self) -> &HashMap<String, Vec<String>> {
        &self.import_table
    }

    /// Whether the last build reached the external store
    #[must_use]
    pub fn synced(&self) -> bool {
        self.synced
    }
}

impl Default for GraphAssembler {
    fn default() -> Self {
        Self::new()
    }
}

fn chunk_node(chunk: &Chunk) -> GraphNode {
    GraphNode {
        id: chunk.id.clone(),
        payload: NodePayload::Chunk {
            kind: chunk.kind,
            path: chunk.path.clone(),
            start_line: chunk.start_line,
            end_line: chunk.end_line,
            parent_symbol: chunk.parent_symbol.clone(),
            content: chunk.content.chars().take(NODE_CONTENT_LIMIT).collect(),
            digest: chunk.digest.clone(),
        },
    }
}

/// File and variable nodes are derived from their ids when an extractor
/// references them; chunk endpoints must already exist.
fn synthesized_node(id: &str) -> Option<GraphNode> {
    if let Some(path) = id.strip_prefix("file:") {
        let name = path.rsplit('/').next().unwrap_or(path);
        return Some(GraphNode {
            id: id.to_string(),
            payload: NodePayload::File {
                path: path.to_string(),
                name: name.to_string(),
            },
        });
    }

    if let Some(rest) = id.strip_prefix("var:") {
        let (name, path) = rest.split_once(':')?;
        return Some(GraphNode {
            id: id.to_string(),
            payload: NodePayload::Variable {
                name: name.to_string(),
                path: path.to_string(),
            },
        });
    }

    None
}
