//! # Repograph Graph
//!
//! Dependency graph construction over code chunks.
//!
//! ## Architecture
//!
//! ```text
//! Chunk[]
//!     │
//!     ├──> Symbol Table (name -> defining chunk)
//!     │
//!     ├──> Relationship Extractors (pure, independent)
//!     │      ├─ containment  (contains / defined_in, 1.0)
//!     │      ├─ imports      (import, 0.9)
//!     │      ├─ calls        (call, 0.8)
//!     │      ├─ variables    (writes_to, 0.7)
//!     │      └─ test links   (test_of, 0.9)
//!     │
//!     ├──> Graph Assembler (petgraph, rebuilt wholesale per run)
//!     │      └─ best-effort sync to an external graph store
//!     │
//!     ├──> Centrality (betweenness, pagerank, degrees over call edges)
//!     │
//!     └──> Query Layer (bounded-depth traversal, typed subgraphs)
//! ```

mod assembler;
mod centrality;
mod error;
mod extract;
mod query;
mod store;
mod symbols;
mod types;

pub use assembler::GraphAssembler;
pub use centrality::{compute_centrality, CentralityMetrics};
pub use error::{GraphError, Result};
pub use query::{DependencyTriple, Direction};
pub use store::{CypherExport, GraphStore, GraphStoreConfig};
pub use symbols::SymbolTable;
pub use types::{
    DependencyEdge, DependencyGraph, EdgeKind, ExportedEdge, GraphEdge, GraphExport, GraphNode,
    GraphStats, NodePayload,
};
