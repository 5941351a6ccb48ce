//! # Repograph Chunker
//!
//! Splits source files into syntactic chunks with stable, content-addressed
//! identities.
//!
//! ## Pipeline
//!
//! ```text
//! Source file
//!     │
//!     ├──> Structural pass (tree-sitter)
//!     │      ├─ function / method / class definitions
//!     │      ├─ parent symbol propagation
//!     │      └─ docstring capture
//!     │
//!     ├──> Heuristic pass (line scan, fallback)
//!     │      └─ keyword-delimited blocks
//!     │
//!     └──> Chunk[] (ordered, ids derived from boundaries)
//! ```
//!
//! The chunker never fails: parser trouble degrades to the heuristic pass,
//! unreadable files yield no chunks.

mod chunker;
mod config;
mod error;
mod heuristic;
mod language;
mod summary;
mod types;

pub use chunker::SyntaxChunker;
pub use config::ChunkerConfig;
pub use error::{ChunkerError, Result};
pub use language::Language;
pub use summary::{FileSummary, ModuleSummary};
pub use types::{Chunk, ChunkKind};
