//! # Repograph Analyzer
//!
//! Whole-repository analysis orchestration.
//!
//! ## Pipeline
//!
//! ```text
//! Repository root
//!     │
//!     ├──> Source Scanner (.gitignore aware)
//!     │      └─> Source files
//!     │
//!     ├──> Syntax Chunker (bounded parallel fan-out)
//!     │      └─> Chunks, stably ordered
//!     │
//!     ├──> File / Module Summaries (Merkle digests)
//!     │
//!     └──> Graph Assembler + Centrality
//!            └─> AnalysisReport
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use repograph_analyzer::RepoAnalyzer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut analyzer = RepoAnalyzer::new()?;
//!     let report = analyzer.analyze("/path/to/repo").await?;
//!
//!     println!("{} files, {} chunks", report.total_files, report.total_chunks);
//!     Ok(())
//! }
//! ```

mod analyzer;
mod error;
mod report;
mod scanner;

pub use analyzer::RepoAnalyzer;
pub use error::{AnalyzerError, Result};
pub use report::AnalysisReport;
pub use scanner::SourceScanner;
