use crate::error::{AnalyzerError, Result};
use crate::report::AnalysisReport;
use crate::scanner::SourceScanner;
use repograph_chunker::{Chunk, ChunkerConfig, FileSummary, ModuleSummary, SyntaxChunker};
use repograph_graph::{compute_centrality, DependencyGraph, GraphAssembler, GraphStore};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Orchestrates one full analysis pass: scan, chunk in parallel, summarize,
/// assemble the dependency graph, rank.
///
/// One file's failure never drops other files' results; the pass always
/// completes with a best-effort graph.
pub struct RepoAnalyzer {
    chunker: Arc<SyntaxChunker>,
    assembler: GraphAssembler,
}

impl RepoAnalyzer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            chunker: Arc::new(SyntaxChunker::new(ChunkerConfig::default())?),
            assembler: GraphAssembler::new(),
        })
    }

    /// Analyzer that syncs each built graph to an external store
    pub fn with_store(store: Box<dyn GraphStore>) -> Result<Self> {
        Ok(Self {
            chunker: Arc::new(SyntaxChunker::new(ChunkerConfig::default())?),
            assembler: GraphAssembler::with_store(store),
        })
    }

    /// Run the full pipeline over a repository root
    pub async fn analyze(&mut self, repo_root: impl AsRef<Path>) -> Result<AnalysisReport> {
        let repo_root = repo_root.as_ref();
        if !repo_root.exists() {
            return Err(AnalyzerError::InvalidPath(format!(
                "Path does not exist: {}",
                repo_root.display()
            )));
        }

        log::info!("Starting analysis of {}", repo_root.display());

        let files = SourceScanner::new(repo_root).scan();
        let total_files = files.len();

        let mut chunks = self.chunk_files_parallel(repo_root, &files).await;
        chunks.sort_by(|a, b| {
            (&a.path, a.start_line, a.end_line).cmp(&(&b.path, b.start_line, b.end_line))
        });

        let modules = build_module_summaries(&chunks);

        let graph = self.assembler.build(&chunks, repo_root);
        let centrality = compute_centrality(graph);
        let stats = graph.stats();

        log::info!(
            "Analysis complete: {} files, {} chunks, {} graph nodes",
            total_files,
            chunks.len(),
            stats.nodes
        );

        Ok(AnalysisReport {
            repo: repo_root.display().to_string(),
            total_files,
            total_chunks: chunks.len(),
            chunks,
            modules,
            centrality,
            graph: stats,
        })
    }

    /// Fan file chunking out across a bounded pool. Chunking is a mix of IO
    /// and CPU; a small adaptive cap avoids spikes on large repositories.
    async fn chunk_files_parallel(&self, repo_root: &Path, files: &[PathBuf]) -> Vec<Chunk> {
        let max_concurrent = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .clamp(2, 8);

        let mut chunks = Vec::new();

        for batch in files.chunks(max_concurrent) {
            let mut tasks = Vec::with_capacity(batch.len());

            for file_path in batch {
                let file_path = file_path.clone();
                let relative = relative_path(repo_root, &file_path);
                let chunker = Arc::clone(&self.chunker);

                tasks.push(tokio::spawn(async move {
                    let bytes = tokio::fs::read(&file_path).await.map_err(|e| {
                        format!("{}: {e}", file_path.display())
                    })?;
                    let content = String::from_utf8_lossy(&bytes);
                    Ok::<_, String>(chunker.chunk_source(&content, &relative))
                }));
            }

            for task in tasks {
                match task.await {
                    Ok(Ok(file_chunks)) => chunks.extend(file_chunks),
                    Ok(Err(e)) => log::warn!("Skipping file: {e}"),
                    Err(e) => log::warn!("Chunking task panicked: {e}"),
                }
            }
        }

        chunks
    }

    /// The graph assembled by the most recent analysis
    #[must_use]
    pub fn graph(&self) -> &DependencyGraph {
        self.assembler.graph()
    }

    #[must_use]
    pub fn assembler(&self) -> &GraphAssembler {
        &self.assembler
    }
}

/// Group chunks per file, files per directory; digests roll up bottom-up
fn build_module_summaries(chunks: &[Chunk]) -> Vec<ModuleSummary> {
    let mut by_file: BTreeMap<&str, Vec<Chunk>> = BTreeMap::new();
    for chunk in chunks {
        by_file.entry(&chunk.path).or_default().push(chunk.clone());
    }

    let mut by_dir: BTreeMap<String, Vec<FileSummary>> = BTreeMap::new();
    for (path, file_chunks) in by_file {
        let dir = match path.rsplit_once('/') {
            Some((dir, _)) => dir.to_string(),
            None => "root".to_string(),
        };
        by_dir
            .entry(dir)
            .or_default()
            .push(FileSummary::new(path, file_chunks));
    }

    by_dir
        .into_iter()
        .map(|(dir, files)| ModuleSummary::new(dir, files, Vec::new()))
        .collect()
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
