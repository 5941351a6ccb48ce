use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Chunker error: {0}")]
    ChunkerError(#[from] repograph_chunker::ChunkerError),

    #[error("Graph error: {0}")]
    GraphError(#[from] repograph_graph::GraphError),

    #[error("Invalid repository path: {0}")]
    InvalidPath(String),
}
