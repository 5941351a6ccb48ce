use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Graph build error: {0}")]
    BuildError(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Graph store error: {0}")]
    StoreError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
