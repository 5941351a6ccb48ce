use crate::types::Chunk;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// File-level aggregation over chunks.
///
/// The digest is a pure function of the sorted child digests plus the path,
/// so any content change in a chunk bubbles up while reordering does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSummary {
    /// Source file path
    pub path: String,

    /// Chunks extracted from this file, in source order
    pub chunks: Vec<Chunk>,

    /// Merkle digest over sorted chunk digests
    pub digest: String,
}

impl FileSummary {
    #[must_use]
    pub fn new(path: impl Into<String>, chunks: Vec<Chunk>) -> Self {
        let path = path.into();
        let digest = Self::compute_digest(&path, &chunks);
        Self {
            path,
            chunks,
            digest,
        }
    }

    fn compute_digest(path: &str, chunks: &[Chunk]) -> String {
        let mut child_digests: Vec<&str> = chunks.iter().map(|c| c.digest.as_str()).collect();
        child_digests.sort_unstable();

        let mut hasher = Sha256::new();
        hasher.update(path);
        hasher.update(":");
        hasher.update(child_digests.join(":"));
        hex::encode(hasher.finalize())
    }
}

/// Directory-level aggregation over files and nested modules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleSummary {
    /// Directory path relative to the repository root ("root" for the top)
    pub path: String,

    /// Files directly under this module
    pub files: Vec<FileSummary>,

    /// Nested modules
    pub submodules: Vec<ModuleSummary>,

    /// Merkle digest over sorted file and submodule digests
    pub digest: String,
}

impl ModuleSummary {
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        files: Vec<FileSummary>,
        submodules: Vec<ModuleSummary>,
    ) -> Self {
        let path = path.into();
        let digest = Self::compute_digest(&path, &files, &submodules);
        Self {
            path,
            files,
            submodules,
            digest,
        }
    }

    fn compute_digest(path: &str, files: &[FileSummary], submodules: &[ModuleSummary]) -> String {
        let mut file_digests: Vec<&str> = files.iter().map(|f| f.digest.as_str()).collect();
        file_digests.sort_unstable();

        let mut submodule_digests: Vec<&str> =
            submodules.iter().map(|m| m.digest.as_str()).collect();
        submodule_digests.sort_unstable();

        let mut hasher = Sha256::new();
        hasher.update(path);
        hasher.update(":");
        hasher.update(file_digests.join(":"));
        hasher.update(":");
        hasher.update(submodule_digests.join(":"));
        hex::encode(hasher.finalize())
    }
}
