use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A syntactic unit of source code with a boundary-derived identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// Stable identity: SHA-256 over `path:start_line:end_line`.
    /// Changes if and only if the boundaries change.
    pub id: String,

    /// Source file path (relative to the repository root)
    pub path: String,

    /// Start line (1-indexed)
    pub start_line: usize,

    /// End line (1-indexed, inclusive)
    pub end_line: usize,

    /// Syntactic kind of this chunk
    pub kind: ChunkKind,

    /// The raw source content
    pub content: String,

    /// Name of the nearest enclosing definition, if any
    pub parent_symbol: Option<String>,

    /// Primary identifier when the parser recorded one
    pub symbol: Option<String>,

    /// Extracted documentation string, if any
    pub docstring: Option<String>,

    /// Content digest: SHA-256 over `path:start_line:end_line:content`.
    /// Moves with content edits even when boundaries stay fixed.
    pub digest: String,
}

impl Chunk {
    /// Create a new chunk, deriving `id` and `digest` from its fields
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        start_line: usize,
        end_line: usize,
        kind: ChunkKind,
        content: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let content = content.into();
        let id = Self::identity(&path, start_line, end_line);
        let digest = Self::content_digest(&path, start_line, end_line, &content);

        Self {
            id,
            path,
            start_line,
            end_line,
            kind,
            content,
            parent_symbol: None,
            symbol: None,
            docstring: None,
            digest,
        }
    }

    /// Builder: set the enclosing definition name
    #[must_use]
    pub fn parent_symbol(mut self, parent: impl Into<String>) -> Self {
        self.parent_symbol = Some(parent.into());
        self
    }

    /// Builder: set the primary identifier
    #[must_use]
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Builder: set the docstring
    #[must_use]
    pub fn docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = Some(docstring.into());
        self
    }

    /// Compute the boundary-derived identity for a chunk
    #[must_use]
    pub fn identity(path: &str, start_line: usize, end_line: usize) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!("{path}:{start_line}:{end_line}"));
        hex::encode(hasher.finalize())
    }

    /// Compute the content digest for a chunk
    #[must_use]
    pub fn content_digest(path: &str, start_line: usize, end_line: usize, content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!("{path}:{start_line}:{end_line}:"));
        hasher.update(content);
        hex::encode(hasher.finalize())
    }

    /// Number of lines spanned by this chunk
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }

    /// Whether the chunk is a definition the symbol table should index
    #[must_use]
    pub const fn is_definition(&self) -> bool {
        self.kind.is_definition()
    }
}

/// Syntactic kind tag for a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkKind {
    /// Standalone function definition
    Function,
    /// Method inside a class
    Method,
    /// Class definition
    Class,
    /// Module / file root produced by structural parsing
    Module,
    /// Heuristically delimited block
    TextBlock,
    /// Whole-file chunk for unrecognized content
    File,
}

impl ChunkKind {
    /// Whether this kind defines a symbol
    #[must_use]
    pub const fn is_definition(self) -> bool {
        matches!(self, Self::Function | Self::Method | Self::Class)
    }

    /// Human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Method => "method",
            Self::Class => "class",
            Self::Module => "module",
            Self::TextBlock => "text_block",
            Self::File => "file",
        }
    }
}
