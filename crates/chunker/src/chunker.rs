use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::heuristic;
use crate::language::Language;
use crate::types::{Chunk, ChunkKind};
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Splits a source file into an ordered sequence of chunks.
///
/// Structural (tree-sitter) parsing is used when a grammar is registered for
/// the file's extension; anything else, including parser failures, degrades
/// to line-heuristic chunking. The public surface never returns an error:
/// unreadable files simply yield no chunks.
pub struct SyntaxChunker {
    config: ChunkerConfig,
}

impl SyntaxChunker {
    /// Create a new chunker with configuration
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate().map_err(ChunkerError::InvalidConfig)?;
        Ok(Self { config })
    }

    /// Chunk a file on disk. IO trouble is logged and yields no chunks.
    pub fn chunk_file(&self, path: impl AsRef<Path>) -> Vec<Chunk> {
        let path = path.as_ref();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Failed to read {}: {e}", path.display());
                return Vec::new();
            }
        };

        let content = String::from_utf8_lossy(&bytes);
        self.chunk_source(&content, &path.to_string_lossy())
    }

    /// Chunk in-memory source attributed to `path`
    pub fn chunk_source(&self, content: &str, path: &str) -> Vec<Chunk> {
        if content.trim().is_empty() {
            return Vec::new();
        }

        let language = Language::from_path(path);
        let mut chunks = Vec::new();

        for (line_offset, window) in self.windows(content) {
            chunks.extend(self.chunk_window(window, path, language, line_offset));
        }

        chunks
    }

    /// Pre-split oversized content into fixed-line windows, carrying line
    /// offsets through so chunk line numbers stay file-global.
    fn windows<'a>(&self, content: &'a str) -> Vec<(usize, std::borrow::Cow<'a, str>)> {
        if content.len() <= self.config.max_file_bytes {
            return vec![(0, std::borrow::Cow::Borrowed(content))];
        }

        let lines: Vec<&str> = content.lines().collect();
        lines
            .chunks(self.config.window_lines)
            .enumerate()
            .map(|(i, window)| {
                (
                    i * self.config.window_lines,
                    std::borrow::Cow::Owned(window.join("\n")),
                )
            })
            .collect()
    }

    fn chunk_window(
        &self,
        window: impl AsRef<str>,
        path: &str,
        language: Language,
        line_offset: usize,
    ) -> Vec<Chunk> {
        let window = window.as_ref();

        if language.supports_structural_parsing() {
            match self.structural_chunks(window, path, language, line_offset) {
                Ok(chunks) => return chunks,
                Err(e) => {
                    log::warn!("Structural parse failed for {path}, falling back: {e}");
                }
            }
        }

        heuristic::chunk_lines(path, window, line_offset)
    }

    fn structural_chunks(
        &self,
        content: &str,
        path: &str,
        language: Language,
        line_offset: usize,
    ) -> Result<Vec<Chunk>> {
        let grammar = language.tree_sitter_language()?;
        let mut parser = Parser::new();
        parser
            .set_language(&grammar)
            .map_err(|e| ChunkerError::tree_sitter(format!("failed to set language: {e}")))?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| ChunkerError::parse("parser produced no tree"))?;

        let mut chunks = Vec::new();
        self.visit(tree.root_node(), content, path, line_offset, None, &mut chunks);

        // No definitions found: the whole window becomes one module chunk.
        if chunks.is_empty() {
            chunks.push(Chunk::new(
                path,
                1 + line_offset,
                content.lines().count().max(1) + line_offset,
                ChunkKind::Module,
                content,
            ));
        }

        Ok(chunks)
    }

    fn visit(
        &self,
        node: Node,
        content: &str,
        path: &str,
        line_offset: usize,
        enclosing: Option<&EnclosingDef>,
        chunks: &mut Vec<Chunk>,
    ) {
        let mut next_enclosing = enclosing.cloned();

        if let Some(kind) = definition_kind(node.kind(), enclosing) {
            let name = node_name(node, content);
            let mut chunk = Chunk::new(
                path,
                node.start_position().row + 1 + line_offset,
                node.end_position().row + 1 + line_offset,
                kind,
                content.get(node.start_byte()..node.end_byte()).unwrap_or(""),
            );

            if let Some(parent) = enclosing {
                chunk.parent_symbol = Some(parent.name.clone());
            }
            chunk.symbol = name.clone();
            chunk.docstring = self.docstring_of(node, content);
            chunks.push(chunk);

            if let Some(name) = name {
                next_enclosing = Some(EnclosingDef { name, kind });
            }
        } else if node.kind() == "impl_item" {
            // Methods inside an impl block belong to the implemented type.
            if let Some(target) = node
                .child_by_field_name("type")
                .and_then(|n| content.get(n.start_byte()..n.end_byte()))
            {
                next_enclosing = Some(EnclosingDef {
                    name: target.to_string(),
                    kind: ChunkKind::Class,
                });
            }
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(
                child,
                content,
                path,
                line_offset,
                next_enclosing.as_ref(),
                chunks,
            );
        }
    }

    /// First adjacent string/comment node longer than the configured
    /// minimum, quotes stripped. For block-bodied definitions the block's
    /// leading expression is also considered (covers Python docstrings).
    fn docstring_of(&self, node: Node, content: &str) -> Option<String> {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if let Some(doc) = self.doc_text(child, content) {
                return Some(doc);
            }

            if matches!(child.kind(), "block" | "statement_block" | "body") {
                if let Some(first) = child.named_child(0) {
                    let candidate = if first.kind() == "expression_statement" {
                        first.named_child(0).unwrap_or(first)
                    } else {
                        first
                    };
                    if let Some(doc) = self.doc_text(candidate, content) {
                        return Some(doc);
                    }
                }
            }
        }
        None
    }

    fn doc_text(&self, node: Node, content: &str) -> Option<String> {
        if !matches!(node.kind(), "string" | "string_literal" | "comment") {
            return None;
        }

        let raw = content.get(node.start_byte()..node.end_byte())?;
        let cleaned = raw.trim_matches(|c| c == '"' || c == '\'' || c == '`').trim();
        if cleaned.len() > self.config.min_docstring_len {
            Some(cleaned.to_string())
        } else {
            None
        }
    }
}

impl Default for SyntaxChunker {
    fn default() -> Self {
        Self {
            config: ChunkerConfig::default(),
        }
    }
}

#[derive(Clone)]
struct EnclosingDef {
    name: String,
    kind: ChunkKind,
}

/// Map a tree-sitter node kind to a chunk kind, or `None` for nodes that do
/// not open a chunk. Function definitions nested in a class-like scope are
/// tagged as methods.
fn definition_kind(node_kind: &str, enclosing: Option<&EnclosingDef>) -> Option<ChunkKind> {
    let inside_class = enclosing.is_some_and(|e| e.kind == ChunkKind::Class);

    match node_kind {
        "function_definition" | "function_declaration" | "generator_function_declaration"
        | "function_item" => {
            if inside_class {
                Some(ChunkKind::Method)
            } else {
                Some(ChunkKind::Function)
            }
        }
        "method_definition" | "method_declaration" => Some(ChunkKind::Method),
        "class_definition" | "class_declaration" => Some(ChunkKind::Class),
        "struct_item" | "enum_item" | "trait_item" => Some(ChunkKind::Class),
        _ => None,
    }
}

/// The identifier text for a definition node. Tries the grammar's `name`
/// field first, then falls back to the first name-typed child.
fn node_name(node: Node, content: &str) -> Option<String> {
    if let Some(name_node) = node.child_by_field_name("name") {
        return content
            .get(name_node.start_byte()..name_node.end_byte())
            .map(str::to_string);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if matches!(
            child.kind(),
            "identifier" | "property_identifier" | "type_identifier" | "name"
        ) {
            return content
                .get(child.start_byte()..child.end_byte())
                .map(str::to_string);
        }
    }

    None
}
