//! Relationship extractors.
//!
//! Each extractor is a pure function over `(chunks, symbol table, repo
//! root)` producing typed, confidence-scored edges. Extractors share no
//! mutable state and can run in any order; the assembler applies their
//! output to the graph.

pub(crate) mod calls;
pub(crate) mod containment;
pub(crate) mod imports;
pub(crate) mod test_links;
pub(crate) mod variables;

/// Node id for a file path
pub(crate) fn file_id(path: &str) -> String {
    format!("file:{path}")
}

/// Node id for a variable scoped to a file
pub(crate) fn variable_id(name: &str, path: &str) -> String {
    format!("var:{name}:{path}")
}
