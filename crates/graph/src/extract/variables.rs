use crate::extract::variable_id;
use crate::types::{DependencyEdge, EdgeKind, GraphEdge};
use once_cell::sync::Lazy;
use regex::Regex;
use repograph_chunker::Chunk;
use std::collections::HashSet;

/// Simple assignment shapes. Reads are not detected from these patterns, so
/// `ReadsFrom` edges are never emitted despite existing in the model.
static ASSIGNMENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"(\w+)\s*=", r"(\w+)\s*\+=", r"(\w+)\s*-="]
        .iter()
        .map(|p| Regex::new(p).expect("assignment pattern"))
        .collect()
});

/// Detect variable writes from assignment-shaped patterns, excluding
/// constant-like (uppercase-initial) and single-character identifiers.
/// Each write becomes a `WritesTo` edge (confidence 0.7) to a variable node
/// keyed by `(name, file path)`.
pub(crate) fn extract(chunks: &[Chunk]) -> Vec<DependencyEdge> {
    let mut edges = Vec::new();

    for chunk in chunks {
        let mut seen = HashSet::new();

        for pattern in ASSIGNMENT_PATTERNS.iter() {
            for caps in pattern.captures_iter(&chunk.content) {
                let name = &caps[1];
                if name.len() <= 1 || name.starts_with(|c: char| c.is_uppercase()) {
                    continue;
                }

                if seen.insert(name.to_string()) {
                    edges.push(DependencyEdge::new(
                        &chunk.id,
                        variable_id(name, &chunk.path),
                        GraphEdge::new(EdgeKind::WritesTo, 0.7),
                    ));
                }
            }
        }
    }

    edges
}
