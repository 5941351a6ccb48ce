use crate::symbols::SymbolTable;
use crate::types::{DependencyEdge, EdgeKind, GraphEdge};
use once_cell::sync::Lazy;
use regex::Regex;
use repograph_chunker::Chunk;
use std::collections::HashSet;

/// `identifier(` and `identifier.identifier(` shaped patterns
static CALL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+(?:\.\w+)*)\s*\(").expect("call pattern"));

/// Keywords and builtins that look like calls but never are resolution
/// targets
static CALL_DENYLIST: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "if",
        "for",
        "while",
        "with",
        "try",
        "except",
        "print",
        "len",
        "str",
        "int",
        "float",
        "list",
        "dict",
        "set",
        "tuple",
        "range",
        "enumerate",
        "isinstance",
        "hasattr",
        "getattr",
        "setattr",
    ]
    .into_iter()
    .collect()
});

/// Scan chunk text for call-shaped patterns and resolve each candidate via
/// the symbol table: exact name first, then the trailing segment of a dotted
/// name, then the caller's `parent_symbol`-qualified form. First match wins,
/// no fuzzy retry. Self-references are dropped. Confidence 0.8.
pub(crate) fn extract(chunks: &[Chunk], symbols: &SymbolTable) -> Vec<DependencyEdge> {
    let mut edges = Vec::new();

    for chunk in chunks {
        let mut seen = HashSet::new();

        for call in extract_call_candidates(&chunk.content) {
            let Some(target) = resolve_call_target(&call, chunk, symbols) else {
                continue;
            };

            if target == chunk.id {
                continue;
            }

            if seen.insert(target.to_string()) {
                edges.push(DependencyEdge::new(
                    &chunk.id,
                    target,
                    GraphEdge::new(EdgeKind::Call, 0.8).detail(call),
                ));
            }
        }
    }

    edges
}

fn extract_call_candidates(content: &str) -> Vec<String> {
    CALL_PATTERN
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .filter(|candidate| {
            let trailing = candidate.rsplit('.').next().unwrap_or(candidate);
            trailing.len() > 1 && !CALL_DENYLIST.contains(trailing)
        })
        .collect()
}

fn resolve_call_target<'a>(
    call: &str,
    source: &Chunk,
    symbols: &'a SymbolTable,
) -> Option<&'a str> {
    if let Some(target) = symbols.resolve(call) {
        return Some(target);
    }

    if let Some(method) = call.rsplit('.').next() {
        if method != call {
            if let Some(target) = symbols.resolve(method) {
                return Some(target);
            }
        }
    }

    if let Some(parent) = &source.parent_symbol {
        if let Some(target) = symbols.resolve(&format!("{parent}.{call}")) {
            return Some(target);
        }
    }

    None
}
