//! Nested definition handling across languages: parent symbols must point
//! at the nearest enclosing definition, and identities must survive
//! re-parsing.

use pretty_assertions::assert_eq;
use repograph_chunker::{ChunkKind, SyntaxChunker};

const NESTED_PYTHON: &str = r#"
class Outer:
    def top(self):
        return 1

    class Inner:
        def deep(self):
            return 2

def free():
    def local():
        return 3
    return local
"#;

#[test]
fn python_nesting_tracks_nearest_enclosing_definition() {
    let chunker = SyntaxChunker::default();
    let chunks = chunker.chunk_source(NESTED_PYTHON, "nested.py");

    let by_symbol = |name: &str| {
        chunks
            .iter()
            .find(|c| c.symbol.as_deref() == Some(name))
            .unwrap_or_else(|| panic!("missing chunk for {name}"))
    };

    assert_eq!(by_symbol("Outer").parent_symbol, None);
    assert_eq!(by_symbol("top").parent_symbol.as_deref(), Some("Outer"));
    assert_eq!(by_symbol("Inner").parent_symbol.as_deref(), Some("Outer"));
    assert_eq!(by_symbol("deep").parent_symbol.as_deref(), Some("Inner"));
    assert_eq!(by_symbol("free").parent_symbol, None);
    assert_eq!(by_symbol("local").parent_symbol.as_deref(), Some("free"));
}

#[test]
fn methods_are_tagged_method_inside_classes_only() {
    let chunker = SyntaxChunker::default();
    let chunks = chunker.chunk_source(NESTED_PYTHON, "nested.py");

    let kind_of = |name: &str| {
        chunks
            .iter()
            .find(|c| c.symbol.as_deref() == Some(name))
            .map(|c| c.kind)
            .unwrap()
    };

    assert_eq!(kind_of("top"), ChunkKind::Method);
    assert_eq!(kind_of("deep"), ChunkKind::Method);
    assert_eq!(kind_of("free"), ChunkKind::Function);
    // A function nested in a function is still a function.
    assert_eq!(kind_of("local"), ChunkKind::Function);
}

#[test]
fn reparse_yields_identical_ids_and_digests() {
    let chunker = SyntaxChunker::default();
    let first = chunker.chunk_source(NESTED_PYTHON, "nested.py");
    let second = chunker.chunk_source(NESTED_PYTHON, "nested.py");

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.digest, b.digest);
    }
}

#[test]
fn typescript_classes_and_functions_are_chunked() {
    let source = r#"
export class Store {
    get(key: string): string {
        return this.data[key];
    }
}

function connect(url: string): Store {
    return new Store();
}
"#;
    let chunker = SyntaxChunker::default();
    let chunks = chunker.chunk_source(source, "store.ts");

    assert!(chunks
        .iter()
        .any(|c| c.kind == ChunkKind::Class && c.symbol.as_deref() == Some("Store")));
    assert!(chunks
        .iter()
        .any(|c| c.kind == ChunkKind::Method && c.symbol.as_deref() == Some("get")));
    assert!(chunks
        .iter()
        .any(|c| c.kind == ChunkKind::Function && c.symbol.as_deref() == Some("connect")));
}
