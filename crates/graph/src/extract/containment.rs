use crate::extract::file_id;
use crate::symbols::SymbolTable;
use crate::types::{DependencyEdge, EdgeKind, GraphEdge};
use repograph_chunker::Chunk;

/// Structural containment: every file holds its chunks (`Contains`,
/// confidence 1.0), and a chunk whose `parent_symbol` resolves to a
/// different chunk is nested in it (`DefinedIn`, confidence 1.0).
pub(crate) fn extract(chunks: &[Chunk], symbols: &SymbolTable) -> Vec<DependencyEdge> {
    let mut edges = Vec::new();

    for chunk in chunks {
        edges.push(DependencyEdge::new(
            file_id(&chunk.path),
            &chunk.id,
            GraphEdge::new(EdgeKind::Contains, 1.0),
        ));

        if let Some(parent) = &chunk.parent_symbol {
            if let Some(parent_id) = symbols.resolve(parent) {
                if parent_id != chunk.id {
                    edges.push(DependencyEdge::new(
                        parent_id,
                        &chunk.id,
                        GraphEdge::new(EdgeKind::DefinedIn, 1.0),
                    ));
                }
            }
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use repograph_chunker::ChunkKind;

    #[test]
    fn every_chunk_gets_exactly_one_contains_edge() {
        let chunks = vec![
            Chunk::new("m.py", 1, 4, ChunkKind::Function, "def a(): pass"),
            Chunk::new("m.py", 6, 9, ChunkKind::Function, "def b(): pass"),
        ];
        let symbols = SymbolTable::build(&chunks);
        let edges = extract(&chunks, &symbols);

        let contains: Vec<_> = edges
            .iter()
            .filter(|e| e.edge.kind == EdgeKind::Contains)
            .collect();
        assert_eq!(contains.len(), 2);
        assert!(contains.iter().all(|e| e.source == "file:m.py"));
        assert!(contains.iter().all(|e| (e.edge.confidence - 1.0).abs() < f64::EPSILON));
    }

    #[test]
    fn nested_definition_gets_defined_in_edge() {
        let class_chunk = Chunk::new("s.py", 1, 10, ChunkKind::Class, "class Service:\n    ...")
            .symbol("Service");
        let method_chunk = Chunk::new("s.py", 3, 6, ChunkKind::Method, "def run(self): pass")
            .symbol("run")
            .parent_symbol("Service");

        let chunks = vec![class_chunk.clone(), method_chunk.clone()];
        let symbols = SymbolTable::build(&chunks);
        let edges = extract(&chunks, &symbols);

        let defined_in: Vec<_> = edges
            .iter()
            .filter(|e| e.edge.kind == EdgeKind::DefinedIn)
            .collect();
        assert_eq!(defined_in.len(), 1);
        assert_eq!(defined_in[0].source, class_chunk.id);
        assert_eq!(defined_in[0].target, method_chunk.id);
    }

    #[test]
    fn self_referential_parent_is_skipped() {
        // A definition whose parent symbol resolves to itself must not loop.
        let chunk = Chunk::new("s.py", 1, 4, ChunkKind::Function, "def run(): pass")
            .symbol("run")
            .parent_symbol("run");
        let chunks = vec![chunk];
        let symbols = SymbolTable::build(&chunks);
        let edges = extract(&chunks, &symbols);

        assert!(edges.iter().all(|e| e.edge.kind != EdgeKind::DefinedIn));
    }
}
