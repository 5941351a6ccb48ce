//! Whole-pipeline scenario: chunk a two-file repository, assemble the
//! dependency graph, and check the resulting nodes, edges and centrality.

use pretty_assertions::assert_eq;
use repograph_chunker::{ChunkKind, SyntaxChunker};
use repograph_graph::{compute_centrality, Direction, EdgeKind, GraphAssembler, NodePayload};
use std::fs;

#[test]
fn two_file_repository_produces_expected_graph() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("main.py"),
        "def main():\n    helper()\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("util.py"),
        "def helper():\n    return 1\n",
    )
    .unwrap();

    let chunker = SyntaxChunker::default();
    let mut chunks = chunker.chunk_source("def main():\n    helper()\n", "main.py");
    chunks.extend(chunker.chunk_source("def helper():\n    return 1\n", "util.py"));

    assert_eq!(chunks.len(), 2);
    assert!(chunks.iter().all(|c| c.kind == ChunkKind::Function));

    let mut assembler = GraphAssembler::new();
    let graph = assembler.build(&chunks, temp.path());

    // 2 file nodes + 2 chunk nodes.
    let file_nodes = graph
        .nodes()
        .filter(|n| matches!(n.payload, NodePayload::File { .. }))
        .count();
    let chunk_nodes = graph
        .nodes()
        .filter(|n| matches!(n.payload, NodePayload::Chunk { .. }))
        .count();
    assert_eq!(file_nodes, 2);
    assert_eq!(chunk_nodes, 2);

    // Exactly one contains edge per chunk, confidence 1.0.
    let contains: Vec<_> = graph
        .edges()
        .filter(|(_, e, _)| e.kind == EdgeKind::Contains)
        .collect();
    assert_eq!(contains.len(), 2);
    assert!(contains
        .iter()
        .all(|(_, e, _)| (e.confidence - 1.0).abs() < f64::EPSILON));

    // One call edge from main's chunk to helper's chunk, confidence 0.8.
    let main_chunk = chunks.iter().find(|c| c.path == "main.py").unwrap();
    let helper_chunk = chunks.iter().find(|c| c.path == "util.py").unwrap();

    let calls: Vec<_> = graph
        .edges()
        .filter(|(_, e, _)| e.kind == EdgeKind::Call)
        .collect();
    assert_eq!(calls.len(), 1);
    let (source, edge, target) = calls[0];
    assert_eq!(source, main_chunk.id);
    assert_eq!(target, helper_chunk.id);
    assert!((edge.confidence - 0.8).abs() < f64::EPSILON);

    // Centrality over the call subgraph.
    let metrics = compute_centrality(graph);
    assert_eq!(metrics.len(), 2);
    assert_eq!(metrics[&helper_chunk.id].in_degree, 1);
    assert_eq!(metrics[&helper_chunk.id].out_degree, 0);
    assert_eq!(metrics[&main_chunk.id].out_degree, 1);
    assert_eq!(metrics[&main_chunk.id].in_degree, 0);

    // File nodes take part in no call edge and are absent from the metrics.
    assert!(!metrics.contains_key("file:main.py"));

    // Dependency query from the file node walks containment then the call.
    let triples = graph.query_dependencies("file:main.py", Direction::Outgoing, 2);
    assert!(triples
        .iter()
        .any(|t| t.relationship == EdgeKind::Contains && t.target == main_chunk.id));
    assert!(triples
        .iter()
        .any(|t| t.relationship == EdgeKind::Call && t.target == helper_chunk.id));
}

#[test]
fn import_and_test_links_join_the_same_graph() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("svc.py"), "def serve():\n    pass\n").unwrap();
    fs::write(
        temp.path().join("test_svc.py"),
        "import svc\n\nsvc.serve()\n",
    )
    .unwrap();

    let chunker = SyntaxChunker::default();
    let mut chunks = chunker.chunk_source("def serve():\n    pass\n", "svc.py");
    chunks.extend(chunker.chunk_source("import svc\n\nsvc.serve()\n", "test_svc.py"));

    let mut assembler = GraphAssembler::new();
    let graph = assembler.build(&chunks, temp.path());

    // test_of edge from the test file node to the subject file node.
    let test_edges: Vec<_> = graph
        .edges()
        .filter(|(_, e, _)| e.kind == EdgeKind::TestOf)
        .collect();
    assert_eq!(test_edges.len(), 1);
    let (source, edge, target) = test_edges[0];
    assert_eq!(source, "file:test_svc.py");
    assert_eq!(target, "file:svc.py");
    assert!((edge.confidence - 0.9).abs() < f64::EPSILON);

    // import edge resolved to the sibling module.
    assert!(graph
        .edges()
        .any(|(_, e, t)| e.kind == EdgeKind::Import && t == "file:svc.py"));

    // The dotted call svc.serve() resolves via its trailing segment.
    assert!(graph
        .edges()
        .any(|(_, e, _)| e.kind == EdgeKind::Call && e.detail.as_deref() == Some("svc.serve")));

    // Import provenance is recorded per file.
    assert!(assembler.import_table()["test_svc.py"].contains(&"svc".to_string()));
}
