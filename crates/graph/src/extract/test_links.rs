use crate::extract::file_id;
use crate::types::{DependencyEdge, EdgeKind, GraphEdge};
use repograph_chunker::Chunk;
use std::collections::BTreeSet;

/// Extensions a test's subject file may carry
const SOURCE_EXTENSIONS: &[&str] = &[".py", ".js", ".ts", ".tsx", ".jsx"];

/// Link test files to the files they exercise.
///
/// A file whose stem matches one of the fixed naming conventions (`test_*`,
/// `*_test`, `*.test`, `*.spec`) is linked to a same-stem file in its own
/// directory when that file is also present in the chunk set. Confidence 0.9.
pub(crate) fn extract(chunks: &[Chunk]) -> Vec<DependencyEdge> {
    let files: BTreeSet<&str> = chunks.iter().map(|c| c.path.as_str()).collect();

    let mut edges = Vec::new();
    for test_file in &files {
        let Some(subject) = resolve_test_subject(test_file, &files) else {
            continue;
        };

        edges.push(DependencyEdge::new(
            file_id(test_file),
            file_id(&subject),
            GraphEdge::new(EdgeKind::TestOf, 0.9),
        ));
    }

    edges
}

/// Strip the test-indicating prefix/suffix from the stem and look for the
/// resulting file next to the test, over the fixed extension set.
fn resolve_test_subject(test_file: &str, files: &BTreeSet<&str>) -> Option<String> {
    let (dir, file_name) = match test_file.rsplit_once('/') {
        Some((dir, name)) => (Some(dir), name),
        None => (None, test_file),
    };
    let stem = file_name.rsplit_once('.').map_or(file_name, |(s, _)| s);

    let subject_stem = if let Some(rest) = stem.strip_prefix("test_") {
        rest
    } else if let Some(rest) = stem.strip_suffix("_test") {
        rest
    } else if let Some(rest) = stem.strip_suffix(".test") {
        rest
    } else if let Some(rest) = stem.strip_suffix(".spec") {
        rest
    } else {
        return None;
    };

    if subject_stem.is_empty() {
        return None;
    }

    for ext in SOURCE_EXTENSIONS {
        let candidate = match dir {
            Some(dir) => format!("{dir}/{subject_stem}{ext}"),
            None => format!("{subject_stem}{ext}"),
        };

        if files.contains(candidate.as_str()) {
            return Some(candidate);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use repograph_chunker::ChunkKind;

    fn chunk(path: &str) -> Chunk {
        Chunk::new(path, 1, 5, ChunkKind::Function, "def t(): pass")
    }

    #[test]
    fn test_prefix_links_to_subject() {
        let chunks = vec![chunk("svc.py"), chunk("test_svc.py")];
        let edges = extract(&chunks);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source, "file:test_svc.py");
        assert_eq!(edges[0].target, "file:svc.py");
        assert_eq!(edges[0].edge.kind, EdgeKind::TestOf);
        assert!((edges[0].edge.confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_subject_produces_no_edge() {
        let chunks = vec![chunk("test_svc.py")];
        assert!(extract(&chunks).is_empty());
    }

    #[test]
    fn spec_suffix_links_within_directory() {
        let chunks = vec![chunk("src/widget.ts"), chunk("src/widget.spec.ts")];
        let edges = extract(&chunks);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source, "file:src/widget.spec.ts");
        assert_eq!(edges[0].target, "file:src/widget.ts");
    }

    #[test]
    fn underscore_test_suffix_links() {
        let chunks = vec![chunk("pkg/parser.py"), chunk("pkg/parser_test.py")];
        let edges = extract(&chunks);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].target, "file:pkg/parser.py");
    }

    #[test]
    fn subject_in_other_directory_is_not_linked() {
        let chunks = vec![chunk("src/svc.py"), chunk("tests/test_svc.py")];
        assert!(extract(&chunks).is_empty());
    }

    #[test]
    fn non_test_files_are_ignored() {
        let chunks = vec![chunk("alpha.py"), chunk("beta.py")];
        assert!(extract(&chunks).is_empty());
    }
}
