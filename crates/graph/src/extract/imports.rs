use crate::extract::file_id;
use crate::types::{DependencyEdge, EdgeKind, GraphEdge};
use once_cell::sync::Lazy;
use regex::Regex;
use repograph_chunker::Chunk;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// `from X import Y`; both `X` and `X.Y` are tried as module paths
static FROM_IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"from\s+(\S+)\s+import\s+(\w+)").expect("from-import pattern"));

static IMPORT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"import\s+([^\s,]+)",                     // import module
        r#"import\s+.*?\s+from\s+['"]([^'"]+)['"]"#, // import ... from 'module'
        r#"import\s+['"]([^'"]+)['"]"#,            // import 'module'
        r#"require\(['"]([^'"]+)['"]\)"#,          // require('module')
    ]
    .iter()
    .map(|p| Regex::new(p).expect("import pattern"))
    .collect()
});

/// Extensions tried when resolving a module path to a file
const RESOLVE_EXTENSIONS: &[&str] = &[".py", ".js", ".ts", ".tsx", ".jsx"];

/// Import edges plus the per-file provenance list of every module reference
/// that was parsed, resolved or not.
pub(crate) struct ImportResolution {
    pub edges: Vec<DependencyEdge>,
    pub imports_by_file: HashMap<String, Vec<String>>,
}

/// Scan chunk text for import-like statements and resolve each referenced
/// module to a concrete file under the repository root. Resolved references
/// become `Import` edges (confidence 0.9); unresolved ones are recorded only
/// in the provenance table.
pub(crate) fn extract(chunks: &[Chunk], repo_root: &Path) -> ImportResolution {
    let mut edges = Vec::new();
    let mut imports_by_file: HashMap<String, Vec<String>> = HashMap::new();

    for chunk in chunks {
        let modules = parse_imports(&chunk.content);
        if modules.is_empty() {
            continue;
        }

        let per_file = imports_by_file.entry(chunk.path.clone()).or_default();
        for module in &modules {
            if !per_file.contains(module) {
                per_file.push(module.clone());
            }
        }

        for module in modules {
            if let Some(target) = resolve_import(&module, &chunk.path, repo_root) {
                edges.push(DependencyEdge::new(
                    &chunk.id,
                    file_id(&target),
                    GraphEdge::new(EdgeKind::Import, 0.9).detail(module),
                ));
            }
        }
    }

    ImportResolution {
        edges,
        imports_by_file,
    }
}

/// All module references in `content`, relative-path markers stripped,
/// de-duplicated in first-seen order
fn parse_imports(content: &str) -> Vec<String> {
    let mut raw = Vec::new();

    for caps in FROM_IMPORT.captures_iter(content) {
        raw.push(format!("{}.{}", &caps[1], &caps[2]));
        raw.push(caps[1].to_string());
    }

    for pattern in IMPORT_PATTERNS.iter() {
        for caps in pattern.captures_iter(content) {
            raw.push(caps[1].to_string());
        }
    }

    let mut seen = std::collections::HashSet::new();
    let mut cleaned = Vec::new();
    for module in raw {
        let module = module.replace("./", "").replace("../", "");
        if module.is_empty() || module.starts_with('.') {
            continue;
        }
        if seen.insert(module.clone()) {
            cleaned.push(module);
        }
    }

    cleaned
}

/// Try a fixed set of extension and `__init__` candidates relative to the
/// importing file's directory and to the repository root.
fn resolve_import(module: &str, importing_file: &str, repo_root: &Path) -> Option<String> {
    let base_dir = Path::new(importing_file)
        .parent()
        .unwrap_or_else(|| Path::new(""));
    let as_path = module.replace('.', "/");

    for ext in RESOLVE_EXTENSIONS {
        let candidates = [
            base_dir.join(format!("{module}{ext}")),
            base_dir.join(module).join(format!("__init__{ext}")),
            base_dir.join(format!("{as_path}{ext}")),
            base_dir.join(&as_path).join(format!("__init__{ext}")),
            PathBuf::from(format!("{as_path}{ext}")),
        ];

        for candidate in candidates {
            if repo_root.join(&candidate).is_file() {
                return Some(normalize(&candidate));
            }
        }
    }

    None
}

fn normalize(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
