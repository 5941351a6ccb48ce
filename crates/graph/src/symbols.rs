use once_cell::sync::Lazy;
use regex::Regex;
use repograph_chunker::Chunk;
use std::collections::HashMap;

/// Regexes for recovering a definition's primary identifier from raw chunk
/// text when the structural parser did not record one.
static DEFINITION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"def\s+(\w+)\s*\(",      // Python functions
        r"class\s+(\w+)\s*[:(]",  // Python classes
        r"function\s+(\w+)\s*\(", // JavaScript functions
        r"class\s+(\w+)\s*\{",    // JavaScript classes
        r"fn\s+(\w+)\s*[(<]",     // Rust functions
    ]
    .iter()
    .map(|p| Regex::new(p).expect("definition pattern"))
    .collect()
});

/// Mapping from symbol name (and `parent.name` qualified form) to the id of
/// the chunk that defines it.
///
/// Unqualified names can collide across files; the last registration wins.
/// That is a documented precision limitation, kept deterministic by building
/// from chunks sorted by `(path, start_line)`.
pub struct SymbolTable {
    map: HashMap<String, String>,
}

impl SymbolTable {
    /// Build the table from the full chunk set of a repository
    #[must_use]
    pub fn build(chunks: &[Chunk]) -> Self {
        let mut ordered: Vec<&Chunk> = chunks.iter().filter(|c| c.is_definition()).collect();
        ordered.sort_by(|a, b| {
            (&a.path, a.start_line, a.end_line).cmp(&(&b.path, b.start_line, b.end_line))
        });

        let mut map = HashMap::new();
        for chunk in ordered {
            let Some(name) = chunk
                .symbol
                .clone()
                .or_else(|| extract_symbol_name(&chunk.content))
            else {
                continue;
            };

            map.insert(name.clone(), chunk.id.clone());

            if let Some(parent) = &chunk.parent_symbol {
                map.insert(format!("{parent}.{name}"), chunk.id.clone());
            }
        }

        Self { map }
    }

    /// Look up the chunk id defining `name`
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// First definition pattern that matches wins
fn extract_symbol_name(content: &str) -> Option<String> {
    DEFINITION_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(content))
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use repograph_chunker::ChunkKind;

    fn def_chunk(path: &str, start: usize, content: &str) -> Chunk {
        Chunk::new(path, start, start + 3, ChunkKind::Function, content)
    }

    #[test]
    fn registers_function_names() {
        let chunks = vec![def_chunk("a.py", 1, "def alpha():\n    pass")];
        let table = SymbolTable::build(&chunks);

        assert_eq!(table.resolve("alpha"), Some(chunks[0].id.as_str()));
    }

    #[test]
    fn prefers_parser_recorded_symbol() {
        let mut chunk = def_chunk("a.py", 1, "def textual_name():\n    pass");
        chunk.symbol = Some("recorded".to_string());
        let chunks = vec![chunk];
        let table = SymbolTable::build(&chunks);

        assert_eq!(table.resolve("recorded"), Some(chunks[0].id.as_str()));
        assert_eq!(table.resolve("textual_name"), None);
    }

    #[test]
    fn registers_qualified_name_for_nested_definitions() {
        let mut method = def_chunk("svc.py", 10, "def run(self):\n    pass");
        method.kind = ChunkKind::Method;
        method.parent_symbol = Some("Service".to_string());
        let chunks = vec![method];
        let table = SymbolTable::build(&chunks);

        assert_eq!(table.resolve("run"), Some(chunks[0].id.as_str()));
        assert_eq!(table.resolve("Service.run"), Some(chunks[0].id.as_str()));
    }

    #[test]
    fn collisions_are_last_writer_wins_in_path_order() {
        let first = def_chunk("a.py", 1, "def run():\n    pass");
        let second = def_chunk("z.py", 1, "def run():\n    pass");
        // Input order should not matter; path order decides.
        let table = SymbolTable::build(&[second.clone(), first.clone()]);

        assert_eq!(table.resolve("run"), Some(second.id.as_str()));
    }

    #[test]
    fn non_definition_chunks_are_ignored() {
        let mut chunk = def_chunk("a.py", 1, "def ghost():\n    pass");
        chunk.kind = ChunkKind::TextBlock;
        let table = SymbolTable::build(&[chunk]);

        assert!(table.is_empty());
    }

    #[test]
    fn textual_extraction_covers_class_and_fn() {
        assert_eq!(
            extract_symbol_name("class Widget:\n    pass").as_deref(),
            Some("Widget")
        );
        assert_eq!(
            extract_symbol_name("class Widget {\n}").as_deref(),
            Some("Widget")
        );
        assert_eq!(
            extract_symbol_name("fn widget() -> u8 { 0 }").as_deref(),
            Some("widget")
        );
        assert_eq!(extract_symbol_name("plain text"), None);
    }
}
