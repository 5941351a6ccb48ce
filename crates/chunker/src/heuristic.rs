use crate::language::DEFINITION_KEYWORDS;
use crate::types::{Chunk, ChunkKind};

/// Line-oriented fallback chunking for files without a structural parser.
///
/// A line beginning with a definition keyword closes the accumulating chunk
/// and opens a new one. Files with no recognized definitions collapse into a
/// single whole-file chunk.
pub(crate) fn chunk_lines(path: &str, content: &str, line_offset: usize) -> Vec<Chunk> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() || content.trim().is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut start = 1usize;
    let mut buffer: Vec<&str> = Vec::new();
    let mut kind = ChunkKind::TextBlock;
    let mut symbol: Option<String> = None;
    let mut matched_any = false;

    for (i, raw_line) in lines.iter().enumerate() {
        let line = raw_line.trim_start();
        match match_definition_keyword(line) {
            Some((keyword, function_like)) => {
                matched_any = true;
                flush(
                    &mut chunks,
                    path,
                    start + line_offset,
                    i + line_offset,
                    kind,
                    &buffer,
                    symbol.take(),
                );

                start = i + 1;
                buffer = vec![raw_line];
                kind = if function_like {
                    ChunkKind::Function
                } else {
                    ChunkKind::TextBlock
                };
                symbol = identifier_after(line, keyword);
            }
            None => buffer.push(raw_line),
        }
    }

    // No definition keyword anywhere: the whole content is one file chunk.
    if !matched_any {
        return vec![Chunk::new(
            path,
            1 + line_offset,
            lines.len() + line_offset,
            ChunkKind::File,
            content,
        )];
    }

    flush(
        &mut chunks,
        path,
        start + line_offset,
        lines.len() + line_offset,
        kind,
        &buffer,
        symbol,
    );

    chunks
}

fn flush(
    chunks: &mut Vec<Chunk>,
    path: &str,
    start_line: usize,
    end_line: usize,
    kind: ChunkKind,
    buffer: &[&str],
    symbol: Option<String>,
) {
    if buffer.is_empty() || end_line < start_line {
        return;
    }

    let content = buffer.join("\n");
    if content.trim().is_empty() {
        return;
    }

    let mut chunk = Chunk::new(path, start_line, end_line, kind, content);
    chunk.symbol = symbol;
    chunks.push(chunk);
}

fn match_definition_keyword(line: &str) -> Option<(&'static str, bool)> {
    DEFINITION_KEYWORDS
        .iter()
        .find(|(keyword, _)| line.starts_with(keyword))
        .copied()
}

/// The identifier token that follows a definition keyword, stripped of
/// trailing punctuation (`(`, `:`, `{`, `=`, generics).
fn identifier_after(line: &str, keyword: &str) -> Option<String> {
    let rest = line.strip_prefix(keyword)?.trim_start();
    let name: String = rest
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_on_definition_keywords() {
        let source = "import os\n\ndef alpha():\n    return 1\n\ndef beta():\n    return 2\n";
        let chunks = chunk_lines("script.py", source, 0);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].kind, ChunkKind::TextBlock);
        assert_eq!(chunks[1].kind, ChunkKind::Function);
        assert_eq!(chunks[1].symbol.as_deref(), Some("alpha"));
        assert_eq!(chunks[2].symbol.as_deref(), Some("beta"));
    }

    #[test]
    fn unrecognized_content_collapses_to_file_chunk() {
        let source = "just some\nplain text\nwith no definitions\n";
        let chunks = chunk_lines("notes.txt", source, 0);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].kind, ChunkKind::File);
        assert_eq!(chunks[0].start_line, 1);
        assert_eq!(chunks[0].end_line, 3);
    }

    #[test]
    fn empty_content_yields_no_chunks() {
        assert!(chunk_lines("empty.py", "", 0).is_empty());
        assert!(chunk_lines("blank.py", "   \n  \n", 0).is_empty());
    }

    #[test]
    fn rust_fn_keyword_is_function_like() {
        let source = "fn main() {\n    println!(\"hi\");\n}\n";
        let chunks = chunk_lines("main.rs", source, 0);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].kind, ChunkKind::Function);
        assert_eq!(chunks[0].symbol.as_deref(), Some("main"));
    }

    #[test]
    fn line_offset_keeps_numbers_file_global() {
        let source = "def late():\n    pass\n";
        let chunks = chunk_lines("big.py", source, 500);

        assert_eq!(chunks[0].start_line, 501);
        assert_eq!(chunks[0].end_line, 502);
    }

    #[test]
    fn const_opens_text_block() {
        let source = "const VALUE = 1;\nlet other = 2;\n";
        let chunks = chunk_lines("vals.js", source, 0);

        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.kind == ChunkKind::TextBlock));
        assert_eq!(chunks[0].symbol.as_deref(), Some("VALUE"));
    }
}
