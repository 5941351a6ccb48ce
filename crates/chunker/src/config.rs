use serde::{Deserialize, Serialize};

/// Configuration for chunk extraction behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Files larger than this many bytes are pre-split into line windows
    /// before parsing
    pub max_file_bytes: usize,

    /// Window size (in lines) used when pre-splitting oversized files
    pub window_lines: usize,

    /// Minimum length for a string/comment node to count as a docstring
    pub min_docstring_len: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 1_048_576, // 1 MiB
            window_lines: 500,
            min_docstring_len: 10,
        }
    }
}

impl ChunkerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_file_bytes == 0 {
            return Err("max_file_bytes must be > 0".to_string());
        }

        if self.window_lines == 0 {
            return Err("window_lines must be > 0".to_string());
        }

        Ok(())
    }
}
