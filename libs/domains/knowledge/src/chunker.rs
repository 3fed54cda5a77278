use core_config::{env_parsed_or_default, ConfigError, FromEnv};

use crate::error::{KnowledgeError, KnowledgeResult};

/// Chunking parameters: window width and overlap, both in characters.
///
/// Boundaries are character-offset based, not semantic; no word or sentence
/// awareness. That is a deliberate simplicity/robustness trade-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Maximum characters per chunk
    pub chunk_size: usize,

    /// Characters shared between consecutive chunks; must be < `chunk_size`
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 800,
            overlap: 120,
        }
    }
}

impl FromEnv for ChunkingConfig {
    /// Load from `CHUNK_SIZE` and `CHUNK_OVERLAP`, defaulting to 800/120
    fn from_env() -> Result<Self, ConfigError> {
        let chunk_size = env_parsed_or_default("CHUNK_SIZE", 800)?;
        let overlap = env_parsed_or_default("CHUNK_OVERLAP", 120)?;

        Ok(Self {
            chunk_size,
            overlap,
        })
    }
}

impl ChunkingConfig {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Reject invalid parameters before any chunking begins. An overlap at or
    /// above the chunk size would otherwise make the window advance by zero.
    pub fn validate(&self) -> KnowledgeResult<()> {
        if self.chunk_size == 0 {
            return Err(KnowledgeError::Config(
                "chunk_size must be positive".to_string(),
            ));
        }
        if self.overlap >= self.chunk_size {
            return Err(KnowledgeError::Config(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    /// Split text into an ordered, deterministic sequence of overlapping
    /// windows.
    ///
    /// Text no longer than `chunk_size` is returned as a single chunk.
    /// Otherwise a window of `chunk_size` characters slides forward by
    /// `chunk_size - overlap` per step; the last chunk may be shorter.
    /// Identical `(text, chunk_size, overlap)` always yields an identical
    /// sequence.
    pub fn split(&self, content: &str) -> KnowledgeResult<Vec<String>> {
        self.validate()?;

        let chars: Vec<char> = content.chars().collect();
        if chars.len() <= self.chunk_size {
            return Ok(vec![content.to_string()]);
        }

        let step = self.chunk_size - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            chunks.push(chars[start..end].iter().collect());

            if start + self.chunk_size >= chars.len() {
                break;
            }
            start += step;
        }

        Ok(chunks)
    }
}
