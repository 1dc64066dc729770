use docsum_common::{DocsumError, Result};
use tracing::{debug, warn};

/// Default separator: blank line between paragraphs
pub const DEFAULT_SEPARATOR: &str = "\n\n";

/// Default maximum chunk length in characters
pub const DEFAULT_CHUNK_SIZE: usize = 4000;

/// Text chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Chunk text
    pub text: String,

    /// Start byte index in original text
    pub start: usize,

    /// End byte index in original text
    pub end: usize,
}

impl TextChunk {
    fn from_range(source: &str, start: usize, end: usize) -> Self {
        Self {
            text: source[start..end].to_string(),
            start,
            end,
        }
    }
}

/// Splitter settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitterConfig {
    /// Cut points; the separator stays at the end of the preceding piece.
    /// Empty means cut between every character.
    pub separator: String,

    /// Maximum chunk length in characters
    pub chunk_size: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SplitterConfig {
    pub fn new(separator: impl Into<String>, chunk_size: usize) -> Self {
        Self {
            separator: separator.into(),
            chunk_size,
        }
    }

    /// Validate splitter settings
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(DocsumError::config("Chunk size cannot be 0"));
        }
        Ok(())
    }
}

/// Split text into ordered, non-overlapping chunks
///
/// Pieces cut at the separator are packed greedily until adding the next one
/// would exceed `chunk_size` characters. A piece that is longer than
/// `chunk_size` on its own becomes a single oversized chunk. Concatenating
/// the chunk texts gives back `text` unchanged.
pub fn split_text(text: &str, config: &SplitterConfig) -> Vec<TextChunk> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut end = 0;
    let mut chunk_chars = 0;

    for piece in pieces(text, &config.separator) {
        let piece_chars = piece.chars().count();

        if chunk_chars > 0 && chunk_chars + piece_chars > config.chunk_size {
            push_chunk(&mut chunks, text, start, end, chunk_chars, config.chunk_size);
            start = end;
            chunk_chars = 0;
        }

        end += piece.len();
        chunk_chars += piece_chars;
    }

    if end > start {
        push_chunk(&mut chunks, text, start, end, chunk_chars, config.chunk_size);
    }

    debug!(
        "Split {} bytes into {} chunks (chunk_size={})",
        text.len(),
        chunks.len(),
        config.chunk_size
    );

    chunks
}

fn pieces<'a>(text: &'a str, separator: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
    if separator.is_empty() {
        Box::new(text.split_inclusive(|_: char| true))
    } else {
        Box::new(text.split_inclusive(separator))
    }
}

fn push_chunk(
    chunks: &mut Vec<TextChunk>,
    text: &str,
    start: usize,
    end: usize,
    chunk_chars: usize,
    chunk_size: usize,
) {
    if chunk_chars > chunk_size {
        warn!(
            "Created a chunk of size {}, which is longer than the specified {}",
            chunk_chars, chunk_size
        );
    }
    chunks.push(TextChunk::from_range(text, start, end));
}
