use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::splitter::TextChunk;

/// Unit of text handed to the summarizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document text
    pub content: String,

    /// Free-form metadata
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}

impl Document {
    /// Create document with empty metadata
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl From<TextChunk> for Document {
    fn from(chunk: TextChunk) -> Self {
        Self::new(chunk.text)
    }
}

/// Wrap chunks into documents, one per chunk, keeping order
pub fn wrap_chunks(chunks: Vec<TextChunk>) -> Vec<Document> {
    chunks.into_iter().map(Document::from).collect()
}
