//! docsum LLM integration
//!
//! Text splitting, document wrapping, the Anthropic client and summarization

mod client;
mod document;
mod llm_trait;
mod pipeline;
mod prompts;
mod splitter;
mod summarize;
mod types;

pub use client::{AnthropicClient, ANTHROPIC_VERSION};
pub use document::{wrap_chunks, Document};
pub use llm_trait::LlmClient;
pub use pipeline::summarize_text;
pub use prompts::{combine_prompt, refine_prompt, summary_prompt};
pub use splitter::{split_text, SplitterConfig, TextChunk, DEFAULT_CHUNK_SIZE, DEFAULT_SEPARATOR};
pub use summarize::{stuff_documents, Summarizer};
pub use types::{
    ApiError, ApiErrorResponse, ContentBlock, GenerateRequest, GenerationSettings, Message,
    MessagesRequest, MessagesResponse, Summary, SummaryStrategy,
};
