use docsum_common::config::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use docsum_common::{AppConfig, DocsumError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Provider-neutral generate request
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Model name (e.g., "claude-3-opus-20240229")
    pub model: String,

    /// Prompt text
    pub prompt: String,

    /// Temperature (0.0 - 1.0)
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

/// Model settings the summarizer applies to every request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl From<&AppConfig> for GenerationSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            model: config.llm_model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// How documents are combined before reaching the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryStrategy {
    /// Put every document into a single prompt
    #[default]
    Stuff,
    /// Summarize each document, then summarize the summaries
    MapReduce,
    /// Summarize the first document and refine with each following one
    Refine,
}

impl SummaryStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stuff => "stuff",
            Self::MapReduce => "map-reduce",
            Self::Refine => "refine",
        }
    }
}

impl fmt::Display for SummaryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryStrategy {
    type Err = DocsumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "stuff" => Ok(Self::Stuff),
            "map-reduce" | "mapreduce" => Ok(Self::MapReduce),
            "refine" => Ok(Self::Refine),
            other => Err(DocsumError::invalid_input(format!(
                "Unknown summary strategy '{}' (expected stuff, map-reduce or refine)",
                other
            ))),
        }
    }
}

/// Summarization result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Generated summary text
    pub text: String,

    /// Model used
    pub model: String,

    /// Strategy used
    pub strategy: SummaryStrategy,
}

impl Summary {
    /// Create new summary
    pub fn new(text: String, model: String, strategy: SummaryStrategy) -> Self {
        Self {
            text,
            model,
            strategy,
        }
    }
}

/// Anthropic Messages API request
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub messages: Vec<Message>,
}

impl From<GenerateRequest> for MessagesRequest {
    fn from(request: GenerateRequest) -> Self {
        Self {
            model: request.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: vec![Message {
                role: "user".to_string(),
                content: request.prompt,
            }],
        }
    }
}

/// Single chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Anthropic Messages API response
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    /// Model name
    pub model: String,

    /// Content blocks
    pub content: Vec<ContentBlock>,

    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl MessagesResponse {
    /// Concatenated text of all text blocks
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect()
    }
}

/// Response content block
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Anthropic error envelope: `{"type": "error", "error": {...}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}
