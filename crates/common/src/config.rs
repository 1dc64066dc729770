use crate::error::DocsumError;
use std::fmt;

/// Environment variable holding the model service credential
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Default Anthropic API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Default summarization model
pub const DEFAULT_MODEL: &str = "claude-3-opus-20240229";

/// Default maximum tokens to generate
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// docsum application configuration
///
/// Built once at startup and handed to whoever needs it; nothing in the
/// library crates reads the environment on its own.
#[derive(Clone)]
pub struct AppConfig {
    /// Anthropic API key
    pub api_key: String,

    /// Anthropic API base URL
    pub base_url: String,

    /// LLM summarization model name
    pub llm_model: String,

    /// Sampling temperature (0.0 = minimum randomness)
    pub temperature: f32,

    /// Maximum tokens to generate per request
    pub max_tokens: u32,

    /// Log level
    pub log_level: String,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("llm_model", &self.llm_model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl AppConfig {
    /// Create configuration with defaults for everything but the credential
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            llm_model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            max_tokens: DEFAULT_MAX_TOKENS,
            log_level: "warn".to_string(),
        }
    }

    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, DocsumError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DocsumError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                DocsumError::config(format!("{} environment variable is not set", API_KEY_VAR))
            })?;

        let temperature = match lookup("LLM_TEMPERATURE") {
            Some(raw) => raw.trim().parse::<f32>().map_err(|e| {
                DocsumError::config(format!("Invalid LLM_TEMPERATURE '{}': {}", raw, e))
            })?,
            None => 0.0,
        };

        let config = Self {
            api_key,
            base_url: lookup("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            llm_model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature,
            max_tokens: DEFAULT_MAX_TOKENS,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DocsumError> {
        if self.api_key.trim().is_empty() {
            return Err(DocsumError::config("API key cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(DocsumError::config(
                "Anthropic base URL must start with http:// or https://",
            ));
        }

        if self.llm_model.is_empty() {
            return Err(DocsumError::config("LLM model name cannot be empty"));
        }

        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(DocsumError::config(format!(
                "Temperature must be between 0.0 and 1.0, got {}",
                self.temperature
            )));
        }

        if self.max_tokens == 0 {
            return Err(DocsumError::config("max_tokens cannot be 0"));
        }

        Ok(())
    }
}
