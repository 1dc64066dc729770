/// docsum error types
#[derive(Debug, thiserror::Error)]
pub enum DocsumError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote model service error (auth, network, quota, malformed response)
    #[error("Remote service error: {0}")]
    RemoteService(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DocsumError {
    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create remote service error
    pub fn remote_service<S: Into<String>>(msg: S) -> Self {
        Self::RemoteService(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the error came from the remote model service
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteService(_))
    }
}
