use async_trait::async_trait;
use docsum_common::Result;

use crate::types::GenerateRequest;

/// Common trait for LLM clients
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &'static str;

    /// Generate text from a prompt
    ///
    /// Failures of the remote service are reported as
    /// `DocsumError::RemoteService`.
    async fn generate(&self, request: GenerateRequest) -> Result<String>;
}
