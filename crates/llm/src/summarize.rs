use docsum_common::{DocsumError, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::document::Document;
use crate::llm_trait::LlmClient;
use crate::prompts::{combine_prompt, refine_prompt, summary_prompt};
use crate::types::{GenerateRequest, GenerationSettings, Summary, SummaryStrategy};

/// Summarizer over a remote generative-text client
pub struct Summarizer {
    client: Arc<dyn LlmClient>,
    settings: GenerationSettings,
}

impl Summarizer {
    /// Create new summarizer
    pub fn new(client: Arc<dyn LlmClient>, settings: GenerationSettings) -> Self {
        Self { client, settings }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Summarize documents with the given strategy
    ///
    /// An empty document list is rejected with `InvalidInput` before any
    /// request is sent. Remote failures are returned as they are.
    pub async fn summarize(&self, documents: &[Document], strategy: SummaryStrategy) -> Result<Summary> {
        if documents.is_empty() {
            return Err(DocsumError::invalid_input("No documents to summarize"));
        }

        info!(
            "Starting summarization - Strategy: {}, Documents: {}, Client: {}",
            strategy,
            documents.len(),
            self.client.name()
        );

        let text = match strategy {
            SummaryStrategy::Stuff => self.summarize_stuff(documents).await?,
            SummaryStrategy::MapReduce => self.summarize_map_reduce(documents).await?,
            SummaryStrategy::Refine => self.summarize_refine(documents).await?,
        };

        Ok(Summary::new(text, self.settings.model.clone(), strategy))
    }

    /// Everything in one prompt
    async fn summarize_stuff(&self, documents: &[Document]) -> Result<String> {
        let body = stuff_documents(documents);
        debug!("Stuffed prompt body - Length: {} chars", body.len());
        self.generate(summary_prompt(&body)).await
    }

    /// Summarize each document, then combine the partial summaries
    async fn summarize_map_reduce(&self, documents: &[Document]) -> Result<String> {
        let mut partials = Vec::with_capacity(documents.len());
        for (i, doc) in documents.iter().enumerate() {
            debug!("Summarizing document {}/{}", i + 1, documents.len());
            partials.push(self.generate(summary_prompt(&doc.content)).await?);
        }

        let combined = partials.join("\n\n");
        info!("Combined document summaries - Length: {} chars", combined.len());

        self.generate(combine_prompt(&combined)).await
    }

    /// Fold documents one by one into a running summary
    async fn summarize_refine(&self, documents: &[Document]) -> Result<String> {
        let (first, rest) = documents
            .split_first()
            .ok_or_else(|| DocsumError::invalid_input("No documents to summarize"))?;

        let mut running = self.generate(summary_prompt(&first.content)).await?;
        for (i, doc) in rest.iter().enumerate() {
            debug!("Refining with document {}/{}", i + 2, documents.len());
            running = self.generate(refine_prompt(&running, &doc.content)).await?;
        }

        Ok(running)
    }

    async fn generate(&self, prompt: String) -> Result<String> {
        let request = GenerateRequest {
            model: self.settings.model.clone(),
            prompt,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        self.client.generate(request).await
    }
}

/// Concatenate document contents in order
///
/// Chunks keep their delimiters, so no separator is inserted.
pub fn stuff_documents(documents: &[Document]) -> String {
    documents.iter().map(|d| d.content.as_str()).collect()
}
