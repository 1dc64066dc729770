use docsum_common::Result;
use tracing::info;

use crate::document::wrap_chunks;
use crate::splitter::{split_text, SplitterConfig};
use crate::summarize::Summarizer;
use crate::types::{Summary, SummaryStrategy};

/// Split, wrap and summarize a text
pub async fn summarize_text(
    text: &str,
    splitter: &SplitterConfig,
    summarizer: &Summarizer,
    strategy: SummaryStrategy,
) -> Result<Summary> {
    splitter.validate()?;

    let chunks = split_text(text, splitter);
    info!("Split input into {} chunks", chunks.len());

    let documents = wrap_chunks(chunks);

    summarizer.summarize(&documents, strategy).await
}
