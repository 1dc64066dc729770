//! Prompt templates for summarization

/// Prompt for summarizing a block of text
pub fn summary_prompt(text: &str) -> String {
    format!(
        "Write a concise summary of the following:\n\n\n\"{}\"\n\n\nCONCISE SUMMARY:",
        text
    )
}

/// Prompt for the reduce phase (combining partial summaries)
pub fn combine_prompt(summaries: &str) -> String {
    format!(
        "The following are summaries of consecutive parts of one text:\n\n\n\"{}\"\n\n\nCombine them into a single concise summary without repeating points.\n\nCONCISE SUMMARY:",
        summaries
    )
}

/// Prompt for folding a new piece of text into an existing summary
pub fn refine_prompt(existing_summary: &str, text: &str) -> String {
    format!(
        "Your job is to produce a final summary.\nWe have provided an existing summary up to a certain point: {}\nWe have the opportunity to refine the existing summary (only if needed) with some more context below.\n------------\n{}\n------------\nGiven the new context, refine the original summary.\nIf the context isn't useful, return the original summary.",
        existing_summary, text
    )
}
