//! Prompt construction for the document-understanding model

/// Word budget for the title-suggestion snippet; a title only needs the
/// opening of the document.
const TITLE_SNIPPET_WORDS: usize = 300;

/// Prompt for the full document analysis. The response is constrained to
/// the schema enforced by [`crate::schema::parse_analysis`].
pub fn analysis_prompt(document_text: &str) -> String {
    format!(
        "Analyze the following legal document. Your task is to:\n\
         1. Summarize the document's purpose in plain English.\n\
         2. Identify and explain the key clauses.\n\
         3. Flag any potential risks or unfavorable terms.\n\
         4. Extract any key dates or deadlines, such as contract end dates, \
         notice periods, or payment due dates. Format all dates as YYYY-MM-DD.\n\
         5. List the names of all parties (counterparties) involved in the document.\n\
         \n\
         Do not provide legal advice. Your analysis is for informational purposes only.\n\
         \n\
         Here is the document:\n\
         ---\n\
         {document_text}\n\
         ---\n"
    )
}

/// Prompt for a two-document comparison.
pub fn comparison_prompt(doc1_text: &str, doc2_text: &str) -> String {
    format!(
        "As a legal analyst, compare the two legal documents provided below. \
         Identify the key differences in clauses, terms, obligations, and potential risks.\n\
         Provide a summary of the main differences, a clause-by-clause comparison for \
         significant changes, and an overview of how the risk profiles differ.\n\
         \n\
         Document 1:\n\
         ---\n\
         {doc1_text}\n\
         ---\n\
         \n\
         Document 2:\n\
         ---\n\
         {doc2_text}\n\
         ---\n"
    )
}

/// Prompt for a short title suggestion over a truncated snippet.
pub fn title_prompt(snippet: &str) -> String {
    format!(
        "Based on the following text snippet, suggest a short, descriptive document title \
         (e.g., \"Lease Agreement - 123 Main St\" or \"NDA for Project X\"). \
         Return only the title text, with no quotation marks or extra words.\n\
         \n\
         Snippet:\n\
         ---\n\
         {snippet}\n\
         ---\n"
    )
}

/// The first 300 words of the document, for a quick title suggestion.
/// Returns an empty string for blank input.
pub fn title_snippet(document_text: &str) -> String {
    document_text
        .split_whitespace()
        .take(TITLE_SNIPPET_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}
