//! Prompt context assembly from retrieved documents.

use super::Document;

/// Number of documents included when the caller has no preference.
pub const DEFAULT_PROMPT_EXPERIENCES: usize = 5;

const HEADER: &str = "Based on the following past experiences:\n";
const CLOSING: &str = "Please provide a helpful response based on the above experiences.";

/// Builds the prompt context for `query` from the first `max_experiences`
/// documents, in the order given.
///
/// Category, tags and context lines are omitted when empty. Sections are
/// joined with single newlines:
///
/// ```text
/// Based on the following past experiences:
///
///
/// --- Experience 1 ---
/// Title: ...
/// Category: ...
/// Tags: a, b
/// Context: ...
///
/// Content:
/// ...
///
///
/// User Query: ...
///
/// Please provide a helpful response based on the above experiences.
/// ```
#[must_use]
pub fn build_prompt_context(query: &str, documents: &[Document], max_experiences: usize) -> String {
    let mut parts: Vec<String> = vec![HEADER.to_owned()];

    for (position, document) in documents.iter().take(max_experiences).enumerate() {
        parts.push(format!("\n--- Experience {} ---", position + 1));
        parts.push(format!("Title: {}", document.title));
        if !document.category.is_empty() {
            parts.push(format!("Category: {}", document.category));
        }
        if !document.tags.is_empty() {
            parts.push(format!("Tags: {}", document.tags.join(", ")));
        }
        if !document.context.is_empty() {
            parts.push(format!("Context: {}", document.context));
        }
        parts.push(format!("\nContent:\n{}\n", document.content));
    }

    parts.push(format!("\nUser Query: {query}\n"));
    parts.push(CLOSING.to_owned());
    parts.join("\n")
}
