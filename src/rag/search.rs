//! Linear tag and category matching over documents.

use super::Document;

/// Keeps documents sharing at least one tag with `tags`, ignoring case.
///
/// Blank query tags are ignored; a query with no usable tag matches
/// nothing.
#[must_use]
pub fn filter_by_tags<S: AsRef<str>>(documents: Vec<Document>, tags: &[S]) -> Vec<Document> {
    let wanted: Vec<String> = tags
        .iter()
        .map(|tag| tag.as_ref().trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect();
    if wanted.is_empty() {
        return Vec::new();
    }

    documents
        .into_iter()
        .filter(|document| {
            document
                .tags
                .iter()
                .any(|tag| wanted.contains(&tag.to_lowercase()))
        })
        .collect()
}

/// Keeps documents whose full category equals `category`, ignoring case.
///
/// Documents without a category never match.
#[must_use]
pub fn filter_by_category(documents: Vec<Document>, category: &str) -> Vec<Document> {
    let wanted = category.to_lowercase();
    documents
        .into_iter()
        .filter(|document| {
            !document.category.is_empty() && document.category.to_lowercase() == wanted
        })
        .collect()
}
