//! Aggregate statistics over experience documents.

use super::Document;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Bucket used for documents without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Number of entries kept in [`ExperienceStatistics::top_tags`].
pub const TOP_TAG_LIMIT: usize = 10;

/// Counts and histograms describing the experience journal.
///
/// Histograms keep first-encounter order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExperienceStatistics {
    /// Number of documents.
    pub total_experiences: usize,
    /// Documents with a context.
    pub experiences_with_context: usize,
    /// Documents with at least one tag.
    pub experiences_with_tags: usize,
    /// Documents per category, absent categories under [`UNCATEGORIZED`].
    pub category_distribution: IndexMap<String, usize>,
    /// Occurrences of every tag.
    pub tag_counts: IndexMap<String, usize>,
    /// The most frequent tags, most frequent first, ties in encounter order.
    pub top_tags: IndexMap<String, usize>,
    /// Number of distinct categories, [`UNCATEGORIZED`] included.
    pub unique_categories: usize,
    /// Number of distinct tags.
    pub unique_tags: usize,
}

impl ExperienceStatistics {
    /// Computes statistics over `documents`.
    #[must_use]
    pub fn from_documents(documents: &[Document]) -> Self {
        let mut category_distribution: IndexMap<String, usize> = IndexMap::new();
        let mut tag_counts: IndexMap<String, usize> = IndexMap::new();
        let mut experiences_with_context = 0;
        let mut experiences_with_tags = 0;

        for document in documents {
            let category = if document.category.is_empty() {
                UNCATEGORIZED
            } else {
                document.category.as_str()
            };
            *category_distribution.entry(category.to_owned()).or_default() += 1;

            for tag in &document.tags {
                *tag_counts.entry(tag.clone()).or_default() += 1;
            }
            if !document.context.is_empty() {
                experiences_with_context += 1;
            }
            if !document.tags.is_empty() {
                experiences_with_tags += 1;
            }
        }

        let mut ranked: Vec<(&String, &usize)> = tag_counts.iter().collect();
        ranked.sort_by(|left, right| right.1.cmp(left.1));
        let top_tags = ranked
            .into_iter()
            .take(TOP_TAG_LIMIT)
            .map(|(tag, count)| (tag.clone(), *count))
            .collect();

        Self {
            total_experiences: documents.len(),
            experiences_with_context,
            experiences_with_tags,
            unique_categories: category_distribution.len(),
            unique_tags: tag_counts.len(),
            category_distribution,
            tag_counts,
            top_tags,
        }
    }
}
