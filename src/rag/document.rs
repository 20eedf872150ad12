//! Retrieval-ready document shape of an experience.

use crate::experience::domain::Experience;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Value of [`DocumentMetadata::kind`] for every experience document.
pub const DOCUMENT_TYPE: &str = "past_experience";

/// Value of [`DocumentMetadata::source`] for every experience document.
pub const DOCUMENT_SOURCE: &str = "second_brain_app";

/// Normalized experience consumed by prompt assembly and exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Key of the source experience.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Content; empty when the experience has none.
    pub content: String,
    /// Parsed tag tokens in entry order.
    pub tags: Vec<String>,
    /// Category; empty when the experience has none.
    #[serde(default)]
    pub category: String,
    /// Situational context; empty when the experience has none.
    #[serde(default)]
    pub context: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Provenance and presence flags.
    pub metadata: DocumentMetadata,
}

/// Provenance and presence flags attached to each [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Always [`DOCUMENT_TYPE`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Always [`DOCUMENT_SOURCE`].
    pub source: String,
    /// The stored tag string is non-empty, even if it holds no tokens.
    pub has_tags: bool,
    /// A category is present.
    pub has_category: bool,
    /// A context is present.
    pub has_context: bool,
}

impl From<&Experience> for Document {
    fn from(experience: &Experience) -> Self {
        let tags: Vec<String> = experience
            .tag_tokens()
            .into_iter()
            .map(str::to_owned)
            .collect();
        let category = experience.category().unwrap_or_default().to_owned();
        let context = experience.context().unwrap_or_default().to_owned();
        let metadata = DocumentMetadata {
            kind: DOCUMENT_TYPE.to_owned(),
            source: DOCUMENT_SOURCE.to_owned(),
            has_tags: experience.tags().is_some_and(|raw| !raw.as_str().is_empty()),
            has_category: !category.is_empty(),
            has_context: !context.is_empty(),
        };

        Self {
            id: experience.id().value(),
            title: experience.title().to_owned(),
            content: experience.content().unwrap_or_default().to_owned(),
            tags,
            category,
            context,
            created_at: experience.created_at(),
            updated_at: experience.updated_at(),
            metadata,
        }
    }
}
