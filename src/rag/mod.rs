//! Retrieval helpers over the experience journal.
//!
//! Experiences are reshaped into [`Document`]s with parsed tags and
//! presence flags. From there they can be exported to a JSON file, filtered
//! by tag or category, summarized into [`ExperienceStatistics`], or folded
//! into a prompt with [`build_prompt_context`].

mod document;
mod error;
mod export;
mod prompt;
mod search;
mod service;
mod statistics;

pub use document::{DOCUMENT_SOURCE, DOCUMENT_TYPE, Document, DocumentMetadata};
pub use error::RagError;
pub use export::{DEFAULT_EXPORT_FILE, EXPORT_VERSION, ExportEnvelope, export_path};
pub use prompt::{DEFAULT_PROMPT_EXPERIENCES, build_prompt_context};
pub use search::{filter_by_category, filter_by_tags};
pub use service::{RagResult, RagService};
pub use statistics::{ExperienceStatistics, TOP_TAG_LIMIT, UNCATEGORIZED};

#[cfg(test)]
mod tests;
