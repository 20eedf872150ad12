//! Error types for document export and retrieval.

use crate::experience::ports::ExperienceRepositoryError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors returned by [`super::RagService`].
#[derive(Debug, Error)]
pub enum RagError {
    /// Loading experiences failed.
    #[error(transparent)]
    Repository(#[from] ExperienceRepositoryError),

    /// The export document could not be serialized.
    #[error("failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The export path does not name a file.
    #[error("export path must include a file name: {0}")]
    MissingFileName(Utf8PathBuf),

    /// Writing the export file failed.
    #[error("failed to write export to {path}: {source}")]
    Write {
        /// Destination that could not be written.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The blocking export task did not complete.
    #[error("export task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
