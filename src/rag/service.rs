//! Retrieval service over the experience repository.

use super::export::{ExportEnvelope, write_file};
use super::search::{filter_by_category, filter_by_tags};
use super::{Document, ExperienceStatistics, RagError};
use crate::experience::domain::ExperienceQuery;
use crate::experience::ports::ExperienceRepository;
use camino::{Utf8Path, Utf8PathBuf};
use mockable::Clock;
use std::sync::Arc;

/// Result type for retrieval operations.
pub type RagResult<T> = Result<T, RagError>;

/// Exports, searches and summarizes experiences as [`Document`]s.
#[derive(Clone)]
pub struct RagService<R, C>
where
    R: ExperienceRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> RagService<R, C>
where
    R: ExperienceRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new retrieval service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns every experience as a document, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Repository`] when loading fails.
    pub async fn export_all(&self) -> RagResult<Vec<Document>> {
        let experiences = self.repository.list(&ExperienceQuery::default()).await?;
        Ok(experiences.iter().map(Document::from).collect())
    }

    /// Writes every document to `path` as pretty-printed JSON and returns
    /// the path.
    ///
    /// An existing file is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`RagError`] when loading, serializing or writing fails.
    pub async fn export_to_file(&self, path: impl AsRef<Utf8Path>) -> RagResult<Utf8PathBuf> {
        let destination = path.as_ref().to_path_buf();
        let envelope = ExportEnvelope::new(self.clock.utc(), self.export_all().await?);
        let total_records = envelope.total_records;
        let contents = serde_json::to_vec_pretty(&envelope)?;

        let target = destination.clone();
        tokio::task::spawn_blocking(move || write_file(&target, &contents)).await??;
        tracing::info!(path = %destination, total_records, "exported experiences");
        Ok(destination)
    }

    /// Returns documents sharing at least one tag with `tags`, ignoring
    /// case.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Repository`] when loading fails.
    pub async fn search_by_tags<S>(&self, tags: &[S]) -> RagResult<Vec<Document>>
    where
        S: AsRef<str> + Sync,
    {
        Ok(filter_by_tags(self.export_all().await?, tags))
    }

    /// Returns documents whose category equals `category`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Repository`] when loading fails.
    pub async fn search_by_category(&self, category: &str) -> RagResult<Vec<Document>> {
        Ok(filter_by_category(self.export_all().await?, category))
    }

    /// Computes statistics over every experience.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Repository`] when loading fails.
    pub async fn compute_statistics(&self) -> RagResult<ExperienceStatistics> {
        let documents = self.export_all().await?;
        Ok(ExperienceStatistics::from_documents(&documents))
    }
}
