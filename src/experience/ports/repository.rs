//! Repository port for experience persistence.

use crate::experience::domain::{
    Experience, ExperienceFields, ExperienceId, ExperienceQuery, NewExperience,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for experience repository operations.
pub type ExperienceRepositoryResult<T> = Result<T, ExperienceRepositoryError>;

/// Experience persistence contract.
///
/// Missing records are reported through `Option` and `bool` results, never
/// as errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    /// Stores a new experience and returns its assigned key.
    async fn store(&self, experience: &NewExperience) -> ExperienceRepositoryResult<ExperienceId>;

    /// Returns the experiences matching `query` in its requested order.
    async fn list(&self, query: &ExperienceQuery) -> ExperienceRepositoryResult<Vec<Experience>>;

    /// Finds an experience by key.
    async fn find_by_id(&self, id: ExperienceId)
    -> ExperienceRepositoryResult<Option<Experience>>;

    /// Replaces every editable field of an experience.
    ///
    /// Returns `false` when no experience has the key.
    async fn update(
        &self,
        id: ExperienceId,
        fields: &ExperienceFields,
        updated_at: DateTime<Utc>,
    ) -> ExperienceRepositoryResult<bool>;

    /// Deletes an experience.
    ///
    /// Returns `false` when no experience has the key.
    async fn delete(&self, id: ExperienceId) -> ExperienceRepositoryResult<bool>;
}

/// Errors returned by experience repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ExperienceRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ExperienceRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
