//! Service layer turning raw experience requests into repository calls.

use crate::experience::{
    domain::{
        Experience, ExperienceDomainError, ExperienceFields, ExperienceId, ExperienceQuery,
        ExperienceSort, NewExperience,
    },
    ports::{ExperienceRepository, ExperienceRepositoryError},
};
use crate::listing::{CreatedWithin, parse_optional_date};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating or fully updating an experience.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExperienceRequest {
    title: String,
    content: String,
    tags: String,
    category: String,
    context: String,
}

impl ExperienceRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets the comma-separated tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the situational context.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    fn into_fields(self) -> Result<ExperienceFields, ExperienceDomainError> {
        Ok(ExperienceFields::new(&self.title)?
            .with_content(self.content)
            .with_tags(&self.tags)
            .with_category(&self.category)
            .with_context(&self.context))
    }
}

/// Request payload for listing experiences.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListExperiencesRequest {
    from_date: Option<String>,
    to_date: Option<String>,
    sort_by: Option<String>,
    sort_order: Option<String>,
}

impl ListExperiencesRequest {
    /// Creates a request for every experience, newest first.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the earliest creation date (`YYYY-MM-DD`, blank for none).
    #[must_use]
    pub fn with_from_date(mut self, date: impl Into<String>) -> Self {
        self.from_date = Some(date.into());
        self
    }

    /// Sets the latest creation date (`YYYY-MM-DD`, blank for none).
    #[must_use]
    pub fn with_to_date(mut self, date: impl Into<String>) -> Self {
        self.to_date = Some(date.into());
        self
    }

    /// Sets the sort key and direction.
    #[must_use]
    pub fn sorted_by(mut self, sort_by: impl Into<String>, sort_order: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_order = Some(sort_order.into());
        self
    }

    fn into_query(self) -> Result<ExperienceQuery, ExperienceDomainError> {
        Ok(ExperienceQuery {
            created: CreatedWithin::new(
                date_field("from_date", self.from_date.as_deref())?,
                date_field("to_date", self.to_date.as_deref())?,
            ),
            sort: ExperienceSort::parse(
                self.sort_by.as_deref().unwrap_or_default(),
                self.sort_order.as_deref().unwrap_or_default(),
            ),
        })
    }
}

fn date_field(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, ExperienceDomainError> {
    parse_optional_date(value).map_err(|_| ExperienceDomainError::InvalidDate {
        field,
        value: value.unwrap_or_default().to_owned(),
    })
}

/// Service-level errors for experience operations.
#[derive(Debug, Error)]
pub enum ExperienceServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] ExperienceDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ExperienceRepositoryError),
}

/// Result type for experience service operations.
pub type ExperienceServiceResult<T> = Result<T, ExperienceServiceError>;

/// Experience journal orchestration service.
#[derive(Clone)]
pub struct ExperienceService<R, C>
where
    R: ExperienceRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ExperienceService<R, C>
where
    R: ExperienceRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new experience service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Records a new experience.
    ///
    /// # Errors
    ///
    /// Returns [`ExperienceServiceError::Domain`] when the title is blank and
    /// [`ExperienceServiceError::Repository`] when storage fails.
    pub async fn create(&self, request: ExperienceRequest) -> ExperienceServiceResult<Experience> {
        let fields = request.into_fields()?;
        let new_experience = NewExperience::new(fields, &*self.clock);
        let id = self.repository.store(&new_experience).await?;
        tracing::info!(experience_id = %id, "created experience");
        Ok(Experience::from_new(id, &new_experience))
    }

    /// Lists experiences within the requested creation window and order.
    ///
    /// # Errors
    ///
    /// Returns [`ExperienceServiceError::Domain`] when a date bound is
    /// malformed and [`ExperienceServiceError::Repository`] when the lookup
    /// fails.
    pub async fn list(
        &self,
        request: ListExperiencesRequest,
    ) -> ExperienceServiceResult<Vec<Experience>> {
        let query = request.into_query()?;
        Ok(self.repository.list(&query).await?)
    }

    /// Retrieves an experience by key.
    ///
    /// # Errors
    ///
    /// Returns [`ExperienceServiceError::Repository`] when the lookup fails.
    pub async fn get(&self, id: ExperienceId) -> ExperienceServiceResult<Option<Experience>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Replaces every editable field of an experience.
    ///
    /// Returns `false` when no experience has the key.
    ///
    /// # Errors
    ///
    /// Returns [`ExperienceServiceError::Domain`] when the title is blank and
    /// [`ExperienceServiceError::Repository`] when storage fails.
    pub async fn update(
        &self,
        id: ExperienceId,
        request: ExperienceRequest,
    ) -> ExperienceServiceResult<bool> {
        let fields = request.into_fields()?;
        let updated = self
            .repository
            .update(id, &fields, self.clock.utc())
            .await?;
        if updated {
            tracing::info!(experience_id = %id, "updated experience");
        }
        Ok(updated)
    }

    /// Deletes an experience.
    ///
    /// Returns `false` when no experience has the key.
    ///
    /// # Errors
    ///
    /// Returns [`ExperienceServiceError::Repository`] when storage fails.
    pub async fn delete(&self, id: ExperienceId) -> ExperienceServiceResult<bool> {
        let deleted = self.repository.delete(id).await?;
        if deleted {
            tracing::info!(experience_id = %id, "deleted experience");
        }
        Ok(deleted)
    }
}
