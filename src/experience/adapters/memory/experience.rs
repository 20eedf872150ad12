//! In-memory repository for experience and retrieval tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::experience::{
    domain::{Experience, ExperienceFields, ExperienceId, ExperienceQuery, NewExperience},
    ports::{ExperienceRepository, ExperienceRepositoryError, ExperienceRepositoryResult},
};

/// Thread-safe in-memory experience repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExperienceRepository {
    state: Arc<RwLock<InMemoryExperienceState>>,
}

#[derive(Debug, Default)]
struct InMemoryExperienceState {
    last_id: i64,
    experiences: BTreeMap<ExperienceId, Experience>,
}

impl InMemoryExperienceRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ExperienceRepositoryResult<RwLockReadGuard<'_, InMemoryExperienceState>> {
        self.state.read().map_err(|err| {
            ExperienceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> ExperienceRepositoryResult<RwLockWriteGuard<'_, InMemoryExperienceState>> {
        self.state.write().map_err(|err| {
            ExperienceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl ExperienceRepository for InMemoryExperienceRepository {
    async fn store(&self, experience: &NewExperience) -> ExperienceRepositoryResult<ExperienceId> {
        let mut state = self.write()?;
        state.last_id += 1;
        let id = ExperienceId::new(state.last_id);
        state
            .experiences
            .insert(id, Experience::from_new(id, experience));
        Ok(id)
    }

    async fn list(&self, query: &ExperienceQuery) -> ExperienceRepositoryResult<Vec<Experience>> {
        let state = self.read()?;
        let mut experiences: Vec<Experience> = state
            .experiences
            .values()
            .filter(|experience| query.matches(experience))
            .cloned()
            .collect();
        experiences.sort_by(|left, right| query.sort.compare(left, right));
        Ok(experiences)
    }

    async fn find_by_id(
        &self,
        id: ExperienceId,
    ) -> ExperienceRepositoryResult<Option<Experience>> {
        let state = self.read()?;
        Ok(state.experiences.get(&id).cloned())
    }

    async fn update(
        &self,
        id: ExperienceId,
        fields: &ExperienceFields,
        updated_at: DateTime<Utc>,
    ) -> ExperienceRepositoryResult<bool> {
        let mut state = self.write()?;
        let Some(experience) = state.experiences.get_mut(&id) else {
            return Ok(false);
        };
        experience.apply(fields, updated_at);
        Ok(true)
    }

    async fn delete(&self, id: ExperienceId) -> ExperienceRepositoryResult<bool> {
        let mut state = self.write()?;
        Ok(state.experiences.remove(&id).is_some())
    }
}
