//! Port contracts for experience storage.

pub mod repository;

#[cfg(test)]
pub use repository::MockExperienceRepository;
pub use repository::{ExperienceRepository, ExperienceRepositoryError, ExperienceRepositoryResult};
