//! Domain model for the experience journal.
//!
//! Experiences are free-form notes about past work, tagged and categorized
//! so they can later be retrieved as prompt context.

mod error;
mod experience;
mod ids;
mod query;
mod tags;

pub use error::ExperienceDomainError;
pub use experience::{Experience, ExperienceFields, NewExperience, PersistedExperienceData};
pub use ids::ExperienceId;
pub use query::{ExperienceQuery, ExperienceSort, ExperienceSortKey};
pub use tags::Tags;
