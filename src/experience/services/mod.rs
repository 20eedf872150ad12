//! Application services for the experience journal.

mod journal;

pub use journal::{
    ExperienceRequest, ExperienceService, ExperienceServiceError, ExperienceServiceResult,
    ListExperiencesRequest,
};
