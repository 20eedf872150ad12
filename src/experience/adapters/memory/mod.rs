//! In-memory adapters for experience storage.

mod experience;

pub use experience::InMemoryExperienceRepository;
