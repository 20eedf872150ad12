//! `SQLite` adapters for experience persistence.

mod models;
mod repository;
mod schema;

pub use repository::SqliteExperienceRepository;
