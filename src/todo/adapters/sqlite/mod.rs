//! `SQLite` adapters for todo persistence.

mod models;
mod query;
mod repository;
mod schema;

pub use repository::SqliteTodoRepository;
