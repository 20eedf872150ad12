//! `SQLite` storage bootstrap shared by every repository adapter.
//!
//! Opening the store builds an r2d2 pool of Diesel `SqliteConnection`s and
//! brings the schema up to date with an ordered list of idempotent
//! migrations. Repository adapters borrow connections from the pool on a
//! blocking thread for each operation.

mod error;
mod migrations;
mod pool;

pub use error::StorageError;
pub use migrations::{MigrationReport, SCHEMA_VERSION, migrate, schema_version};
pub use pool::{PooledSqlite, SqlitePool, build_pool, open_pool};

pub(crate) use pool::{get_conn_with, run_blocking_with};
