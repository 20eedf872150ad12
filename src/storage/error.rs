//! Errors raised while opening or migrating the store.

use diesel::r2d2::PoolError;
use thiserror::Error;

/// Failures while bootstrapping `SQLite` storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database directory could not be created.
    #[error("failed to prepare database directory: {0}")]
    Directory(#[source] std::io::Error),

    /// The connection pool could not be built or a connection checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// A schema migration failed.
    #[error("schema migration failed: {0}")]
    Migration(#[source] diesel::result::Error),
}
