//! Connection pool construction and blocking execution helpers.

use super::{StorageError, migrate};
use crate::config::StorageConfig;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;
use std::time::Duration;

/// `SQLite` connection pool type.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Pooled `SQLite` connection.
pub type PooledSqlite = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Per-connection settings applied when the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        let busy_timeout_ms = self.busy_timeout.as_millis();
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {busy_timeout_ms}; PRAGMA foreign_keys = ON;"
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds a connection pool without touching the schema.
///
/// # Errors
///
/// Returns [`StorageError::Pool`] when the pool cannot open its initial
/// connections.
pub fn build_pool(config: &StorageConfig) -> Result<SqlitePool, StorageError> {
    let manager = ConnectionManager::<SqliteConnection>::new(config.database_path().as_str());
    let pool = Pool::builder()
        .max_size(config.pool_size())
        .connection_customizer(Box::new(ConnectionOptions {
            busy_timeout: config.busy_timeout(),
        }))
        .build(manager)?;
    Ok(pool)
}

/// Opens the store: creates the database directory, builds the pool and
/// applies pending schema migrations.
///
/// # Errors
///
/// Returns [`StorageError`] when the directory cannot be created, the pool
/// cannot be built, or a migration fails.
pub fn open_pool(config: &StorageConfig) -> Result<SqlitePool, StorageError> {
    if let Some(parent) = config
        .database_path()
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
    {
        Dir::create_ambient_dir_all(parent, ambient_authority())
            .map_err(StorageError::Directory)?;
    }

    let pool = build_pool(config)?;
    let mut conn = pool.get()?;
    let report = migrate(&mut conn)?;
    tracing::info!(
        path = %config.database_path(),
        applied = ?report.applied(),
        "storage ready"
    );
    Ok(pool)
}

/// Runs a blocking task and maps join errors into the caller's error type.
pub(crate) async fn run_blocking_with<F, T, E, M>(f: F, map_err: M) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: FnOnce(tokio::task::JoinError) -> E,
{
    tokio::task::spawn_blocking(f).await.map_err(map_err)?
}

/// Obtains a connection from the pool with a caller-provided error mapper.
pub(crate) fn get_conn_with<E, M>(pool: &SqlitePool, map_err: M) -> Result<PooledSqlite, E>
where
    M: FnOnce(PoolError) -> E,
{
    pool.get().map_err(map_err)
}
