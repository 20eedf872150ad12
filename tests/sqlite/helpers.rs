//! Shared fixtures for `SQLite` integration tests.

use crate::test_helpers::FixedClock;
use camino::Utf8PathBuf;
use rstest::fixture;
use secondbrain::config::StorageConfig;
use secondbrain::experience::{
    adapters::sqlite::SqliteExperienceRepository, services::ExperienceService,
};
use secondbrain::storage::{SqlitePool, open_pool};
use secondbrain::todo::{adapters::sqlite::SqliteTodoRepository, services::TodoService};
use std::sync::Arc;
use tempfile::TempDir;

/// Todo service over a real database.
pub type SqliteTodoService = TodoService<SqliteTodoRepository, FixedClock>;

/// Experience service over a real database.
pub type SqliteExperienceService = ExperienceService<SqliteExperienceRepository, FixedClock>;

/// A migrated database in a temporary directory.
pub struct TestStore {
    pub dir: TempDir,
    pub path: Utf8PathBuf,
    pub pool: SqlitePool,
    pub clock: Arc<FixedClock>,
}

impl TestStore {
    /// Todo service sharing this store's pool and clock.
    pub fn todos(&self) -> SqliteTodoService {
        TodoService::new(
            Arc::new(SqliteTodoRepository::new(self.pool.clone())),
            Arc::clone(&self.clock),
        )
    }

    /// Experience service sharing this store's pool and clock.
    pub fn experiences(&self) -> SqliteExperienceService {
        ExperienceService::new(
            Arc::new(SqliteExperienceRepository::new(self.pool.clone())),
            Arc::clone(&self.clock),
        )
    }
}

/// Returns the database path inside `dir`, nested one level so directory
/// creation is exercised.
pub fn database_path(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join("data").join("secondbrain.db"))
        .expect("temp path should be UTF-8")
}

/// Opens a fresh, migrated store with the clock at noon on 2026-10-19.
#[fixture]
pub fn store() -> TestStore {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = database_path(&dir);
    let pool = open_pool(&StorageConfig::new(path.clone())).expect("store should open");
    TestStore {
        dir,
        path,
        pool,
        clock: Arc::new(FixedClock::noon(2026, 10, 19)),
    }
}
