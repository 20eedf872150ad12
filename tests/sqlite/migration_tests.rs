//! Upgrading databases written by older releases.

use super::helpers::database_path;
use camino::Utf8PathBuf;
use crate::test_helpers::FixedClock;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use rstest::rstest;
use secondbrain::config::StorageConfig;
use secondbrain::experience::{
    adapters::sqlite::SqliteExperienceRepository,
    services::{ExperienceService, ListExperiencesRequest},
};
use secondbrain::storage::{SCHEMA_VERSION, migrate, open_pool, schema_version};
use secondbrain::todo::{
    adapters::sqlite::SqliteTodoRepository,
    domain::{Recognized, TaskPriority},
    services::{ListTodosRequest, TodoRequest, TodoService},
};
use std::collections::HashSet;
use std::sync::Arc;
use tempfile::TempDir;

const LEGACY_SCHEMA_SQL: &str = "\
CREATE TABLE todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    status TEXT DEFAULT 'pending',
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
CREATE TABLE experiences (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
INSERT INTO todos (title, description, status, created_at, updated_at) VALUES
    ('Legacy pending', 'old row', 'pending', '2024-01-02 09:00:00', '2024-01-02 09:00:00'),
    ('Legacy done', NULL, 'done', '2024-01-03 09:00:00', '2024-01-03 09:00:00'),
    ('Legacy null', '', NULL, '2024-01-04 09:00:00', '2024-01-04 09:00:00');
INSERT INTO experiences (title, content, created_at, updated_at) VALUES
    ('Old lesson', 'kept verbatim', '2024-01-05 09:00:00', '2024-01-05 09:00:00');
";

#[derive(QueryableByName, Debug, PartialEq, Eq)]
struct StoredTodo {
    #[diesel(sql_type = BigInt)]
    id: i64,
    #[diesel(sql_type = Text)]
    unique_id: String,
}

/// Writes a database in the layout of an early release, with rows.
fn legacy_database(dir: &TempDir) -> Utf8PathBuf {
    let path = database_path(dir);
    std::fs::create_dir_all(path.parent().expect("database path has a parent"))
        .expect("data dir should be created");
    let mut legacy =
        SqliteConnection::establish(path.as_str()).expect("legacy database should open");
    legacy
        .batch_execute(LEGACY_SCHEMA_SQL)
        .expect("legacy schema should apply");
    path
}

fn stored_todos(conn: &mut SqliteConnection) -> Vec<StoredTodo> {
    diesel::sql_query("SELECT id, unique_id FROM todos ORDER BY id")
        .load(conn)
        .expect("todo rows should load")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn legacy_database_upgrades_without_losing_rows() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = legacy_database(&dir);

    let pool = open_pool(&StorageConfig::new(path)).expect("store should open");
    let clock = Arc::new(FixedClock::noon(2026, 10, 19));
    let todos = TodoService::new(
        Arc::new(SqliteTodoRepository::new(pool.clone())),
        Arc::clone(&clock),
    );
    let experiences = ExperienceService::new(
        Arc::new(SqliteExperienceRepository::new(pool.clone())),
        clock,
    );

    let all = todos
        .list(
            ListTodosRequest::new()
                .including_done(true)
                .sorted_by("created_at", "ASC"),
        )
        .await
        .expect("listing should succeed");
    let open = todos
        .list(ListTodosRequest::new())
        .await
        .expect("listing should succeed");
    let tokens: HashSet<_> = all.iter().map(|todo| todo.token()).collect();
    let statuses: Vec<&str> = all.iter().map(|todo| todo.status().as_str()).collect();

    assert_eq!(all.len(), 3);
    assert_eq!(tokens.len(), 3);
    assert_eq!(statuses, vec!["pending", "done", ""]);
    assert!(
        all.iter()
            .all(|todo| todo.priority() == &Recognized::Known(TaskPriority::Medium))
    );
    assert_eq!(all.first().and_then(|todo| todo.description()), Some("old row"));
    assert_eq!(all.last().and_then(|todo| todo.description()), None);
    assert_eq!(open.len(), 2);

    let journal = experiences
        .list(ListExperiencesRequest::new())
        .await
        .expect("listing should succeed");
    assert_eq!(journal.len(), 1);
    assert_eq!(journal.first().and_then(|entry| entry.tags()), None);
    assert_eq!(
        journal.first().and_then(|entry| entry.content()),
        Some("kept verbatim")
    );

    let created = todos
        .create(TodoRequest::new("After upgrade"))
        .await
        .expect("creation should succeed after upgrade");
    assert!(!tokens.contains(&created.token()));

    let mut conn = pool.get().expect("connection should be available");
    assert_eq!(
        schema_version(&mut conn).expect("version should be readable"),
        SCHEMA_VERSION
    );
}

#[rstest]
fn migrating_a_populated_store_twice_is_a_no_op() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let pool =
        open_pool(&StorageConfig::new(legacy_database(&dir))).expect("store should open");
    let mut conn = pool.get().expect("connection should be available");
    let before = stored_todos(&mut conn);

    let report = migrate(&mut conn).expect("second migration should succeed");
    let after = stored_todos(&mut conn);
    let experiences: i64 = diesel::dsl::sql::<BigInt>("SELECT COUNT(*) FROM experiences")
        .get_result(&mut conn)
        .expect("experience count should load");

    assert!(report.is_noop());
    assert_eq!(before.len(), 3);
    assert_eq!(after, before);
    assert_eq!(experiences, 1);
    assert_eq!(
        schema_version(&mut conn).expect("version should be readable"),
        SCHEMA_VERSION
    );
}

#[rstest]
fn fresh_database_applies_every_creating_step() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = database_path(&dir);
    std::fs::create_dir_all(path.parent().expect("database path has a parent"))
        .expect("data dir should be created");
    let mut conn = SqliteConnection::establish(path.as_str()).expect("database should open");

    let report = migrate(&mut conn).expect("migration should succeed");

    assert_eq!(report.applied(), &[1, 8, 9]);
    assert_eq!(
        schema_version(&mut conn).expect("version should be readable"),
        SCHEMA_VERSION
    );
}
