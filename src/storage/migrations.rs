//! Ordered, idempotent schema migrations.
//!
//! Databases created by earlier releases may lack columns added later, and
//! may hold todo rows without a unique token. Every migration checks the
//! live schema before running, so applying the list to a current database
//! changes nothing and applying it to an older one only adds what is
//! missing.

use super::StorageError;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sql_types::{BigInt, Text};
use uuid::Uuid;

/// Highest schema version known to this build.
pub const SCHEMA_VERSION: u32 = 12;

const CREATE_TODOS_SQL: &str = "\
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    unique_id TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    status TEXT NOT NULL DEFAULT 'in-queue',
    priority TEXT NOT NULL DEFAULT 'Medium',
    target_date DATE,
    start_date DATE,
    end_date DATE,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

const CREATE_EXPERIENCES_SQL: &str = "\
CREATE TABLE IF NOT EXISTS experiences (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT,
    tags TEXT,
    category TEXT,
    context TEXT,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

const CREATE_TOKEN_INDEX_SQL: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_unique_id ON todos(unique_id)";

/// One schema change and the check deciding whether it is still needed.
#[derive(Debug, Clone, Copy)]
enum Step {
    CreateTable {
        table: &'static str,
        ddl: &'static str,
    },
    AddColumn {
        table: &'static str,
        column: &'static str,
        decl: &'static str,
    },
    BackfillTodoTokens,
    CreateIndex {
        name: &'static str,
        ddl: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    step: Step,
}

const MIGRATIONS: [Migration; 12] = [
    Migration {
        version: 1,
        name: "create_todos",
        step: Step::CreateTable {
            table: "todos",
            ddl: CREATE_TODOS_SQL,
        },
    },
    Migration {
        version: 2,
        name: "add_todos_priority",
        step: Step::AddColumn {
            table: "todos",
            column: "priority",
            decl: "TEXT DEFAULT 'Medium'",
        },
    },
    Migration {
        version: 3,
        name: "add_todos_target_date",
        step: Step::AddColumn {
            table: "todos",
            column: "target_date",
            decl: "DATE",
        },
    },
    Migration {
        version: 4,
        name: "add_todos_start_date",
        step: Step::AddColumn {
            table: "todos",
            column: "start_date",
            decl: "DATE",
        },
    },
    Migration {
        version: 5,
        name: "add_todos_end_date",
        step: Step::AddColumn {
            table: "todos",
            column: "end_date",
            decl: "DATE",
        },
    },
    Migration {
        version: 6,
        name: "add_todos_unique_id",
        step: Step::AddColumn {
            table: "todos",
            column: "unique_id",
            decl: "TEXT",
        },
    },
    Migration {
        version: 7,
        name: "backfill_todos_unique_id",
        step: Step::BackfillTodoTokens,
    },
    Migration {
        version: 8,
        name: "index_todos_unique_id",
        step: Step::CreateIndex {
            name: "idx_unique_id",
            ddl: CREATE_TOKEN_INDEX_SQL,
        },
    },
    Migration {
        version: 9,
        name: "create_experiences",
        step: Step::CreateTable {
            table: "experiences",
            ddl: CREATE_EXPERIENCES_SQL,
        },
    },
    Migration {
        version: 10,
        name: "add_experiences_tags",
        step: Step::AddColumn {
            table: "experiences",
            column: "tags",
            decl: "TEXT",
        },
    },
    Migration {
        version: 11,
        name: "add_experiences_category",
        step: Step::AddColumn {
            table: "experiences",
            column: "category",
            decl: "TEXT",
        },
    },
    Migration {
        version: 12,
        name: "add_experiences_context",
        step: Step::AddColumn {
            table: "experiences",
            column: "context",
            decl: "TEXT",
        },
    },
];

/// Versions applied by a single [`migrate`] run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MigrationReport {
    applied: Vec<u32>,
}

impl MigrationReport {
    /// Returns the versions that were applied, in order.
    #[must_use]
    pub fn applied(&self) -> &[u32] {
        &self.applied
    }

    /// Returns `true` when the schema was already current.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Brings the schema up to [`SCHEMA_VERSION`].
///
/// All steps run inside one immediate transaction, so a concurrent process
/// migrating the same file waits instead of interleaving.
///
/// # Errors
///
/// Returns [`StorageError::Migration`] when a check or step fails for any
/// reason other than the column already existing.
pub fn migrate(conn: &mut SqliteConnection) -> Result<MigrationReport, StorageError> {
    let applied = conn
        .immediate_transaction::<_, DieselError, _>(|tx| {
            let mut versions = Vec::new();
            for migration in MIGRATIONS {
                if migration.step.is_pending(tx)? {
                    migration.step.apply(tx)?;
                    tracing::info!(
                        version = migration.version,
                        name = migration.name,
                        "applied schema migration"
                    );
                    versions.push(migration.version);
                } else {
                    tracing::debug!(
                        version = migration.version,
                        name = migration.name,
                        "schema migration already current"
                    );
                }
            }
            tx.batch_execute(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))?;
            Ok(versions)
        })
        .map_err(StorageError::Migration)?;

    Ok(MigrationReport { applied })
}

/// Reads the schema version recorded by the last [`migrate`] run.
///
/// Returns `0` for databases that were never migrated by this crate.
///
/// # Errors
///
/// Returns [`StorageError::Migration`] when the pragma cannot be read.
pub fn schema_version(conn: &mut SqliteConnection) -> Result<u32, StorageError> {
    let row = diesel::sql_query("SELECT user_version AS value FROM pragma_user_version")
        .get_result::<ValueRow>(conn)
        .map_err(StorageError::Migration)?;
    Ok(u32::try_from(row.value).unwrap_or_default())
}

impl Step {
    fn is_pending(self, conn: &mut SqliteConnection) -> QueryResult<bool> {
        match self {
            Self::CreateTable { table, .. } => Ok(!schema_object_exists(conn, "table", table)?),
            Self::AddColumn { table, column, .. } => Ok(!column_exists(conn, table, column)?),
            Self::BackfillTodoTokens => {
                let missing =
                    diesel::sql_query("SELECT COUNT(*) AS value FROM todos WHERE unique_id IS NULL")
                        .get_result::<ValueRow>(conn)?;
                Ok(missing.value > 0)
            }
            Self::CreateIndex { name, .. } => Ok(!schema_object_exists(conn, "index", name)?),
        }
    }

    fn apply(self, conn: &mut SqliteConnection) -> QueryResult<()> {
        match self {
            Self::CreateTable { ddl, .. } | Self::CreateIndex { ddl, .. } => {
                conn.batch_execute(ddl)
            }
            Self::AddColumn {
                table,
                column,
                decl,
            } => add_column_if_missing(conn, table, column, decl),
            Self::BackfillTodoTokens => backfill_todo_tokens(conn),
        }
    }
}

#[derive(QueryableByName)]
struct ValueRow {
    #[diesel(sql_type = BigInt)]
    value: i64,
}

fn schema_object_exists(
    conn: &mut SqliteConnection,
    kind: &str,
    name: &str,
) -> QueryResult<bool> {
    let query = diesel::sql_query(
        "SELECT COUNT(*) AS value FROM sqlite_master WHERE type = ? AND name = ?",
    )
    .bind::<Text, _>(kind.to_owned())
    .bind::<Text, _>(name.to_owned());
    Ok(query.get_result::<ValueRow>(conn)?.value > 0)
}

fn column_exists(conn: &mut SqliteConnection, table: &str, column: &str) -> QueryResult<bool> {
    let query = diesel::sql_query("SELECT COUNT(*) AS value FROM pragma_table_info(?) WHERE name = ?")
        .bind::<Text, _>(table.to_owned())
        .bind::<Text, _>(column.to_owned());
    Ok(query.get_result::<ValueRow>(conn)?.value > 0)
}

/// Adds a column, treating "duplicate column name" as already applied.
///
/// Table, column and declaration are compile-time constants from
/// [`MIGRATIONS`]; SQLite cannot bind identifiers in DDL.
fn add_column_if_missing(
    conn: &mut SqliteConnection,
    table: &str,
    column: &str,
    decl: &str,
) -> QueryResult<()> {
    match conn.batch_execute(&format!("ALTER TABLE {table} ADD COLUMN {column} {decl}")) {
        Err(err) if is_duplicate_column(&err) => Ok(()),
        result => result,
    }
}

fn is_duplicate_column(err: &DieselError) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(_, info) if info.message().contains("duplicate column name")
    )
}

#[derive(QueryableByName)]
struct IdRow {
    #[diesel(sql_type = BigInt)]
    id: i64,
}

fn backfill_todo_tokens(conn: &mut SqliteConnection) -> QueryResult<()> {
    let rows = diesel::sql_query("SELECT id FROM todos WHERE unique_id IS NULL")
        .load::<IdRow>(conn)?;
    for row in &rows {
        diesel::sql_query("UPDATE todos SET unique_id = ? WHERE id = ?")
            .bind::<Text, _>(Uuid::new_v4().to_string())
            .bind::<BigInt, _>(row.id)
            .execute(conn)?;
    }
    tracing::info!(rows = rows.len(), "backfilled todo tokens");
    Ok(())
}
