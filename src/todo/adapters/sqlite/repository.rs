//! `SQLite` repository implementation for todo storage.

use super::{
    models::{NewTodoRow, TodoChangeset, TodoRow},
    query::{due_query, list_query},
    schema::todos,
};
use crate::storage::{SqlitePool, get_conn_with, run_blocking_with};
use crate::todo::{
    domain::{
        NewTodo, PersistedTodoData, RankedValue, Recognized, Schedule, TaskStatus, TodayEntry,
        Todo, TodoFields, TodoId, TodoQuery, TodoToken, compare_today,
    },
    ports::{TodoRepository, TodoRepositoryError, TodoRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::{Sqlite, SqliteConnection};
use uuid::Uuid;

/// `SQLite`-backed todo repository.
#[derive(Debug, Clone)]
pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    /// Creates a repository over an opened and migrated pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TodoRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> TodoRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, TodoRepositoryError::persistence)?;
                f(&mut connection)
            },
            TodoRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn store(&self, todo: &NewTodo) -> TodoRepositoryResult<TodoId> {
        let token = todo.token();
        let new_row = to_new_row(todo);

        self.run_blocking(move |connection| {
            let id = diesel::insert_into(todos::table)
                .values(&new_row)
                .returning(todos::id)
                .get_result::<i64>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TodoRepositoryError::DuplicateToken(token)
                    }
                    _ => TodoRepositoryError::persistence(err),
                })?;
            Ok(TodoId::new(id))
        })
        .await
    }

    async fn list(&self, query: &TodoQuery) -> TodoRepositoryResult<Vec<Todo>> {
        let statement = list_query(query);
        tracing::debug!(
            sql = %diesel::debug_query::<Sqlite, _>(&statement),
            "composed todo list query"
        );

        self.run_blocking(move |connection| {
            statement
                .select(TodoRow::as_select())
                .load::<TodoRow>(connection)
                .map_err(TodoRepositoryError::persistence)?
                .into_iter()
                .map(row_to_todo)
                .collect()
        })
        .await
    }

    async fn due_on(&self, today: NaiveDate) -> TodoRepositoryResult<Vec<TodayEntry>> {
        self.run_blocking(move |connection| {
            let rows = due_query(today)
                .select(TodoRow::as_select())
                .load::<TodoRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            let mut entries = rows
                .into_iter()
                .map(|row| row_to_todo(row).map(|todo| TodayEntry::new(todo, today)))
                .collect::<TodoRepositoryResult<Vec<_>>>()?;
            entries.sort_by(compare_today);
            Ok(entries)
        })
        .await
    }

    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        self.run_blocking(move |connection| {
            let row = todos::table
                .filter(todos::id.eq(id.value()))
                .select(TodoRow::as_select())
                .first::<TodoRow>(connection)
                .optional()
                .map_err(TodoRepositoryError::persistence)?;
            row.map(row_to_todo).transpose()
        })
        .await
    }

    async fn update(
        &self,
        id: TodoId,
        fields: &TodoFields,
        updated_at: DateTime<Utc>,
    ) -> TodoRepositoryResult<bool> {
        let changeset = to_changeset(fields, updated_at);
        self.run_blocking(move |connection| {
            let affected = diesel::update(todos::table.filter(todos::id.eq(id.value())))
                .set(&changeset)
                .execute(connection)
                .map_err(TodoRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }

    async fn update_status(
        &self,
        id: TodoId,
        status: TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> TodoRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let affected = diesel::update(todos::table.filter(todos::id.eq(id.value())))
                .set((
                    todos::status.eq(status.as_str()),
                    todos::updated_at.eq(updated_at.naive_utc()),
                ))
                .execute(connection)
                .map_err(TodoRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }

    async fn delete(&self, id: TodoId) -> TodoRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(todos::table.filter(todos::id.eq(id.value())))
                .execute(connection)
                .map_err(TodoRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }
}

fn to_new_row(todo: &NewTodo) -> NewTodoRow {
    let fields = todo.fields();
    let schedule = fields.schedule();
    let created_at = todo.created_at().naive_utc();
    NewTodoRow {
        unique_id: todo.token().to_string(),
        title: fields.title().to_owned(),
        description: fields.description().map(str::to_owned),
        status: fields.status().as_str().to_owned(),
        priority: fields.priority().as_str().to_owned(),
        target_date: schedule.target_date,
        start_date: schedule.start_date,
        end_date: schedule.end_date,
        created_at,
        updated_at: created_at,
    }
}

fn to_changeset(fields: &TodoFields, updated_at: DateTime<Utc>) -> TodoChangeset {
    let schedule = fields.schedule();
    TodoChangeset {
        title: fields.title().to_owned(),
        description: fields.description().map(str::to_owned),
        status: fields.status().as_str().to_owned(),
        priority: fields.priority().as_str().to_owned(),
        target_date: schedule.target_date,
        start_date: schedule.start_date,
        end_date: schedule.end_date,
        updated_at: updated_at.naive_utc(),
    }
}

fn row_to_todo(row: TodoRow) -> TodoRepositoryResult<Todo> {
    let TodoRow {
        id,
        unique_id,
        title,
        description,
        status,
        priority,
        target_date,
        start_date,
        end_date,
        created_at,
        updated_at,
    } = row;

    let token = Uuid::parse_str(&unique_id).map_err(TodoRepositoryError::persistence)?;
    let data = PersistedTodoData {
        id: TodoId::new(id),
        token: TodoToken::from_uuid(token),
        title,
        description: description.filter(|text| !text.is_empty()),
        status: Recognized::from_storage(status.unwrap_or_default()),
        priority: Recognized::from_storage(priority.unwrap_or_default()),
        schedule: Schedule {
            target_date,
            start_date,
            end_date,
        },
        created_at: created_at.and_utc(),
        updated_at: updated_at.and_utc(),
    };
    Ok(Todo::from_persisted(data))
}
