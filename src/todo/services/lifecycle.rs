//! Service layer turning raw todo requests into repository calls.
//!
//! Requests carry strings as a user typed them. The service trims and
//! truncates text, treats blank dates as absent, and rejects unknown status
//! and priority values before anything is written.

use crate::listing::{CreatedWithin, parse_optional_date};
use crate::todo::{
    domain::{
        NewTodo, Schedule, TaskPriority, TaskStatus, TodayEntry, Todo, TodoDomainError,
        TodoFields, TodoId, TodoQuery, TodoSort,
    },
    ports::{TodoRepository, TodoRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating or fully updating a todo.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoRequest {
    title: String,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    target_date: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl TodoRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the status; defaults to `in-queue`.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the priority; defaults to `Medium`.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the target date (`YYYY-MM-DD`, blank for none).
    #[must_use]
    pub fn with_target_date(mut self, date: impl Into<String>) -> Self {
        self.target_date = Some(date.into());
        self
    }

    /// Sets the planned start date (`YYYY-MM-DD`, blank for none).
    #[must_use]
    pub fn with_start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// Sets the planned end date (`YYYY-MM-DD`, blank for none).
    #[must_use]
    pub fn with_end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    fn into_fields(self) -> Result<TodoFields, TodoDomainError> {
        let status = self
            .status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()?
            .unwrap_or_default();
        let priority = self
            .priority
            .as_deref()
            .map(TaskPriority::try_from)
            .transpose()?
            .unwrap_or_default();
        let schedule = Schedule {
            target_date: date_field("target_date", self.target_date.as_deref())?,
            start_date: date_field("start_date", self.start_date.as_deref())?,
            end_date: date_field("end_date", self.end_date.as_deref())?,
        };

        let mut fields = TodoFields::new(&self.title)?
            .with_status(status)
            .with_priority(priority)
            .with_schedule(schedule);
        if let Some(description) = self.description {
            fields = fields.with_description(description);
        }
        Ok(fields)
    }
}

/// Request payload for listing todos.
///
/// Every field is optional; unknown sort keys and directions fall back to
/// newest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListTodosRequest {
    status: Option<String>,
    from_date: Option<String>,
    to_date: Option<String>,
    sort_by: Option<String>,
    sort_order: Option<String>,
    include_done: bool,
}

impl ListTodosRequest {
    /// Creates a request for the default view: unfinished todos, newest
    /// first.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the list to one exact stored status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the earliest creation date (`YYYY-MM-DD`, blank for none).
    #[must_use]
    pub fn with_from_date(mut self, date: impl Into<String>) -> Self {
        self.from_date = Some(date.into());
        self
    }

    /// Sets the latest creation date (`YYYY-MM-DD`, blank for none).
    #[must_use]
    pub fn with_to_date(mut self, date: impl Into<String>) -> Self {
        self.to_date = Some(date.into());
        self
    }

    /// Sets the sort key and direction.
    #[must_use]
    pub fn sorted_by(mut self, sort_by: impl Into<String>, sort_order: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_order = Some(sort_order.into());
        self
    }

    /// Keeps finished todos when no status filter is set.
    #[must_use]
    pub const fn including_done(mut self, include_done: bool) -> Self {
        self.include_done = include_done;
        self
    }

    fn into_query(self) -> Result<TodoQuery, TodoDomainError> {
        let created = CreatedWithin::new(
            date_field("from_date", self.from_date.as_deref())?,
            date_field("to_date", self.to_date.as_deref())?,
        );
        Ok(TodoQuery {
            status: self.status.as_deref().and_then(crate::text::non_blank),
            include_done: self.include_done,
            created,
            sort: TodoSort::parse(
                self.sort_by.as_deref().unwrap_or_default(),
                self.sort_order.as_deref().unwrap_or_default(),
            ),
        })
    }
}

fn date_field(field: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>, TodoDomainError> {
    parse_optional_date(value).map_err(|_| TodoDomainError::InvalidDate {
        field,
        value: value.unwrap_or_default().to_owned(),
    })
}

/// Service-level errors for todo operations.
#[derive(Debug, Error)]
pub enum TodoServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] TodoDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TodoRepositoryError),
}

/// Result type for todo service operations.
pub type TodoServiceResult<T> = Result<T, TodoServiceError>;

/// Todo orchestration service.
#[derive(Clone)]
pub struct TodoService<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TodoService<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new todo service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a todo with a fresh token.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Domain`] when the title is blank, a date
    /// is malformed, or the status or priority is unknown, and
    /// [`TodoServiceError::Repository`] when storage fails.
    pub async fn create(&self, request: TodoRequest) -> TodoServiceResult<Todo> {
        let fields = request.into_fields()?;
        let new_todo = NewTodo::new(fields, &*self.clock);
        let id = self.repository.store(&new_todo).await?;
        tracing::info!(todo_id = %id, token = %new_todo.token(), "created todo");
        Ok(Todo::from_new(id, &new_todo))
    }

    /// Lists todos matching the request filters in the requested order.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Domain`] when a date bound is malformed
    /// and [`TodoServiceError::Repository`] when the lookup fails.
    pub async fn list(&self, request: ListTodosRequest) -> TodoServiceResult<Vec<Todo>> {
        let query = request.into_query()?;
        Ok(self.repository.list(&query).await?)
    }

    /// Returns today's schedule, overdue todos first.
    ///
    /// Today is the UTC calendar date of the service clock.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Repository`] when the lookup fails.
    pub async fn todays_tasks(&self) -> TodoServiceResult<Vec<TodayEntry>> {
        let today = self.clock.utc().date_naive();
        Ok(self.repository.due_on(today).await?)
    }

    /// Retrieves a todo by key.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Repository`] when the lookup fails.
    pub async fn get(&self, id: TodoId) -> TodoServiceResult<Option<Todo>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Replaces every editable field of a todo.
    ///
    /// Returns `false` when no todo has the key.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Domain`] for invalid input and
    /// [`TodoServiceError::Repository`] when storage fails.
    pub async fn update(&self, id: TodoId, request: TodoRequest) -> TodoServiceResult<bool> {
        let fields = request.into_fields()?;
        let updated = self
            .repository
            .update(id, &fields, self.clock.utc())
            .await?;
        if updated {
            tracing::info!(todo_id = %id, "updated todo");
        }
        Ok(updated)
    }

    /// Changes only the status of a todo.
    ///
    /// Returns `false` when no todo has the key.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::UnknownStatus`] (wrapped) before touching
    /// storage when the status is not recognized.
    pub async fn update_status(&self, id: TodoId, status: &str) -> TodoServiceResult<bool> {
        let parsed = TaskStatus::try_from(status)?;
        let updated = self
            .repository
            .update_status(id, parsed, self.clock.utc())
            .await?;
        if updated {
            tracing::info!(todo_id = %id, status = %parsed, "updated todo status");
        }
        Ok(updated)
    }

    /// Deletes a todo.
    ///
    /// Returns `false` when no todo has the key.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Repository`] when storage fails.
    pub async fn delete(&self, id: TodoId) -> TodoServiceResult<bool> {
        let deleted = self.repository.delete(id).await?;
        if deleted {
            tracing::info!(todo_id = %id, "deleted todo");
        }
        Ok(deleted)
    }
}
