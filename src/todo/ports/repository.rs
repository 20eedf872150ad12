//! Repository port for todo persistence and list views.

use crate::todo::domain::{
    NewTodo, TaskStatus, TodayEntry, Todo, TodoFields, TodoId, TodoQuery, TodoToken,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for todo repository operations.
pub type TodoRepositoryResult<T> = Result<T, TodoRepositoryError>;

/// Todo persistence contract.
///
/// Missing records are reported through `Option` and `bool` results, never
/// as errors.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Stores a new todo and returns its assigned key.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::DuplicateToken`] when the token is
    /// already taken.
    async fn store(&self, todo: &NewTodo) -> TodoRepositoryResult<TodoId>;

    /// Returns the todos matching `query` in its requested order.
    async fn list(&self, query: &TodoQuery) -> TodoRepositoryResult<Vec<Todo>>;

    /// Returns the todos scheduled for `today` plus unfinished todos whose
    /// planned window already ended, overdue entries first.
    async fn due_on(&self, today: NaiveDate) -> TodoRepositoryResult<Vec<TodayEntry>>;

    /// Finds a todo by key.
    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>>;

    /// Replaces every editable field of a todo.
    ///
    /// Returns `false` when no todo has the key.
    async fn update(
        &self,
        id: TodoId,
        fields: &TodoFields,
        updated_at: DateTime<Utc>,
    ) -> TodoRepositoryResult<bool>;

    /// Changes only the status of a todo.
    ///
    /// Returns `false` when no todo has the key.
    async fn update_status(
        &self,
        id: TodoId,
        status: TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> TodoRepositoryResult<bool>;

    /// Deletes a todo.
    ///
    /// Returns `false` when no todo has the key.
    async fn delete(&self, id: TodoId) -> TodoRepositoryResult<bool>;
}

/// Errors returned by todo repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TodoRepositoryError {
    /// Another todo already uses the token.
    #[error("duplicate todo token: {0}")]
    DuplicateToken(TodoToken),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TodoRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
