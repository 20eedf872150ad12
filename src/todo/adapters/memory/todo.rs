//! In-memory repository for todo service tests.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::todo::{
    domain::{
        NewTodo, TaskStatus, TodayEntry, Todo, TodoFields, TodoId, TodoQuery, TodoToken,
        compare_today,
    },
    ports::{TodoRepository, TodoRepositoryError, TodoRepositoryResult},
};

/// Thread-safe in-memory todo repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    state: Arc<RwLock<InMemoryTodoState>>,
}

#[derive(Debug, Default)]
struct InMemoryTodoState {
    last_id: i64,
    todos: BTreeMap<TodoId, Todo>,
    tokens: HashSet<TodoToken>,
}

impl InMemoryTodoRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a todo exactly as given, bypassing key assignment.
    ///
    /// Lets tests seed rows that only older releases could have written,
    /// such as unrecognized status values.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::DuplicateToken`] when the token is
    /// already taken.
    pub fn seed(&self, todo: Todo) -> TodoRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.tokens.insert(todo.token()) {
            return Err(TodoRepositoryError::DuplicateToken(todo.token()));
        }
        state.last_id = state.last_id.max(todo.id().value());
        state.todos.insert(todo.id(), todo);
        Ok(())
    }

    fn read(&self) -> TodoRepositoryResult<RwLockReadGuard<'_, InMemoryTodoState>> {
        self.state
            .read()
            .map_err(|err| TodoRepositoryError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TodoRepositoryResult<RwLockWriteGuard<'_, InMemoryTodoState>> {
        self.state
            .write()
            .map_err(|err| TodoRepositoryError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn store(&self, todo: &NewTodo) -> TodoRepositoryResult<TodoId> {
        let mut state = self.write()?;
        if state.tokens.contains(&todo.token()) {
            return Err(TodoRepositoryError::DuplicateToken(todo.token()));
        }

        state.last_id += 1;
        let id = TodoId::new(state.last_id);
        state.tokens.insert(todo.token());
        state.todos.insert(id, Todo::from_new(id, todo));
        Ok(id)
    }

    async fn list(&self, query: &TodoQuery) -> TodoRepositoryResult<Vec<Todo>> {
        let state = self.read()?;
        let mut todos: Vec<Todo> = state
            .todos
            .values()
            .filter(|todo| query.matches(todo))
            .cloned()
            .collect();
        todos.sort_by(|left, right| query.sort.compare(left, right));
        Ok(todos)
    }

    async fn due_on(&self, today: NaiveDate) -> TodoRepositoryResult<Vec<TodayEntry>> {
        let state = self.read()?;
        let mut entries: Vec<TodayEntry> = state
            .todos
            .values()
            .filter(|todo| todo.is_due_on(today))
            .map(|todo| TodayEntry::new(todo.clone(), today))
            .collect();
        entries.sort_by(compare_today);
        Ok(entries)
    }

    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        let state = self.read()?;
        Ok(state.todos.get(&id).cloned())
    }

    async fn update(
        &self,
        id: TodoId,
        fields: &TodoFields,
        updated_at: DateTime<Utc>,
    ) -> TodoRepositoryResult<bool> {
        let mut state = self.write()?;
        let Some(todo) = state.todos.get_mut(&id) else {
            return Ok(false);
        };
        todo.apply(fields, updated_at);
        Ok(true)
    }

    async fn update_status(
        &self,
        id: TodoId,
        status: TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> TodoRepositoryResult<bool> {
        let mut state = self.write()?;
        let Some(todo) = state.todos.get_mut(&id) else {
            return Ok(false);
        };
        todo.set_status(status, updated_at);
        Ok(true)
    }

    async fn delete(&self, id: TodoId) -> TodoRepositoryResult<bool> {
        let mut state = self.write()?;
        let Some(removed) = state.todos.remove(&id) else {
            return Ok(false);
        };
        state.tokens.remove(&removed.token());
        Ok(true)
    }
}
