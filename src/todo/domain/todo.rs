//! Todo record and the field set shared by creation and full updates.

use super::{Recognized, TaskPriority, TaskStatus, TodoDomainError, TodoId, TodoToken};
use crate::text::{BODY_MAX_CHARS, TITLE_MAX_CHARS, truncate_chars};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::Serialize;

/// Optional planning dates of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Schedule {
    /// Date the todo should be finished by.
    pub target_date: Option<NaiveDate>,
    /// Planned first working day.
    pub start_date: Option<NaiveDate>,
    /// Planned last working day.
    pub end_date: Option<NaiveDate>,
}

impl Schedule {
    /// Returns `true` when `today` lies inside the planned working window.
    ///
    /// Both ends must be present.
    #[must_use]
    pub fn covers(&self, today: NaiveDate) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= today && today <= end,
            _ => false,
        }
    }

    /// Returns `true` when the planned window ended before `today`.
    #[must_use]
    pub fn ended_before(&self, today: NaiveDate) -> bool {
        self.end_date.is_some_and(|end| end < today)
    }

    /// Days left until the target date; negative once it has passed.
    #[must_use]
    pub fn remaining_days(&self, today: NaiveDate) -> Option<i64> {
        self.target_date
            .map(|target| target.signed_duration_since(today).num_days())
    }
}

/// Validated, user-editable fields of a todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFields {
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    schedule: Schedule,
}

impl TodoFields {
    /// Creates a field set with the given title and default status and
    /// priority.
    ///
    /// The title is trimmed and truncated to [`TITLE_MAX_CHARS`] characters.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyTitle`] when the title is blank.
    pub fn new(title: &str) -> Result<Self, TodoDomainError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(TodoDomainError::EmptyTitle);
        }
        Ok(Self {
            title: truncate_chars(trimmed.to_owned(), TITLE_MAX_CHARS),
            description: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            schedule: Schedule::default(),
        })
    }

    /// Sets the description, truncated to [`BODY_MAX_CHARS`] characters.
    ///
    /// Blank descriptions are stored as absent.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let text = description.into();
        self.description =
            (!text.trim().is_empty()).then(|| truncate_chars(text, BODY_MAX_CHARS));
        self
    }

    /// Sets the workflow status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the planning dates.
    #[must_use]
    pub const fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the planning dates.
    #[must_use]
    pub const fn schedule(&self) -> Schedule {
        self.schedule
    }
}

/// A todo that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    token: TodoToken,
    fields: TodoFields,
    created_at: DateTime<Utc>,
}

impl NewTodo {
    /// Prepares a todo for storage with a fresh token and the clock's
    /// current time.
    #[must_use]
    pub fn new(fields: TodoFields, clock: &impl Clock) -> Self {
        Self {
            token: TodoToken::new(),
            fields,
            created_at: clock.utc(),
        }
    }

    /// Returns the token.
    #[must_use]
    pub const fn token(&self) -> TodoToken {
        self.token
    }

    /// Returns the fields.
    #[must_use]
    pub const fn fields(&self) -> &TodoFields {
        &self.fields
    }

    /// Returns the creation timestamp, also used as the first update
    /// timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Parameter object for reconstructing a stored todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTodoData {
    /// Stored key.
    pub id: TodoId,
    /// Stored token.
    pub token: TodoToken,
    /// Stored title.
    pub title: String,
    /// Stored description.
    pub description: Option<String>,
    /// Stored status, possibly from an older release.
    pub status: Recognized<TaskStatus>,
    /// Stored priority, possibly from an older release.
    pub priority: Recognized<TaskPriority>,
    /// Stored planning dates.
    pub schedule: Schedule,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A stored todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    id: TodoId,
    token: TodoToken,
    title: String,
    description: Option<String>,
    status: Recognized<TaskStatus>,
    priority: Recognized<TaskPriority>,
    schedule: Schedule,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Todo {
    /// Reconstructs a todo from storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTodoData) -> Self {
        Self {
            id: data.id,
            token: data.token,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            schedule: data.schedule,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Builds the stored form of a freshly inserted todo.
    #[must_use]
    pub fn from_new(id: TodoId, new_todo: &NewTodo) -> Self {
        let fields = new_todo.fields();
        Self {
            id,
            token: new_todo.token(),
            title: fields.title().to_owned(),
            description: fields.description().map(str::to_owned),
            status: fields.status().into(),
            priority: fields.priority().into(),
            schedule: fields.schedule(),
            created_at: new_todo.created_at(),
            updated_at: new_todo.created_at(),
        }
    }

    /// Replaces the editable fields, as a full update does.
    pub fn apply(&mut self, fields: &TodoFields, updated_at: DateTime<Utc>) {
        self.title = fields.title().to_owned();
        self.description = fields.description().map(str::to_owned);
        self.status = fields.status().into();
        self.priority = fields.priority().into();
        self.schedule = fields.schedule();
        self.updated_at = updated_at;
    }

    /// Changes only the status.
    pub fn set_status(&mut self, status: TaskStatus, updated_at: DateTime<Utc>) {
        self.status = status.into();
        self.updated_at = updated_at;
    }

    /// Returns the key.
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// Returns the token.
    #[must_use]
    pub const fn token(&self) -> TodoToken {
        self.token
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> &Recognized<TaskStatus> {
        &self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> &Recognized<TaskPriority> {
        &self.priority
    }

    /// Returns the planning dates.
    #[must_use]
    pub const fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the todo is finished.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status.is(TaskStatus::Done)
    }

    /// Returns `true` when the planned window ended before `today` and the
    /// todo is not finished.
    #[must_use]
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        self.schedule.ended_before(today) && !self.is_done()
    }

    /// Returns `true` when the todo belongs on the schedule for `today`.
    #[must_use]
    pub fn is_due_on(&self, today: NaiveDate) -> bool {
        self.schedule.covers(today) || self.is_overdue_on(today)
    }
}

/// A todo on today's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodayEntry {
    /// The scheduled todo.
    pub todo: Todo,
    /// Whether the planned window already ended without the todo being done.
    pub overdue: bool,
}

impl TodayEntry {
    /// Classifies `todo` for `today`.
    #[must_use]
    pub fn new(todo: Todo, today: NaiveDate) -> Self {
        let overdue = todo.is_overdue_on(today);
        Self { todo, overdue }
    }
}
