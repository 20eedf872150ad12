//! Filtering and ordering rules for todo list views.
//!
//! The `SQLite` adapter expresses these rules in SQL; the comparators here
//! are the reference used by the in-memory adapter.

use super::{RankedValue, TaskPriority, TodayEntry, Todo};
use crate::listing::{CreatedWithin, SortOrder};
use std::cmp::Ordering;

/// Allow-listed sort keys for todo lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TodoSortKey {
    /// Creation timestamp.
    #[default]
    CreatedAt,
    /// Latest modification timestamp.
    UpdatedAt,
    /// Title, byte-wise.
    Title,
    /// Workflow rank: in-queue, ready, in-progress, hold, done.
    Status,
    /// Priority rank: Low, Medium, High, Critical.
    Priority,
    /// Target date.
    TargetDate,
    /// Planned start date.
    StartDate,
    /// Planned end date.
    EndDate,
    /// Days until the target date, with undated todos always last.
    RemainingDays,
}

impl TodoSortKey {
    /// Every accepted key.
    pub const ALL: [Self; 9] = [
        Self::CreatedAt,
        Self::UpdatedAt,
        Self::Title,
        Self::Status,
        Self::Priority,
        Self::TargetDate,
        Self::StartDate,
        Self::EndDate,
        Self::RemainingDays,
    ];

    /// Returns the request name of this key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Title => "title",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::TargetDate => "target_date",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::RemainingDays => "remaining_days",
        }
    }

    /// Matches a request name, falling back to [`TodoSortKey::CreatedAt`].
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .unwrap_or_default()
    }
}

/// Sort key and direction for a todo list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TodoSort {
    /// Key to sort by.
    pub key: TodoSortKey,
    /// Direction.
    pub order: SortOrder,
}

impl TodoSort {
    /// Parses request values, replacing anything unknown with the defaults.
    #[must_use]
    pub fn parse(sort_by: &str, sort_order: &str) -> Self {
        Self {
            key: TodoSortKey::parse_or_default(sort_by),
            order: SortOrder::parse_or_default(sort_order),
        }
    }

    /// Compares two todos in list order; ties fall back to the key in the
    /// same direction.
    #[must_use]
    pub fn compare(&self, left: &Todo, right: &Todo) -> Ordering {
        let primary = match self.key {
            TodoSortKey::RemainingDays => {
                let undated = left
                    .schedule()
                    .target_date
                    .is_none()
                    .cmp(&right.schedule().target_date.is_none());
                undated.then_with(|| {
                    self.order
                        .apply(left.schedule().target_date.cmp(&right.schedule().target_date))
                })
            }
            key => self.order.apply(compare_by_key(key, left, right)),
        };
        primary.then_with(|| self.order.apply(left.id().cmp(&right.id())))
    }
}

fn compare_by_key(key: TodoSortKey, left: &Todo, right: &Todo) -> Ordering {
    match key {
        TodoSortKey::CreatedAt => left.created_at().cmp(&right.created_at()),
        TodoSortKey::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
        TodoSortKey::Title => left.title().cmp(right.title()),
        TodoSortKey::Status => left.status().rank().cmp(&right.status().rank()),
        TodoSortKey::Priority => left.priority().rank().cmp(&right.priority().rank()),
        TodoSortKey::TargetDate | TodoSortKey::RemainingDays => left
            .schedule()
            .target_date
            .cmp(&right.schedule().target_date),
        TodoSortKey::StartDate => left.schedule().start_date.cmp(&right.schedule().start_date),
        TodoSortKey::EndDate => left.schedule().end_date.cmp(&right.schedule().end_date),
    }
}

/// Predicate and ordering for a todo list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoQuery {
    /// Exact stored status to match. Takes precedence over `include_done`.
    pub status: Option<String>,
    /// Keep finished todos when no status filter is given.
    pub include_done: bool,
    /// Inclusive creation date bounds.
    pub created: CreatedWithin,
    /// Ordering.
    pub sort: TodoSort,
}

impl TodoQuery {
    /// Returns `true` when `todo` satisfies every filter.
    #[must_use]
    pub fn matches(&self, todo: &Todo) -> bool {
        let status_ok = self.status.as_ref().map_or_else(
            || self.include_done || !todo.is_done(),
            |status| todo.status().as_str() == status,
        );
        status_ok && self.created.contains(todo.created_at())
    }
}

/// Orders today's schedule: overdue first, then Critical to Low priority
/// with unrecognized values last, then earliest start date, then key.
#[must_use]
pub fn compare_today(left: &TodayEntry, right: &TodayEntry) -> Ordering {
    right
        .overdue
        .cmp(&left.overdue)
        .then_with(|| urgency(&left.todo).cmp(&urgency(&right.todo)))
        .then_with(|| {
            left.todo
                .schedule()
                .start_date
                .cmp(&right.todo.schedule().start_date)
        })
        .then_with(|| left.todo.id().cmp(&right.todo.id()))
}

fn urgency(todo: &Todo) -> u8 {
    todo.priority()
        .known()
        .map_or(TaskPriority::UNRECOGNIZED_RANK, TaskPriority::urgency)
}

