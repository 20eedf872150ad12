//! Boxed list queries composed from a [`TodoQuery`].
//!
//! Every user-supplied value is bound as a parameter. The only generated
//! SQL text is the rank `CASE` built from the enum rank tables.

use super::schema::todos;
use crate::listing::SortOrder;
use crate::todo::domain::{RankedValue, TaskPriority, TaskStatus, TodoQuery, TodoSortKey};
use chrono::NaiveDate;
use diesel::dsl::{date, sql};
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel::sqlite::Sqlite;

pub(super) type BoxedTodoQuery = todos::BoxedQuery<'static, Sqlite>;

macro_rules! then_order {
    ($statement:expr, $expr:expr, $order:expr) => {
        match $order {
            SortOrder::Asc => $statement.then_order_by($expr.asc()),
            SortOrder::Desc => $statement.then_order_by($expr.desc()),
        }
    };
}

/// Builds `CASE <column> WHEN '<value>' THEN <rank> ... ELSE <last> END`.
fn rank_case<T: RankedValue>(column: &str) -> String {
    let arms: String = T::ALL
        .iter()
        .map(|value| format!(" WHEN '{}' THEN {}", value.as_str(), value.rank()))
        .collect();
    format!("CASE {column}{arms} ELSE {} END", T::UNRECOGNIZED_RANK)
}

pub(super) fn list_query(query: &TodoQuery) -> BoxedTodoQuery {
    let mut statement = todos::table.into_boxed();

    match &query.status {
        Some(status) => statement = statement.filter(todos::status.eq(status.clone())),
        None if !query.include_done => {
            statement = statement.filter(
                todos::status
                    .is_null()
                    .or(todos::status.ne(TaskStatus::Done.as_str())),
            );
        }
        None => {}
    }
    if let Some(from) = query.created.from {
        statement = statement.filter(date(todos::created_at).ge(from));
    }
    if let Some(to) = query.created.to {
        statement = statement.filter(date(todos::created_at).le(to));
    }

    let order = query.sort.order;
    statement = match query.sort.key {
        TodoSortKey::CreatedAt => then_order!(statement, todos::created_at, order),
        TodoSortKey::UpdatedAt => then_order!(statement, todos::updated_at, order),
        TodoSortKey::Title => then_order!(statement, todos::title, order),
        TodoSortKey::Status => {
            then_order!(statement, sql::<Integer>(&rank_case::<TaskStatus>("status")), order)
        }
        TodoSortKey::Priority => {
            then_order!(statement, sql::<Integer>(&rank_case::<TaskPriority>("priority")), order)
        }
        TodoSortKey::TargetDate => then_order!(statement, todos::target_date, order),
        TodoSortKey::StartDate => then_order!(statement, todos::start_date, order),
        TodoSortKey::EndDate => then_order!(statement, todos::end_date, order),
        TodoSortKey::RemainingDays => {
            let undated_last = statement.then_order_by(todos::target_date.is_null().asc());
            then_order!(undated_last, todos::target_date, order)
        }
    };
    then_order!(statement, todos::id, order)
}

/// Todos whose planned window covers `today`, plus unfinished todos whose
/// window already ended.
pub(super) fn due_query(today: NaiveDate) -> BoxedTodoQuery {
    let covers = todos::start_date
        .le(today)
        .and(todos::end_date.ge(today));
    let overdue = todos::end_date.lt(today).and(
        todos::status
            .is_null()
            .or(todos::status.ne(TaskStatus::Done.as_str())),
    );
    todos::table
        .into_boxed()
        .filter(covers.or(overdue))
        .order_by(todos::id.asc())
}
