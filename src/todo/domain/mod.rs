//! Domain model for todo tracking.
//!
//! Todos carry a closed set of workflow statuses and priorities with fixed
//! rank orders. Values written by older releases that fall outside those
//! sets are preserved on read and rank last.

mod error;
mod ids;
mod query;
mod status;
mod todo;

pub use error::TodoDomainError;
pub use ids::{TodoId, TodoToken};
pub use query::{TodoQuery, TodoSort, TodoSortKey, compare_today};
pub use status::{RankedValue, Recognized, TaskPriority, TaskStatus};
pub use todo::{NewTodo, PersistedTodoData, Schedule, TodayEntry, Todo, TodoFields};
