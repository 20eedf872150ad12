//! Application services for todo tracking.

mod lifecycle;

pub use lifecycle::{ListTodosRequest, TodoRequest, TodoService, TodoServiceError, TodoServiceResult};
