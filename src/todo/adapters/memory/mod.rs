//! In-memory adapters for todo storage.

mod todo;

pub use todo::InMemoryTodoRepository;
