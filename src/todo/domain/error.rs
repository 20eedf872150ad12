//! Error types for todo input validation.

use thiserror::Error;

/// Errors returned while turning user input into todo values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The title is empty after trimming.
    #[error("todo title must not be empty")]
    EmptyTitle,

    /// A date input is not a `YYYY-MM-DD` calendar date.
    #[error("invalid {field} '{value}', expected YYYY-MM-DD")]
    InvalidDate {
        /// Name of the offending input.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// The status is not one of the supported workflow states.
    #[error("unknown todo status: {0}")]
    UnknownStatus(String),

    /// The priority is not one of the supported levels.
    #[error("unknown todo priority: {0}")]
    UnknownPriority(String),
}
