//! Error types for experience input validation.

use thiserror::Error;

/// Errors returned while turning user input into experience values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExperienceDomainError {
    /// The title is empty after trimming.
    #[error("experience title must not be empty")]
    EmptyTitle,

    /// A date input is not a `YYYY-MM-DD` calendar date.
    #[error("invalid {field} '{value}', expected YYYY-MM-DD")]
    InvalidDate {
        /// Name of the offending input.
        field: &'static str,
        /// The rejected input.
        value: String,
    },
}
