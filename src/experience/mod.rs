//! Experience journal.
//!
//! Experiences record what was learned on past work together with tags, a
//! category and situational context. The [`crate::rag`] module reshapes them
//! into retrieval documents.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
