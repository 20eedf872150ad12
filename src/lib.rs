//! Secondbrain: personal todo and experience tracker.
//!
//! This crate stores todo items and "past experience" journal entries in a
//! single-file `SQLite` database and reshapes experiences into documents
//! suitable for retrieval-augmented prompting.
//!
//! # Architecture
//!
//! Secondbrain follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete implementations of ports (`SQLite`, in-memory)
//! - **Services**: Request normalization and orchestration
//!
//! # Modules
//!
//! - [`todo`]: Todo creation, filtered listing, today's schedule and updates
//! - [`experience`]: Experience journal entries
//! - [`rag`]: Document export, search, prompt assembly and statistics
//! - [`storage`]: Connection pool and idempotent schema migrations
//! - [`config`]: Storage configuration

pub mod config;
pub mod experience;
pub mod listing;
pub mod rag;
pub mod storage;
pub mod text;
pub mod todo;
