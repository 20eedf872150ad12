//! Adapter implementations for todo storage ports.

pub mod memory;
pub mod sqlite;
