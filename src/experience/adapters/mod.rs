//! Adapter implementations for experience storage ports.

pub mod memory;
pub mod sqlite;
